//! Backing-store interface and object model for Sift.
//!
//! This crate defines what a backing store looks like from the view layer's
//! side of the fence: an async, read-only source of trees, blobs, and root
//! resolutions, keyed by content hash ([`sift_types::HashId`]). Sift never
//! writes to a backing store and never caches what it reads.
//!
//! # Object Types
//!
//! - [`Blob`] -- raw content (file contents, arbitrary data)
//! - [`Tree`] -- directory listing mapping names to hashes, order preserved
//! - [`BlobMetadata`] -- size and content hash of a blob
//!
//! # Backends
//!
//! All backends implement the [`BackingStore`] trait:
//!
//! - [`FakeBackingStore`] -- manually-gated store for tests and embedding
//!
//! # Design Rules
//!
//! 1. Objects are immutable once stored: refetching a hash never observes
//!    different content.
//! 2. Absence is not a fault. Lookups of unknown keys return `Ok(None)`;
//!    `Err` is reserved for infrastructure failures.
//! 3. Tree entry order is the store's order and is preserved end to end.
//! 4. All backend errors are propagated, never silently ignored.

pub mod error;
pub mod fake;
pub mod object;
pub mod traits;

// Re-export primary types at crate root for ergonomic imports.
pub use error::{StoreError, StoreResult};
pub use fake::{FakeBackingStore, StoredEntry};
pub use object::{Blob, BlobMetadata, Tree, TreeEntry};
pub use traits::BackingStore;
