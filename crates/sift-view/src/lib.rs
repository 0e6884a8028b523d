//! Filtered views over a content-addressed backing store.
//!
//! This crate is the heart of Sift: it puts a [`ViewStore`] in front of a
//! [`sift_store::BackingStore`] and serves trees, blobs, and comparisons in
//! a namespace of its own. Every identifier handed out ([`ViewId`], encoded
//! as an opaque [`ObjectId`]) carries the context needed to answer later
//! requests -- for trees, the path and the filter identity; for blobs,
//! nothing but the content hash -- so the store itself can stay stateless.
//!
//! # Key Types
//!
//! - [`ViewStore`] -- resolves roots, lists filtered trees, fetches blobs,
//!   compares identifiers
//! - [`ViewId`] -- the compound identifier and its wire codec
//! - [`ViewTree`] -- a filtered directory listing, entries re-keyed into
//!   the view namespace
//! - [`ViewError`] -- what can go wrong, caller mistakes kept apart from
//!   backing faults
//!
//! # Design Rules
//!
//! 1. The view layer is read-only and cache-free: every request decodes,
//!    delegates at most one backing fetch, and re-encodes.
//! 2. Malformed identifiers fail eagerly, before any backing request is
//!    issued.
//! 3. Filtering removes tree entries; blob content is never altered.
//! 4. Concurrent lookups are never coalesced, and dropping a pending
//!    future abandons the request with nothing to clean up.

pub mod error;
pub mod ident;
pub mod store;
pub mod tree;

// Re-export primary types at crate root for ergonomic imports.
pub use error::{ViewError, ViewResult};
pub use ident::{DecodeError, ViewId};
pub use store::ViewStore;
pub use tree::{ViewTree, ViewTreeEntry};

// The identifier types callers exchange with a view store.
pub use sift_types::{ObjectId, RootId};
