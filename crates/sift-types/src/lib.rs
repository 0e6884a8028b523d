//! Foundation types for Sift.
//!
//! This crate provides the identifier, path, and comparison types used
//! throughout the Sift view layer. Every other Sift crate depends on
//! `sift-types`.
//!
//! Sift works with two identifier namespaces that must never be confused:
//! the *backing* namespace of content hashes ([`HashId`]) and the *view*
//! namespace of opaque compound identifiers ([`ObjectId`]). Keeping them as
//! distinct types makes handing a backing hash to a view consumer (or the
//! reverse) a compile error rather than a runtime surprise.
//!
//! # Key Types
//!
//! - [`HashId`] — Content-addressed identifier in the backing namespace (BLAKE3 hash)
//! - [`ObjectId`] — Opaque identifier in the view namespace
//! - [`RepoPath`] — Canonical repository-relative path
//! - [`EntryMode`] — Kind of a tree entry (regular, executable, symlink, directory)
//! - [`ObjectComparison`] — Tri-state result of comparing two identifiers
//! - [`RootId`] — Root snapshot name joined with a filter identity

pub mod comparison;
pub mod error;
pub mod hash;
pub mod mode;
pub mod object;
pub mod path;
pub mod root;

pub use comparison::ObjectComparison;
pub use error::TypeError;
pub use hash::HashId;
pub use mode::EntryMode;
pub use object::ObjectId;
pub use path::RepoPath;
pub use root::RootId;
