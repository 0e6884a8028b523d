//! Path filtering for Sift.
//!
//! A filter decides, per path, what a filtered view may show. This crate
//! defines the [`PathFilter`] capability trait the view layer consults and
//! a small set of stock implementations:
//!
//! - [`AllowAllFilter`] -- excludes nothing; the identity filter
//! - [`SubstringFilter`] -- excludes paths containing the filter id; for tests
//! - [`PrefixSetFilter`] -- maps filter identities to excluded path prefixes
//!
//! Filters are synchronous and must be deterministic: the view layer mints
//! identifiers based on filter answers, and an identifier only stays valid
//! if the filter keeps giving the answer it gave when the identifier was
//! minted.

pub mod filter;
pub mod prefix;
pub mod substring;

pub use filter::{AllowAllFilter, PathFilter};
pub use prefix::PrefixSetFilter;
pub use substring::SubstringFilter;
