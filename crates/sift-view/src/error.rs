use sift_store::StoreError;
use sift_types::{HashId, RepoPath};

/// Errors from view-layer operations.
///
/// Decoding failures are eager: a malformed identifier is rejected before
/// any backing request is issued. Missing objects are errors here, unlike
/// at the [`sift_store`] layer, because a view identifier always claims its
/// object exists.
#[derive(Debug, thiserror::Error)]
pub enum ViewError {
    /// The root id lacks the `:` separating the underlying root from the
    /// filter identity.
    #[error("invalid root id {id:?}: expected '<root>:<filter-id>'")]
    InvalidRootId { id: String },

    /// The identifier is not a well-formed tree identifier.
    #[error("invalid tree id: {reason}")]
    InvalidTreeId { reason: String },

    /// The identifier is not a well-formed blob identifier.
    #[error("invalid blob id: {reason}")]
    InvalidBlobId { reason: String },

    /// An identifier handed to the comparator failed to decode.
    #[error("invalid comparison input: {reason}")]
    InvalidComparisonInput { reason: String },

    /// The backing store has no commit for the underlying root id.
    #[error("root {root_id:?} not found")]
    RootNotFound { root_id: String },

    /// The backing store has no tree for the underlying hash.
    #[error("tree {hash} for path '{path}' not found")]
    TreeNotFound { hash: HashId, path: RepoPath },

    /// The backing store has no blob for the underlying hash.
    #[error("blob {hash} not found")]
    BlobNotFound { hash: HashId },

    /// The backing store returned a tree entry whose name is not a valid
    /// path component.
    #[error("tree {hash} has invalid entry name {name:?}")]
    CorruptTree { hash: HashId, name: String },

    /// The backing store failed; passed through unchanged.
    #[error(transparent)]
    Backing(#[from] StoreError),
}

/// Result alias for view operations.
pub type ViewResult<T> = Result<T, ViewError>;
