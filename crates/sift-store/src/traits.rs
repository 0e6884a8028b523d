use async_trait::async_trait;
use sift_types::{HashId, ObjectComparison};

use crate::error::StoreResult;
use crate::object::{Blob, BlobMetadata, Tree};

/// Async, read-only interface to an underlying object store.
///
/// All implementations must satisfy these invariants:
/// - Objects are immutable once stored. Refetching a hash never observes
///   different content.
/// - Absence is not a fault: lookups of unknown keys return `Ok(None)`,
///   and `Err` is reserved for infrastructure failures.
/// - Fetches of distinct keys are independent; the store may service them
///   in any order.
#[async_trait]
pub trait BackingStore: Send + Sync {
    /// Resolve a root snapshot name to the hash of its root tree.
    ///
    /// Returns `Ok(None)` if the store knows no such root.
    async fn resolve_root_to_tree_hash(&self, root: &str) -> StoreResult<Option<HashId>>;

    /// Fetch a tree object by hash.
    async fn fetch_tree(&self, hash: &HashId) -> StoreResult<Option<Tree>>;

    /// Fetch a blob object by hash.
    async fn fetch_blob(&self, hash: &HashId) -> StoreResult<Option<Blob>>;

    /// Fetch a blob's metadata (size and content hash).
    ///
    /// The default implementation fetches the whole blob and derives the
    /// metadata from it. Backends that index metadata separately may
    /// override this to skip the content fetch.
    async fn fetch_blob_metadata(&self, hash: &HashId) -> StoreResult<Option<BlobMetadata>> {
        Ok(self.fetch_blob(hash).await?.map(|blob| blob.metadata()))
    }

    /// Compare two hashes in this store's namespace without fetching.
    ///
    /// Byte-equal hashes always name identical content, so the default is
    /// `Identical` for equal inputs and `Unknown` otherwise. Stores whose
    /// namespace is strictly content-addressed may strengthen the unequal
    /// case to `Different`.
    async fn compare_hashes(&self, a: &HashId, b: &HashId) -> ObjectComparison {
        if a == b {
            ObjectComparison::Identical
        } else {
            ObjectComparison::Unknown
        }
    }
}
