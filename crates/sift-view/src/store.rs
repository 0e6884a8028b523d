use std::sync::Arc;

use tracing::debug;

use sift_filter::PathFilter;
use sift_store::{BackingStore, Blob, BlobMetadata};
use sift_types::{HashId, ObjectComparison, ObjectId, RepoPath, RootId};

use crate::error::{ViewError, ViewResult};
use crate::ident::ViewId;
use crate::tree::{ViewTree, ViewTreeEntry};

/// Serves filtered views of a backing store's object graph.
///
/// A `ViewStore` wraps a [`BackingStore`] and a [`PathFilter`] and answers
/// root, tree, blob, and comparison requests in its own identifier
/// namespace. It owns no other state and performs no writes: every
/// operation decodes an identifier, delegates at most one backing fetch,
/// and re-encodes the results. Concurrent lookups of the same identifier
/// are never coalesced; each reaches the backing store independently.
/// Dropping a pending future abandons the request with nothing to clean up.
pub struct ViewStore {
    backing: Arc<dyn BackingStore>,
    filter: Arc<dyn PathFilter>,
}

impl ViewStore {
    /// Create a view over `backing`, filtered by `filter`.
    pub fn new(backing: Arc<dyn BackingStore>, filter: Arc<dyn PathFilter>) -> Self {
        Self { backing, filter }
    }

    /// Resolve a `<root>:<filter-id>` name to the view identifier of its
    /// root tree.
    ///
    /// Only the commit lookup touches the backing store. The root tree
    /// itself is not fetched; it materializes when [`get_tree`] asks for
    /// it. The root directory is always visible, so the filter is not
    /// consulted here.
    ///
    /// [`get_tree`]: ViewStore::get_tree
    pub async fn get_root_tree(&self, root_id: &RootId) -> ViewResult<ObjectId> {
        let (underlying, filter_id) = root_id.split().ok_or_else(|| ViewError::InvalidRootId {
            id: root_id.as_str().to_string(),
        })?;
        let hash = self
            .backing
            .resolve_root_to_tree_hash(underlying)
            .await?
            .ok_or_else(|| ViewError::RootNotFound {
                root_id: root_id.as_str().to_string(),
            })?;
        debug!(root = underlying, filter = filter_id, hash = %hash, "resolved root");
        Ok(ViewId::tree(RepoPath::root(), filter_id, hash).encode())
    }

    /// Fetch a directory listing by view identifier, with excluded entries
    /// removed.
    ///
    /// Each surviving entry is re-keyed: subdirectories get tree
    /// identifiers extending this tree's path and carrying its filter,
    /// everything else gets a bare blob identifier. Entry order and modes
    /// pass through from the backing store unchanged.
    pub async fn get_tree(&self, id: &ObjectId) -> ViewResult<ViewTree> {
        let (path, filter_id, hash) = match ViewId::decode(id) {
            Ok(ViewId::Tree {
                path,
                filter_id,
                object,
            }) => (path, filter_id, object),
            Ok(ViewId::Blob { .. }) => {
                return Err(ViewError::InvalidTreeId {
                    reason: "identifier encodes a blob".to_string(),
                })
            }
            Err(e) => {
                return Err(ViewError::InvalidTreeId {
                    reason: e.to_string(),
                })
            }
        };

        let tree = self
            .backing
            .fetch_tree(&hash)
            .await?
            .ok_or_else(|| ViewError::TreeNotFound {
                hash,
                path: path.clone(),
            })?;

        let total = tree.len();
        let mut entries = Vec::with_capacity(total);
        for entry in tree.iter() {
            let child_path = path.join(&entry.name).map_err(|_| ViewError::CorruptTree {
                hash,
                name: entry.name.clone(),
            })?;
            if self.filter.should_exclude(&child_path, &filter_id, entry.mode) {
                continue;
            }
            let child_id = if entry.mode.is_tree() {
                ViewId::tree(child_path, filter_id.clone(), entry.hash).encode()
            } else {
                ViewId::blob(entry.hash).encode()
            };
            entries.push(ViewTreeEntry {
                name: entry.name.clone(),
                id: child_id,
                mode: entry.mode,
            });
        }
        if entries.len() < total {
            debug!(
                path = %path,
                filter = %filter_id,
                kept = entries.len(),
                total,
                "filtered tree entries"
            );
        }
        Ok(ViewTree::new(id.clone(), entries))
    }

    /// Fetch blob content by view identifier.
    ///
    /// Content comes back unchanged: filtering removes tree entries, never
    /// alters leaves.
    pub async fn get_blob(&self, id: &ObjectId) -> ViewResult<Blob> {
        let hash = self.decode_blob_id(id)?;
        self.backing
            .fetch_blob(&hash)
            .await?
            .ok_or(ViewError::BlobNotFound { hash })
    }

    /// Fetch blob metadata (size and content hash) by view identifier.
    pub async fn get_blob_metadata(&self, id: &ObjectId) -> ViewResult<BlobMetadata> {
        let hash = self.decode_blob_id(id)?;
        self.backing
            .fetch_blob_metadata(&hash)
            .await?
            .ok_or(ViewError::BlobNotFound { hash })
    }

    /// Compare two view identifiers without fetching either object.
    ///
    /// Blob pairs reduce to the backing store's verdict on the underlying
    /// hashes. Tree pairs are conservative: equal underlying hashes prove
    /// identity whatever filters produced the identifiers, and anything
    /// else is `Unknown`, because two different subtrees may still filter
    /// down to the same visible content. Mixed kinds are `Unknown`.
    pub async fn compare_objects_by_id(
        &self,
        a: &ObjectId,
        b: &ObjectId,
    ) -> ViewResult<ObjectComparison> {
        let first = ViewId::decode(a).map_err(|e| ViewError::InvalidComparisonInput {
            reason: e.to_string(),
        })?;
        let second = ViewId::decode(b).map_err(|e| ViewError::InvalidComparisonInput {
            reason: e.to_string(),
        })?;
        let result = match (&first, &second) {
            (ViewId::Blob { object: oa }, ViewId::Blob { object: ob }) => {
                self.backing.compare_hashes(oa, ob).await
            }
            (ViewId::Tree { object: oa, .. }, ViewId::Tree { object: ob, .. }) => {
                if oa == ob {
                    ObjectComparison::Identical
                } else {
                    ObjectComparison::Unknown
                }
            }
            _ => ObjectComparison::Unknown,
        };
        Ok(result)
    }

    fn decode_blob_id(&self, id: &ObjectId) -> ViewResult<HashId> {
        match ViewId::decode(id) {
            Ok(ViewId::Blob { object }) => Ok(object),
            Ok(ViewId::Tree { .. }) => Err(ViewError::InvalidBlobId {
                reason: "identifier encodes a tree".to_string(),
            }),
            Err(e) => Err(ViewError::InvalidBlobId {
                reason: e.to_string(),
            }),
        }
    }
}
