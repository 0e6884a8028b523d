use sift_types::{EntryMode, ObjectId};

/// A single entry in a filtered directory listing.
///
/// The id is a view-namespace identifier: decodable by this layer, opaque
/// to everyone else.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ViewTreeEntry {
    /// Entry name (filename or directory name).
    pub name: String,
    /// View-namespace identifier of the referenced object.
    pub id: ObjectId,
    /// File mode, passed through from the backing store unchanged.
    pub mode: EntryMode,
}

/// A directory listing in the view namespace.
///
/// Produced by [`ViewStore::get_tree`](crate::ViewStore::get_tree): the
/// entries that survived the filter, in backing-store order, each re-keyed
/// with a view-namespace identifier. The tree answers to the identifier it
/// was requested by. Listings are snapshots; they are never cached or
/// persisted by this layer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ViewTree {
    /// The identifier this tree was fetched by.
    pub id: ObjectId,
    /// Visible entries in store order.
    pub entries: Vec<ViewTreeEntry>,
}

impl ViewTree {
    /// Create a new view tree.
    pub fn new(id: ObjectId, entries: Vec<ViewTreeEntry>) -> Self {
        Self { id, entries }
    }

    /// Look up an entry by name.
    pub fn get(&self, name: &str) -> Option<&ViewTreeEntry> {
        self.entries.iter().find(|e| e.name == name)
    }

    /// Iterate over visible entries in store order.
    pub fn iter(&self) -> std::slice::Iter<'_, ViewTreeEntry> {
        self.entries.iter()
    }

    /// Number of visible entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if nothing is visible in this directory.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
