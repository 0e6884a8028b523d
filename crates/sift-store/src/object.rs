use bytes::Bytes;
use serde::{Deserialize, Serialize};
use sift_types::{EntryMode, HashId};

// ---------------------------------------------------------------------------
// Blob
// ---------------------------------------------------------------------------

/// Raw content object (analogous to git blob).
///
/// Content is held as [`Bytes`] so fetch paths can hand out clones without
/// copying the payload.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Blob {
    pub data: Bytes,
}

impl Blob {
    /// Create a new blob from raw bytes.
    pub fn new(data: impl Into<Bytes>) -> Self {
        Self { data: data.into() }
    }

    /// Size of the content in bytes.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns `true` if the blob holds no bytes.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Derive this blob's metadata from its content.
    pub fn metadata(&self) -> BlobMetadata {
        BlobMetadata {
            size: self.data.len() as u64,
            content_id: HashId::from_bytes(&self.data),
        }
    }
}

/// Size and content hash of a blob, available without holding the content.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlobMetadata {
    /// Content size in bytes.
    pub size: u64,
    /// BLAKE3 hash of the content.
    pub content_id: HashId,
}

// ---------------------------------------------------------------------------
// Tree
// ---------------------------------------------------------------------------

/// A single entry in a tree object.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreeEntry {
    /// File mode (regular, executable, symlink, directory).
    pub mode: EntryMode,
    /// Entry name (filename or directory name).
    pub name: String,
    /// Backing-namespace hash of the referenced object.
    pub hash: HashId,
}

impl TreeEntry {
    /// Create a new tree entry.
    pub fn new(mode: EntryMode, name: impl Into<String>, hash: HashId) -> Self {
        Self {
            mode,
            name: name.into(),
            hash,
        }
    }
}

/// Directory listing object (analogous to git tree).
///
/// Entries keep the order the backing store supplied them in. Sift never
/// reorders a listing: consumers see entries exactly as the store laid them
/// out, minus whatever a filter removes. Names are expected to be unique
/// within a tree; lookups return the first match.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tree {
    /// Entries in store order.
    pub entries: Vec<TreeEntry>,
}

impl Tree {
    /// Create a new tree with the given entries, order preserved.
    pub fn new(entries: Vec<TreeEntry>) -> Self {
        Self { entries }
    }

    /// Create an empty tree.
    pub fn empty() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Look up an entry by name.
    pub fn get(&self, name: &str) -> Option<&TreeEntry> {
        self.entries.iter().find(|e| e.name == name)
    }

    /// Iterate over entries in store order.
    pub fn iter(&self) -> std::slice::Iter<'_, TreeEntry> {
        self.entries.iter()
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the tree has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
