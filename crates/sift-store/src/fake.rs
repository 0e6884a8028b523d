use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, RwLock};

use async_trait::async_trait;
use bytes::Bytes;
use tokio::sync::oneshot;

use sift_types::{HashId, ObjectComparison};

use crate::error::{StoreError, StoreResult};
use crate::object::{Blob, Tree, TreeEntry};
use crate::traits::BackingStore;

struct Gate<T> {
    ready: bool,
    waiters: Vec<oneshot::Sender<StoreResult<T>>>,
}

/// A stored object whose fetches are gated behind manual completion signals.
///
/// Until [`set_ready`] is called, every fetch of the entry suspends, and the
/// test drives completion through the handle returned by the `put_*` call
/// that created it:
///
/// - [`trigger`] completes every fetch currently waiting;
/// - [`trigger_one`] completes only the longest-waiting fetch;
/// - [`trigger_error`] fails every waiting fetch with an injected fault;
/// - [`set_ready`] completes waiting fetches and lets all later ones through.
///
/// A fetch joins the waiter list when its future is first polled; futures
/// that are never polled never register and cannot be completed by a
/// signal. Signals are discrete: a fetch polled after a `trigger` waits for
/// the next one.
///
/// [`trigger`]: StoredEntry::trigger
/// [`trigger_one`]: StoredEntry::trigger_one
/// [`trigger_error`]: StoredEntry::trigger_error
/// [`set_ready`]: StoredEntry::set_ready
pub struct StoredEntry<T> {
    value: T,
    gate: Mutex<Gate<T>>,
}

impl<T: Clone> StoredEntry<T> {
    fn new(value: T) -> Self {
        Self {
            value,
            gate: Mutex::new(Gate {
                ready: false,
                waiters: Vec::new(),
            }),
        }
    }

    /// The stored value, regardless of gating.
    pub fn value(&self) -> &T {
        &self.value
    }

    /// Number of fetches currently suspended on this entry.
    pub fn pending_count(&self) -> usize {
        self.gate.lock().expect("lock poisoned").waiters.len()
    }

    /// Complete every fetch currently waiting.
    ///
    /// Waiters whose futures were dropped are skipped silently.
    pub fn trigger(&self) {
        let waiters = {
            let mut gate = self.gate.lock().expect("lock poisoned");
            std::mem::take(&mut gate.waiters)
        };
        for tx in waiters {
            let _ = tx.send(Ok(self.value.clone()));
        }
    }

    /// Complete only the longest-waiting fetch.
    ///
    /// Returns `false` if nothing was waiting.
    pub fn trigger_one(&self) -> bool {
        let tx = {
            let mut gate = self.gate.lock().expect("lock poisoned");
            if gate.waiters.is_empty() {
                return false;
            }
            gate.waiters.remove(0)
        };
        let _ = tx.send(Ok(self.value.clone()));
        true
    }

    /// Fail every fetch currently waiting with a backend fault.
    ///
    /// The entry itself survives: later fetches suspend again and can still
    /// be completed normally.
    pub fn trigger_error(&self, reason: impl Into<String>) {
        let reason = reason.into();
        let waiters = {
            let mut gate = self.gate.lock().expect("lock poisoned");
            std::mem::take(&mut gate.waiters)
        };
        for tx in waiters {
            let _ = tx.send(Err(StoreError::Fault(reason.clone())));
        }
    }

    /// Complete current waiters and let every later fetch through
    /// immediately.
    pub fn set_ready(&self) {
        let waiters = {
            let mut gate = self.gate.lock().expect("lock poisoned");
            gate.ready = true;
            std::mem::take(&mut gate.waiters)
        };
        for tx in waiters {
            let _ = tx.send(Ok(self.value.clone()));
        }
    }

    async fn wait(&self) -> StoreResult<T> {
        let rx = {
            let mut gate = self.gate.lock().expect("lock poisoned");
            if gate.ready {
                return Ok(self.value.clone());
            }
            let (tx, rx) = oneshot::channel();
            gate.waiters.push(tx);
            rx
        };
        match rx.await {
            Ok(result) => result,
            Err(_) => Err(StoreError::Fault(
                "stored entry dropped before completion".to_string(),
            )),
        }
    }
}

/// In-memory, manually-gated backing store.
///
/// Intended for tests and embedding. Every `put_*` call returns an
/// [`Arc<StoredEntry>`] handle through which the test decides when (and
/// whether) fetches of that object complete, allowing assertions about
/// what a caller does while a fetch is still in flight. Lookups of keys
/// never stored complete immediately with `Ok(None)`.
///
/// Re-putting a key replaces the entry wholesale; fetches already suspended
/// on the old entry still answer to the old handle.
pub struct FakeBackingStore {
    commits: RwLock<HashMap<String, Arc<StoredEntry<HashId>>>>,
    trees: RwLock<HashMap<HashId, Arc<StoredEntry<Tree>>>>,
    blobs: RwLock<HashMap<HashId, Arc<StoredEntry<Blob>>>>,
    requests: AtomicU64,
}

impl FakeBackingStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self {
            commits: RwLock::new(HashMap::new()),
            trees: RwLock::new(HashMap::new()),
            blobs: RwLock::new(HashMap::new()),
            requests: AtomicU64::new(0),
        }
    }

    /// Store a blob under an explicit hash, gated.
    pub fn put_blob(&self, hash: HashId, content: impl Into<Bytes>) -> Arc<StoredEntry<Blob>> {
        let entry = Arc::new(StoredEntry::new(Blob::new(content)));
        self.blobs
            .write()
            .expect("lock poisoned")
            .insert(hash, Arc::clone(&entry));
        entry
    }

    /// Store a blob under its content hash, gated.
    pub fn put_hashed_blob(&self, content: impl Into<Bytes>) -> (HashId, Arc<StoredEntry<Blob>>) {
        let data: Bytes = content.into();
        let hash = HashId::from_bytes(&data);
        let entry = self.put_blob(hash, data);
        (hash, entry)
    }

    /// Store a tree under an explicit hash, gated. Entry order is kept.
    pub fn put_tree(&self, hash: HashId, entries: Vec<TreeEntry>) -> Arc<StoredEntry<Tree>> {
        let entry = Arc::new(StoredEntry::new(Tree::new(entries)));
        self.trees
            .write()
            .expect("lock poisoned")
            .insert(hash, Arc::clone(&entry));
        entry
    }

    /// Map a root snapshot name to its root tree hash, gated.
    pub fn put_commit(
        &self,
        root: impl Into<String>,
        tree_hash: HashId,
    ) -> Arc<StoredEntry<HashId>> {
        let entry = Arc::new(StoredEntry::new(tree_hash));
        self.commits
            .write()
            .expect("lock poisoned")
            .insert(root.into(), Arc::clone(&entry));
        entry
    }

    /// Total backing requests served so far, misses included.
    pub fn request_count(&self) -> u64 {
        self.requests.load(Ordering::Relaxed)
    }
}

impl Default for FakeBackingStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BackingStore for FakeBackingStore {
    async fn resolve_root_to_tree_hash(&self, root: &str) -> StoreResult<Option<HashId>> {
        self.requests.fetch_add(1, Ordering::Relaxed);
        let entry = {
            let map = self.commits.read().expect("lock poisoned");
            match map.get(root) {
                Some(entry) => Arc::clone(entry),
                None => return Ok(None),
            }
        };
        entry.wait().await.map(Some)
    }

    async fn fetch_tree(&self, hash: &HashId) -> StoreResult<Option<Tree>> {
        self.requests.fetch_add(1, Ordering::Relaxed);
        let entry = {
            let map = self.trees.read().expect("lock poisoned");
            match map.get(hash) {
                Some(entry) => Arc::clone(entry),
                None => return Ok(None),
            }
        };
        entry.wait().await.map(Some)
    }

    async fn fetch_blob(&self, hash: &HashId) -> StoreResult<Option<Blob>> {
        self.requests.fetch_add(1, Ordering::Relaxed);
        let entry = {
            let map = self.blobs.read().expect("lock poisoned");
            match map.get(hash) {
                Some(entry) => Arc::clone(entry),
                None => return Ok(None),
            }
        };
        entry.wait().await.map(Some)
    }

    // The fake's namespace is strictly content-addressed, so unequal keys
    // always name different content.
    async fn compare_hashes(&self, a: &HashId, b: &HashId) -> ObjectComparison {
        if a == b {
            ObjectComparison::Identical
        } else {
            ObjectComparison::Different
        }
    }
}

impl std::fmt::Debug for FakeBackingStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FakeBackingStore")
            .field(
                "commits",
                &self.commits.read().expect("lock poisoned").len(),
            )
            .field("trees", &self.trees.read().expect("lock poisoned").len())
            .field("blobs", &self.blobs.read().expect("lock poisoned").len())
            .field("requests", &self.request_count())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::FutureExt;
    use sift_types::EntryMode;

    fn hash(n: u8) -> HashId {
        HashId::from_hash([n; 32])
    }

    // -----------------------------------------------------------------------
    // Absence
    // -----------------------------------------------------------------------

    #[tokio::test]
    async fn unknown_keys_resolve_immediately_to_none() {
        let store = FakeBackingStore::new();
        let h = hash(1);

        let blob = store.fetch_blob(&h).now_or_never();
        assert!(blob.unwrap().unwrap().is_none());

        let meta = store.fetch_blob_metadata(&h).now_or_never();
        assert!(meta.unwrap().unwrap().is_none());

        let tree = store.fetch_tree(&h).now_or_never();
        assert!(tree.unwrap().unwrap().is_none());

        let root = store.resolve_root_to_tree_hash("missing").now_or_never();
        assert!(root.unwrap().unwrap().is_none());
    }

    // -----------------------------------------------------------------------
    // Gating
    // -----------------------------------------------------------------------

    #[tokio::test]
    async fn set_ready_completes_current_and_future_fetches() {
        let store = FakeBackingStore::new();
        let h = hash(1);
        let entry = store.put_blob(h, &b"contents"[..]);

        let mut fut = Box::pin(store.fetch_blob(&h));
        assert!((&mut fut).now_or_never().is_none());

        entry.set_ready();
        let blob = fut.await.unwrap().expect("blob should exist");
        assert_eq!(&blob.data[..], b"contents");

        // Later fetches no longer suspend.
        let again = store.fetch_blob(&h).now_or_never();
        assert!(again.unwrap().unwrap().is_some());
    }

    #[tokio::test]
    async fn trigger_completes_only_current_waiters() {
        let store = FakeBackingStore::new();
        let h = hash(2);
        let entry = store.put_blob(h, &b"gated"[..]);

        // A trigger with nobody waiting is a no-op.
        entry.trigger();
        let mut fut = Box::pin(store.fetch_blob(&h));
        assert!((&mut fut).now_or_never().is_none());

        entry.trigger();
        assert_eq!(&fut.await.unwrap().unwrap().data[..], b"gated");

        // The next fetch waits for the next signal.
        let mut later = Box::pin(store.fetch_blob(&h));
        assert!((&mut later).now_or_never().is_none());
        entry.trigger();
        assert!(later.await.unwrap().is_some());
    }

    #[tokio::test]
    async fn trigger_one_completes_longest_waiting_fetch() {
        let store = FakeBackingStore::new();
        let h = hash(3);
        let entry = store.put_blob(h, &b"one at a time"[..]);

        let mut first = Box::pin(store.fetch_blob(&h));
        let mut second = Box::pin(store.fetch_blob(&h));
        assert!((&mut first).now_or_never().is_none());
        assert!((&mut second).now_or_never().is_none());
        assert_eq!(entry.pending_count(), 2);

        assert!(entry.trigger_one());
        assert!((&mut first).now_or_never().is_some());
        assert!((&mut second).now_or_never().is_none());
        assert_eq!(entry.pending_count(), 1);

        assert!(entry.trigger_one());
        assert!((&mut second).now_or_never().is_some());
        assert!(!entry.trigger_one());
    }

    #[tokio::test]
    async fn trigger_completes_all_concurrent_waiters() {
        let store = FakeBackingStore::new();
        let h = hash(4);
        let entry = store.put_blob(h, &b"shared"[..]);

        let mut first = Box::pin(store.fetch_blob(&h));
        let mut second = Box::pin(store.fetch_blob(&h));
        assert!((&mut first).now_or_never().is_none());
        assert!((&mut second).now_or_never().is_none());

        entry.trigger();
        assert_eq!(&first.await.unwrap().unwrap().data[..], b"shared");
        assert_eq!(&second.await.unwrap().unwrap().data[..], b"shared");
    }

    // -----------------------------------------------------------------------
    // Error injection
    // -----------------------------------------------------------------------

    #[tokio::test]
    async fn trigger_error_fails_waiters_but_entry_survives() {
        let store = FakeBackingStore::new();
        let h = hash(5);
        let entry = store.put_blob(h, &b"flaky"[..]);

        let mut fut = Box::pin(store.fetch_blob(&h));
        assert!((&mut fut).now_or_never().is_none());

        entry.trigger_error("cosmic rays");
        let err = fut.await.unwrap_err();
        assert!(matches!(err, StoreError::Fault(ref reason) if reason == "cosmic rays"));

        // The next fetch suspends again and can complete normally.
        let mut retry = Box::pin(store.fetch_blob(&h));
        assert!((&mut retry).now_or_never().is_none());
        entry.set_ready();
        assert!(retry.await.unwrap().is_some());
    }

    // -----------------------------------------------------------------------
    // Commits and trees
    // -----------------------------------------------------------------------

    #[tokio::test]
    async fn commit_resolution_is_gated_like_objects() {
        let store = FakeBackingStore::new();
        let tree_hash = hash(6);
        let commit = store.put_commit("snap-1", tree_hash);

        let mut fut = Box::pin(store.resolve_root_to_tree_hash("snap-1"));
        assert!((&mut fut).now_or_never().is_none());

        commit.trigger();
        assert_eq!(fut.await.unwrap(), Some(tree_hash));
    }

    #[tokio::test]
    async fn trees_come_back_in_put_order() {
        let store = FakeBackingStore::new();
        let h = hash(7);
        let entry = store.put_tree(
            h,
            vec![
                TreeEntry::new(EntryMode::Regular, "zzz", hash(8)),
                TreeEntry::new(EntryMode::Directory, "aaa", hash(9)),
            ],
        );
        entry.set_ready();

        let tree = store.fetch_tree(&h).await.unwrap().unwrap();
        let names: Vec<_> = tree.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["zzz", "aaa"]);
    }

    #[tokio::test]
    async fn reput_replaces_entry_with_fresh_gate() {
        let store = FakeBackingStore::new();
        let h = hash(10);
        store.put_blob(h, &b"old"[..]).set_ready();

        let replacement = store.put_blob(h, &b"new"[..]);
        let mut fut = Box::pin(store.fetch_blob(&h));
        assert!((&mut fut).now_or_never().is_none());

        replacement.trigger();
        assert_eq!(&fut.await.unwrap().unwrap().data[..], b"new");
    }

    // -----------------------------------------------------------------------
    // Metadata and comparison
    // -----------------------------------------------------------------------

    #[tokio::test]
    async fn metadata_is_gated_on_the_blob() {
        let store = FakeBackingStore::new();
        let (h, entry) = store.put_hashed_blob(&b"foobar"[..]);

        let mut fut = Box::pin(store.fetch_blob_metadata(&h));
        assert!((&mut fut).now_or_never().is_none());

        entry.trigger();
        let meta = fut.await.unwrap().expect("metadata should exist");
        assert_eq!(meta.size, 6);
        assert_eq!(meta.content_id, HashId::from_bytes(b"foobar"));
    }

    #[tokio::test]
    async fn hashed_blob_is_keyed_by_content() {
        let store = FakeBackingStore::new();
        let (h, entry) = store.put_hashed_blob(&b"addressed"[..]);
        assert_eq!(h, HashId::from_bytes(b"addressed"));

        entry.set_ready();
        assert!(store.fetch_blob(&h).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn compare_hashes_is_exact() {
        let store = FakeBackingStore::new();
        assert_eq!(
            store.compare_hashes(&hash(1), &hash(1)).await,
            ObjectComparison::Identical
        );
        assert_eq!(
            store.compare_hashes(&hash(1), &hash(2)).await,
            ObjectComparison::Different
        );
    }

    // -----------------------------------------------------------------------
    // Bookkeeping
    // -----------------------------------------------------------------------

    #[tokio::test]
    async fn request_count_tracks_every_lookup() {
        let store = FakeBackingStore::new();
        let h = hash(11);
        assert_eq!(store.request_count(), 0);

        let _ = store.fetch_blob(&h).await;
        let _ = store.fetch_tree(&h).await;
        let _ = store.resolve_root_to_tree_hash("none").await;
        assert_eq!(store.request_count(), 3);
    }

    #[tokio::test]
    async fn dropped_waiters_are_skipped() {
        let store = FakeBackingStore::new();
        let h = hash(12);
        let entry = store.put_blob(h, &b"abandoned"[..]);

        let mut dropped = Box::pin(store.fetch_blob(&h));
        let mut kept = Box::pin(store.fetch_blob(&h));
        assert!((&mut dropped).now_or_never().is_none());
        assert!((&mut kept).now_or_never().is_none());
        drop(dropped);

        entry.trigger();
        assert!(kept.await.unwrap().is_some());
    }

    #[tokio::test]
    async fn debug_format_shows_counts() {
        let store = FakeBackingStore::new();
        store.put_blob(hash(13), &b"x"[..]);
        let debug = format!("{store:?}");
        assert!(debug.contains("FakeBackingStore"));
        assert!(debug.contains("blobs"));
    }
}
