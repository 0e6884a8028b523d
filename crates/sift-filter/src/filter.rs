use sift_types::{EntryMode, RepoPath};

/// Decides which paths a filtered view may show.
///
/// One `PathFilter` value serves every filter identity; the rule set to
/// apply is selected by `filter_id`. Implementations must be cheap,
/// synchronous, and deterministic for a given `(path, filter_id, mode)`
/// triple: the view layer consults the filter while mapping directory
/// listings and bakes the answers into the identifiers it mints, so a
/// wavering filter would produce identifiers that disagree with the trees
/// they came from.
///
/// The trait is object-safe and `Send + Sync` so a view can hold one
/// `Arc<dyn PathFilter>` and consult it from concurrent lookups.
pub trait PathFilter: Send + Sync {
    /// Returns `true` when `path` must be hidden from views using
    /// `filter_id`.
    ///
    /// `mode` is the kind of object the path names; rule sets may treat
    /// directories differently from files. Hiding a directory hides
    /// everything beneath it, since nothing beneath it remains reachable.
    fn should_exclude(&self, path: &RepoPath, filter_id: &str, mode: EntryMode) -> bool;
}

/// The identity filter: every path is visible under every filter identity.
#[derive(Clone, Copy, Debug, Default)]
pub struct AllowAllFilter;

impl PathFilter for AllowAllFilter {
    fn should_exclude(&self, _path: &RepoPath, _filter_id: &str, _mode: EntryMode) -> bool {
        false
    }
}
