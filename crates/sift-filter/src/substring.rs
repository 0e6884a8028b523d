use sift_types::{EntryMode, RepoPath};

use crate::filter::PathFilter;

/// Excludes a path when its rendered form contains the filter id as a
/// substring.
///
/// Blunt on purpose: the filter id doubles as the rule, which makes this
/// handy for tests and demos ("foo" hides both `foo` and `dir1/foo`) and
/// wrong for anything else. Note that an empty filter id is a substring of
/// every path and therefore hides the entire view.
#[derive(Clone, Copy, Debug, Default)]
pub struct SubstringFilter;

impl PathFilter for SubstringFilter {
    fn should_exclude(&self, path: &RepoPath, filter_id: &str, _mode: EntryMode) -> bool {
        path.as_str().contains(filter_id)
    }
}
