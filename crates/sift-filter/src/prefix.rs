use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use sift_types::{EntryMode, RepoPath};

use crate::filter::PathFilter;

/// Maps filter identities to sets of excluded path prefixes.
///
/// A rule excludes the prefix itself and everything below it, on component
/// boundaries: the prefix `foo` covers `foo` and `foo/bar` but not `foobar`.
/// Filter identities with no registered rules exclude nothing.
///
/// Rule sets serialize as a plain map from filter id to prefix list, so
/// they can live in configuration files.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PrefixSetFilter {
    rules: HashMap<String, Vec<RepoPath>>,
}

impl PrefixSetFilter {
    /// Create a filter with no rules.
    pub fn new() -> Self {
        Self {
            rules: HashMap::new(),
        }
    }

    /// Add an excluded prefix for a filter identity, builder style.
    pub fn with_rule(mut self, filter_id: impl Into<String>, prefix: RepoPath) -> Self {
        self.add_rule(filter_id, prefix);
        self
    }

    /// Add an excluded prefix for a filter identity.
    pub fn add_rule(&mut self, filter_id: impl Into<String>, prefix: RepoPath) {
        self.rules.entry(filter_id.into()).or_default().push(prefix);
    }

    /// Number of filter identities with at least one rule.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Returns `true` if no rules are registered.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl PathFilter for PrefixSetFilter {
    fn should_exclude(&self, path: &RepoPath, filter_id: &str, _mode: EntryMode) -> bool {
        match self.rules.get(filter_id) {
            Some(prefixes) => prefixes.iter().any(|prefix| path.starts_with(prefix)),
            None => false,
        }
    }
}
