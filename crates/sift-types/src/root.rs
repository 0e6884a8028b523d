use std::fmt;

use serde::{Deserialize, Serialize};

/// Names a root snapshot together with the filter applied to it.
///
/// The canonical form is `<underlying-root>:<filter-id>`. The underlying
/// root id must not itself contain `:`; no escaping is applied and [`split`]
/// cuts at the first colon, so everything after it (colons included) belongs
/// to the filter id. Filter identities are free to use `:` internally.
///
/// [`split`]: RootId::split
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RootId(String);

impl RootId {
    /// Wrap an already-formed root id string.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Build the canonical form from an underlying root id and a filter id.
    pub fn join(underlying: &str, filter_id: &str) -> Self {
        Self(format!("{underlying}:{filter_id}"))
    }

    /// Split at the first `:` into `(underlying root id, filter id)`.
    ///
    /// Returns `None` when the id carries no separator and therefore names
    /// no filter.
    pub fn split(&self) -> Option<(&str, &str)> {
        self.0.split_once(':')
    }

    /// The id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RootId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for RootId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for RootId {
    fn from(id: String) -> Self {
        Self(id)
    }
}
