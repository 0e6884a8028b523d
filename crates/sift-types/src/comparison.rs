use serde::{Deserialize, Serialize};

/// Result of comparing two object identifiers.
///
/// Comparison works on identifiers alone, without fetching the objects they
/// name, so it cannot always reach a verdict. `Unknown` is an honest "prove
/// it yourself" answer, not a failure: callers that need certainty fall back
/// to fetching and diffing the objects.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ObjectComparison {
    /// The identifiers are proven to name identical content.
    Identical,
    /// The identifiers are proven to name different content.
    Different,
    /// Equality could not be decided from the identifiers alone.
    Unknown,
}

impl ObjectComparison {
    /// Returns `true` when identity was proven.
    pub fn is_identical(&self) -> bool {
        matches!(self, Self::Identical)
    }
}

impl std::fmt::Display for ObjectComparison {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Identical => write!(f, "identical"),
            Self::Different => write!(f, "different"),
            Self::Unknown => write!(f, "unknown"),
        }
    }
}
