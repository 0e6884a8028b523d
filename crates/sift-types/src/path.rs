use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::TypeError;

/// Canonical repository-relative path.
///
/// A `RepoPath` is a `/`-separated sequence of components; the repository
/// root is the empty path. Canonical form bans leading, trailing, and
/// doubled separators as well as `.`, `..`, and NUL bytes, so two references
/// to the same location always render to the same string and identifiers
/// built from paths stay deterministic.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct RepoPath(String);

impl RepoPath {
    /// The repository root (the empty path).
    pub fn root() -> Self {
        Self(String::new())
    }

    /// Parse a path, validating every component.
    pub fn new(path: impl Into<String>) -> Result<Self, TypeError> {
        let path = path.into();
        if path.is_empty() {
            return Ok(Self(path));
        }
        for component in path.split('/') {
            validate_component(component)?;
        }
        Ok(Self(path))
    }

    /// Extend this path by one component.
    pub fn join(&self, name: &str) -> Result<Self, TypeError> {
        if name.contains('/') {
            return Err(TypeError::InvalidPath(format!(
                "component {name:?} contains a separator"
            )));
        }
        validate_component(name)?;
        if self.is_root() {
            Ok(Self(name.to_string()))
        } else {
            Ok(Self(format!("{}/{}", self.0, name)))
        }
    }

    /// The path as a string slice. The root renders as `""`.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns `true` for the repository root.
    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over the path's components, shallowest first.
    pub fn components(&self) -> impl Iterator<Item = &str> {
        self.0.split('/').filter(|c| !c.is_empty())
    }

    /// Returns `true` if `prefix` covers this path on component boundaries.
    ///
    /// Every path is covered by the root. A non-root prefix covers itself
    /// and everything below it, so `foo` covers `foo` and `foo/bar` but not
    /// `foobar`.
    pub fn starts_with(&self, prefix: &RepoPath) -> bool {
        if prefix.is_root() {
            return true;
        }
        match self.0.strip_prefix(prefix.as_str()) {
            Some(rest) => rest.is_empty() || rest.starts_with('/'),
            None => false,
        }
    }
}

fn validate_component(name: &str) -> Result<(), TypeError> {
    if name.is_empty() {
        return Err(TypeError::InvalidPath(
            "empty path component".to_string(),
        ));
    }
    if name == "." || name == ".." {
        return Err(TypeError::InvalidPath(format!(
            "relative component {name:?} not allowed"
        )));
    }
    if name.contains('\0') {
        return Err(TypeError::InvalidPath(
            "NUL byte in path component".to_string(),
        ));
    }
    Ok(())
}

impl fmt::Display for RepoPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<&str> for RepoPath {
    type Error = TypeError;

    fn try_from(path: &str) -> Result<Self, Self::Error> {
        Self::new(path)
    }
}

impl TryFrom<String> for RepoPath {
    type Error = TypeError;

    fn try_from(path: String) -> Result<Self, Self::Error> {
        Self::new(path)
    }
}

impl From<RepoPath> for String {
    fn from(path: RepoPath) -> Self {
        path.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn path(s: &str) -> RepoPath {
        RepoPath::new(s).unwrap()
    }

    #[test]
    fn root_is_empty() {
        let root = RepoPath::root();
        assert!(root.is_root());
        assert_eq!(root.as_str(), "");
        assert_eq!(root.components().count(), 0);
        assert_eq!(root, RepoPath::new("").unwrap());
    }

    #[test]
    fn accepts_nested_paths() {
        let p = path("dir1/sub/file.txt");
        assert!(!p.is_root());
        let components: Vec<_> = p.components().collect();
        assert_eq!(components, vec!["dir1", "sub", "file.txt"]);
    }

    #[test]
    fn rejects_malformed_paths() {
        for bad in ["/abs", "trailing/", "a//b", ".", "..", "a/../b", "a/./b"] {
            assert!(
                matches!(RepoPath::new(bad), Err(TypeError::InvalidPath(_))),
                "expected {bad:?} to be rejected"
            );
        }
        assert!(matches!(
            RepoPath::new("nul\0byte"),
            Err(TypeError::InvalidPath(_))
        ));
    }

    #[test]
    fn join_from_root_and_nested() {
        let root = RepoPath::root();
        let dir = root.join("dir1").unwrap();
        assert_eq!(dir.as_str(), "dir1");
        let file = dir.join("foo").unwrap();
        assert_eq!(file.as_str(), "dir1/foo");
    }

    #[test]
    fn join_rejects_invalid_components() {
        let root = RepoPath::root();
        assert!(root.join("a/b").is_err());
        assert!(root.join("").is_err());
        assert!(root.join("..").is_err());
    }

    #[test]
    fn starts_with_respects_component_boundaries() {
        let foo = path("foo");
        assert!(path("foo").starts_with(&foo));
        assert!(path("foo/bar").starts_with(&foo));
        assert!(!path("foobar").starts_with(&foo));
        assert!(!path("bar").starts_with(&foo));
        assert!(!RepoPath::root().starts_with(&foo));
    }

    #[test]
    fn root_covers_everything() {
        let root = RepoPath::root();
        assert!(path("a").starts_with(&root));
        assert!(path("a/b/c").starts_with(&root));
        assert!(RepoPath::root().starts_with(&root));
    }

    #[test]
    fn display_matches_as_str() {
        let p = path("dir1/foo");
        assert_eq!(format!("{p}"), "dir1/foo");
    }

    #[test]
    fn serde_roundtrips_as_plain_string() {
        let p = path("dir1/foo");
        let json = serde_json::to_string(&p).unwrap();
        assert_eq!(json, "\"dir1/foo\"");
        let parsed: RepoPath = serde_json::from_str(&json).unwrap();
        assert_eq!(p, parsed);
    }

    #[test]
    fn serde_rejects_non_canonical_strings() {
        assert!(serde_json::from_str::<RepoPath>("\"/abs\"").is_err());
        assert!(serde_json::from_str::<RepoPath>("\"a/../b\"").is_err());
    }
}
