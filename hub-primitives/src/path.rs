//! Store-relative virtual path normalization.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// A normalized, store-relative path.
///
/// Normalization strips leading and trailing separators, collapses empty
/// segments, and rejects traversal segments so a path can never escape the
/// domain's root prefix. The empty path is valid and addresses the root.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VirtualPath(String);

impl VirtualPath {
    /// Normalizes a raw path string.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidPath`] when the path contains `.` or `..`
    /// segments.
    pub fn normalize(raw: &str) -> Result<Self> {
        let mut segments = Vec::new();
        for segment in raw.split('/') {
            match segment {
                "" => {}
                "." | ".." => {
                    return Err(Error::invalid_path(raw, "traversal segments are not allowed"));
                }
                other => segments.push(other),
            }
        }
        Ok(Self(segments.join("/")))
    }

    /// Returns the normalized path string, without leading or trailing separators.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns `true` when the path addresses the store root.
    #[must_use]
    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the final path segment, or the empty string for the root.
    #[must_use]
    pub fn leaf(&self) -> &str {
        self.0.rsplit('/').next().unwrap_or_default()
    }

    /// Appends a child segment, normalizing the result.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidPath`] when the child contains traversal
    /// segments.
    pub fn join(&self, child: &str) -> Result<Self> {
        if self.is_root() {
            Self::normalize(child)
        } else {
            Self::normalize(&format!("{}/{child}", self.0))
        }
    }
}

impl fmt::Display for VirtualPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Returns the leaf segment of a raw (not necessarily normalized) path.
#[must_use]
pub fn leaf_name(path: &str) -> &str {
    path.trim_end_matches('/')
        .rsplit('/')
        .next()
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_separators() {
        let path = VirtualPath::normalize("/agents/default.json/").unwrap();
        assert_eq!(path.as_str(), "agents/default.json");
        assert_eq!(path.leaf(), "default.json");
    }

    #[test]
    fn collapses_empty_segments() {
        let path = VirtualPath::normalize("prompts//anomaly///default.txt").unwrap();
        assert_eq!(path.as_str(), "prompts/anomaly/default.txt");
    }

    #[test]
    fn empty_path_is_root() {
        let path = VirtualPath::normalize("").unwrap();
        assert!(path.is_root());
        assert_eq!(path.as_str(), "");
    }

    #[test]
    fn rejects_traversal() {
        let err = VirtualPath::normalize("agents/../secrets").unwrap_err();
        assert!(matches!(err, Error::InvalidPath { .. }));
        assert!(VirtualPath::normalize("./agents").is_err());
    }

    #[test]
    fn joins_children() {
        let root = VirtualPath::normalize("").unwrap();
        assert_eq!(root.join("default.json").unwrap().as_str(), "default.json");

        let nested = VirtualPath::normalize("prompts/anomaly").unwrap();
        assert_eq!(
            nested.join("default.txt").unwrap().as_str(),
            "prompts/anomaly/default.txt"
        );
    }
}
