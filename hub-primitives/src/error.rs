//! Shared error definitions for hub primitives.

use thiserror::Error;

/// Result alias used throughout the hub crates.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while manipulating hub primitive types.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
    /// The provided store-relative path could not be normalized.
    #[error("invalid virtual path `{path}`: {reason}")]
    InvalidPath {
        /// The offending path string.
        path: String,
        /// Human-readable reason for rejection.
        reason: &'static str,
    },

    /// A record name failed validation.
    #[error("invalid record name: {reason}")]
    InvalidName {
        /// Human-readable reason for rejection.
        reason: &'static str,
    },
}

impl Error {
    /// Convenience helper to construct path errors.
    #[must_use]
    pub fn invalid_path(path: impl Into<String>, reason: &'static str) -> Self {
        Self::InvalidPath {
            path: path.into(),
            reason,
        }
    }
}
