//! Error types for store operations.

use thiserror::Error;

/// Result alias used by store components.
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors surfaced by object store backends and the gateway.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The backend rejected the caller's credentials.
    #[error("store authorization failed: {reason}")]
    Unauthorized {
        /// Human-readable context provided by the backend.
        reason: String,
    },

    /// Transport-level failure (network, protocol, timeout).
    #[error("store transport error: {reason}")]
    Transport {
        /// Human-readable context about the failure.
        reason: String,
    },

    /// Underlying I/O failure from a filesystem-backed store.
    #[error("store i/o error: {source}")]
    Io {
        /// Source [`std::io::Error`].
        #[from]
        source: std::io::Error,
    },

    /// An upload with `overwrite = false` targeted an existing object.
    #[error("object already exists at `{path}`")]
    AlreadyExists {
        /// Path of the conflicting object.
        path: String,
    },

    /// The supplied path failed normalization.
    #[error(transparent)]
    Path {
        /// Source normalization error.
        #[from]
        source: hub_primitives::Error,
    },
}

impl StoreError {
    /// Convenience constructor for authorization failures.
    #[must_use]
    pub fn unauthorized(reason: impl Into<String>) -> Self {
        Self::Unauthorized {
            reason: reason.into(),
        }
    }

    /// Convenience constructor for transport failures.
    #[must_use]
    pub fn transport(reason: impl Into<String>) -> Self {
        Self::Transport {
            reason: reason.into(),
        }
    }
}
