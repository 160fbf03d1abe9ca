//! Error types for repositories and hubs.

use thiserror::Error;

use hub_store::StoreError;

/// Result alias for hub operations.
pub type HubResult<T> = Result<T, HubError>;

/// Errors surfaced by repositories and hubs.
///
/// Per-item read and parse failures never appear here: they are contained at
/// the repository boundary (logged and skipped, or mapped to `None`). The
/// variants below are the failures a caller can act on.
#[derive(Debug, Error)]
pub enum HubError {
    /// The store could not be listed or read at all this cycle.
    #[error(transparent)]
    Store {
        /// Source store failure.
        #[from]
        source: StoreError,
    },

    /// Hierarchical prompt resolution exhausted every candidate path without
    /// finding a prefix file.
    #[error("Prompt '{name}' not found.")]
    PromptNotFound {
        /// The requested dotted identifier, verbatim.
        name: String,
    },

    /// Hub or domain configuration was invalid.
    #[error("invalid hub configuration: {0}")]
    InvalidConfig(&'static str),
}

impl HubError {
    /// Convenience constructor for prompt resolution failures.
    #[must_use]
    pub fn prompt_not_found(name: impl Into<String>) -> Self {
        Self::PromptNotFound { name: name.into() }
    }
}
