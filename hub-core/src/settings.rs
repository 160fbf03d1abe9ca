//! Typed configuration for domains and cache refresh.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use hub_store::PatternScope;

use crate::error::{HubError, HubResult};

/// Per-domain storage layout: root prefix, file extension, and listing scope.
///
/// Constructed explicitly and passed into repository construction; there are
/// no ambient configuration lookups.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DomainSettings {
    #[serde(default)]
    root_prefix: String,
    extension: String,
    #[serde(default)]
    scope: PatternScope,
}

impl DomainSettings {
    /// Layout for the agent domain: flat `.json` files, leaf-name matching.
    #[must_use]
    pub fn agents() -> Self {
        Self {
            root_prefix: String::new(),
            extension: ".json".to_owned(),
            scope: PatternScope::LeafName,
        }
    }

    /// Layout for the data-source domain: flat `.json` files, leaf-name
    /// matching.
    #[must_use]
    pub fn data_sources() -> Self {
        Self::agents()
    }

    /// Layout for the prompt domain: possibly nested `.txt` files, full-path
    /// matching.
    #[must_use]
    pub fn prompts() -> Self {
        Self {
            root_prefix: String::new(),
            extension: ".txt".to_owned(),
            scope: PatternScope::FullPath,
        }
    }

    /// Scopes the domain under a root prefix inside a shared store.
    #[must_use]
    pub fn with_root_prefix(mut self, root_prefix: impl Into<String>) -> Self {
        self.root_prefix = root_prefix.into();
        self
    }

    /// Returns the domain root prefix (possibly empty).
    #[must_use]
    pub fn root_prefix(&self) -> &str {
        &self.root_prefix
    }

    /// Returns the domain file extension, including the leading dot.
    #[must_use]
    pub fn extension(&self) -> &str {
        &self.extension
    }

    /// Returns the listing scope for this domain.
    #[must_use]
    pub const fn scope(&self) -> PatternScope {
        self.scope
    }

    /// Composes the store path for a record name: root prefix plus
    /// `name + extension`.
    #[must_use]
    pub fn file_path(&self, name: &str) -> String {
        self.entry_path(&format!("{name}{}", self.extension))
    }

    /// Composes the store path for an already-suffixed entry name.
    #[must_use]
    pub fn entry_path(&self, entry: &str) -> String {
        if self.root_prefix.is_empty() {
            entry.to_owned()
        } else {
            format!("{}/{entry}", self.root_prefix)
        }
    }

    /// Strips the root prefix from a full listed path, when present.
    #[must_use]
    pub fn relative_entry<'a>(&self, path: &'a str) -> &'a str {
        if self.root_prefix.is_empty() {
            path
        } else {
            path.strip_prefix(&self.root_prefix)
                .map_or(path, |rest| rest.trim_start_matches('/'))
        }
    }
}

/// Cache refresh pacing for one hub instance.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RefreshConfig {
    refresh_interval: Duration,
}

impl RefreshConfig {
    /// Creates a configuration with the supplied refresh interval.
    #[must_use]
    pub const fn new(refresh_interval: Duration) -> Self {
        Self { refresh_interval }
    }

    /// Returns the refresh interval.
    #[must_use]
    pub const fn refresh_interval(self) -> Duration {
        self.refresh_interval
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`HubError::InvalidConfig`] when the interval is zero.
    pub fn validate(self) -> HubResult<()> {
        if self.refresh_interval.is_zero() {
            return Err(HubError::InvalidConfig(
                "refresh interval must be greater than zero",
            ));
        }
        Ok(())
    }
}

impl Default for RefreshConfig {
    fn default() -> Self {
        Self {
            refresh_interval: Duration::from_secs(300),
        }
    }
}
