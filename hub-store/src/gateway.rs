//! Domain-facing gateway over an [`ObjectClient`].

use std::sync::Arc;

use bytes::Bytes;
use serde::{Deserialize, Serialize};
use tracing::warn;

use hub_primitives::{VirtualPath, leaf_name};

use crate::client::{ObjectClient, ObjectStream};
use crate::error::StoreResult;
use crate::pattern::wildcard_match;

/// Selects what part of a listed path a glob pattern is matched against.
///
/// The choice is per-domain configuration: flat domains match leaf names,
/// while prompt storage matches full relative paths because prompt files may
/// be nested.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PatternScope {
    /// Match against the final path segment and return leaf names.
    #[default]
    LeafName,
    /// Match against the full relative path and return full paths.
    FullPath,
}

/// Normalizes virtual paths and mediates all store I/O for one domain.
///
/// Listing and existence failures are contained here: their results only feed
/// cache population, which retries on the next cycle. Read failures propagate
/// so the repository layer can distinguish a store error from a missing item.
#[derive(Clone)]
pub struct StoreGateway {
    client: Arc<dyn ObjectClient>,
    scope: PatternScope,
}

impl StoreGateway {
    /// Creates a gateway over the supplied client with the domain's pattern
    /// scope.
    #[must_use]
    pub fn new(client: Arc<dyn ObjectClient>, scope: PatternScope) -> Self {
        Self { client, scope }
    }

    /// Returns the configured pattern scope.
    #[must_use]
    pub const fn scope(&self) -> PatternScope {
        self.scope
    }

    /// Lists entries under `prefix`, optionally filtered by a glob pattern,
    /// with the failure typed.
    ///
    /// Returned names are leaf names or full relative paths depending on the
    /// configured [`PatternScope`]. Callers that must distinguish "store
    /// unreachable" from "nothing stored" (snapshot refresh) use this form.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`](crate::StoreError) for path normalization
    /// failures and client failures.
    pub async fn try_list(
        &self,
        prefix: &str,
        pattern: Option<&str>,
    ) -> StoreResult<Vec<String>> {
        let prefix = VirtualPath::normalize(prefix)?;
        let entries = self.client.list_objects(prefix.as_str()).await?;

        Ok(entries
            .into_iter()
            .filter_map(|path| {
                let name = match self.scope {
                    PatternScope::LeafName => leaf_name(&path).to_owned(),
                    PatternScope::FullPath => path.trim_matches('/').to_owned(),
                };
                match pattern {
                    Some(pattern) if !wildcard_match(pattern, &name) => None,
                    _ => Some(name),
                }
            })
            .collect())
    }

    /// Lists entries under `prefix`, optionally filtered by a glob pattern.
    ///
    /// Any failure yields an empty sequence; the result only feeds cache
    /// population, which is free to retry on the next cycle.
    pub async fn list(&self, prefix: &str, pattern: Option<&str>) -> Vec<String> {
        match self.try_list(prefix, pattern).await {
            Ok(entries) => entries,
            Err(err) => {
                warn!(%err, prefix, "listing failed; returning no entries");
                Vec::new()
            }
        }
    }

    /// Returns whether an item exists at `path`; failures are treated as
    /// non-existence.
    pub async fn exists(&self, path: &str) -> bool {
        let path = match VirtualPath::normalize(path) {
            Ok(path) => path,
            Err(err) => {
                warn!(%err, "existence probe rejected");
                return false;
            }
        };

        match self.client.object_exists(path.as_str()).await {
            Ok(exists) => exists,
            Err(err) => {
                warn!(%err, path = %path, "existence probe failed; treating as absent");
                false
            }
        }
    }

    /// Reads the content at `path`, returning `None` when the item does not
    /// exist.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`](crate::StoreError) for path normalization
    /// failures and I/O-layer errors; the repository layer contains these.
    pub async fn read_file_content(&self, path: &str) -> StoreResult<Option<Bytes>> {
        let path = VirtualPath::normalize(path)?;
        self.client.get_object(path.as_str()).await
    }

    /// Reads the content at `path` as a stream of chunks, returning `None`
    /// when the item does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`](crate::StoreError) for path normalization
    /// failures and I/O-layer errors.
    pub async fn read_file_stream(&self, path: &str) -> StoreResult<Option<ObjectStream>> {
        let path = VirtualPath::normalize(path)?;
        self.client.get_object_stream(path.as_str()).await
    }

    /// Uploads content to `path`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::AlreadyExists`](crate::StoreError::AlreadyExists)
    /// when `overwrite` is `false` and the item is present, or any backend
    /// failure.
    pub async fn write_file_content(
        &self,
        path: &str,
        content: Bytes,
        overwrite: bool,
    ) -> StoreResult<()> {
        let path = VirtualPath::normalize(path)?;
        self.client.put_object(path.as_str(), content, overwrite).await
    }

    /// Deletes the item at `path` including any versioned snapshots; missing
    /// items are not an error.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`](crate::StoreError) for backend failures.
    pub async fn delete_file(&self, path: &str) -> StoreResult<()> {
        let path = VirtualPath::normalize(path)?;
        self.client.delete_object(path.as_str()).await
    }
}
