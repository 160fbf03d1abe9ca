//! Hierarchical prompt repository.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, warn};

use hub_primitives::PromptRecord;
use hub_store::{ObjectClient, StoreGateway};

use crate::error::{HubError, HubResult};
use crate::repository::MetadataRepository;
use crate::settings::DomainSettings;

/// Repository composing prompt records from prefix/suffix text pairs.
///
/// Prompt names are dotted paths (`prompts.anomaly.default`). Resolution
/// walks candidate paths from most to least specific, so a tenant can shadow
/// a shared prompt by storing a deeper copy.
pub struct PromptRepository {
    gateway: StoreGateway,
    settings: DomainSettings,
}

impl PromptRepository {
    /// Creates a repository over the supplied client with the domain's
    /// layout settings.
    #[must_use]
    pub fn new(client: Arc<dyn ObjectClient>, settings: DomainSettings) -> Self {
        Self {
            gateway: StoreGateway::new(client, settings.scope()),
            settings,
        }
    }

    /// Returns the domain settings this repository was built with.
    #[must_use]
    pub fn settings(&self) -> &DomainSettings {
        &self.settings
    }

    /// Resolves a dotted prompt name to a record.
    ///
    /// For `a.b.c` the prefix file is probed at `a/b/c.txt`, then `b/c.txt`,
    /// then `c.txt`; the first hit wins. The `_suffix` sibling at the winning
    /// level is optional and read independently. The returned record carries
    /// the requested name verbatim.
    ///
    /// # Errors
    ///
    /// Returns [`HubError::PromptNotFound`] naming the requested identifier
    /// when no candidate path yields a prefix file. Unlike routine cache
    /// staleness, this absence is actionable misconfiguration.
    pub async fn resolve(&self, name: &str) -> HubResult<PromptRecord> {
        let segments: Vec<&str> = name.split('.').filter(|s| !s.is_empty()).collect();
        if segments.is_empty() {
            return Err(HubError::prompt_not_found(name));
        }

        for start in 0..segments.len() {
            let relative = segments[start..].join("/");
            let Some(prefix) = self.read_text(&relative).await else {
                continue;
            };

            let mut record = PromptRecord::new(name, prefix);
            if let Some(suffix) = self.read_text(&format!("{relative}_suffix")).await {
                record = record.with_suffix(suffix);
            }
            return Ok(record);
        }

        Err(HubError::prompt_not_found(name))
    }

    /// Reads the text file for a relative stem, containing every failure.
    async fn read_text(&self, stem: &str) -> Option<String> {
        let path = self
            .settings
            .entry_path(&format!("{stem}{}", self.settings.extension()));
        let content = match self.gateway.read_file_content(&path).await {
            Ok(Some(content)) => content,
            Ok(None) => return None,
            Err(err) => {
                warn!(%err, path, "prompt read failed; treating as absent");
                return None;
            }
        };
        match String::from_utf8(content.to_vec()) {
            Ok(text) => Some(text),
            Err(err) => {
                warn!(%err, path, "prompt file is not valid utf-8; skipping");
                None
            }
        }
    }

    fn suffix_marker(&self) -> String {
        format!("_suffix{}", self.settings.extension())
    }

    /// Derives the dotted name for a listed prompt path.
    fn dotted_name(&self, path: &str) -> Option<String> {
        let relative = self.settings.relative_entry(path);
        let stem = relative.strip_suffix(self.settings.extension())?;
        Some(stem.replace('/', "."))
    }

    async fn collect(&self, entries: Vec<String>) -> Vec<PromptRecord> {
        let suffix_marker = self.suffix_marker();
        let mut records = Vec::new();
        for entry in entries {
            if entry.ends_with(&suffix_marker) {
                continue;
            }
            let Some(name) = self.dotted_name(&entry) else {
                continue;
            };
            match self.resolve(&name).await {
                Ok(record) => records.push(record),
                Err(err) => warn!(%err, entry, "listed prompt failed to resolve; skipping"),
            }
        }
        records
    }
}

#[async_trait]
impl MetadataRepository for PromptRepository {
    type Record = PromptRecord;

    async fn get_metadata_values(
        &self,
        name_patterns: Option<&[String]>,
    ) -> HubResult<Vec<PromptRecord>> {
        let extension_glob = format!("*{}", self.settings.extension());
        match name_patterns {
            None | Some([]) => {
                let entries = self
                    .gateway
                    .try_list(self.settings.root_prefix(), Some(&extension_glob))
                    .await?;
                Ok(self.collect(entries).await)
            }
            Some(patterns) => {
                let mut records = Vec::new();
                for pattern in patterns {
                    if pattern.contains(['*', '?']) {
                        let entries = self
                            .gateway
                            .try_list(self.settings.root_prefix(), Some(pattern))
                            .await?;
                        records.extend(self.collect(entries).await);
                    } else {
                        match self.resolve(pattern).await {
                            Ok(record) => records.push(record),
                            Err(err) => {
                                debug!(%err, name = pattern, "requested prompt absent from batch");
                            }
                        }
                    }
                }
                Ok(records)
            }
        }
    }

    async fn get_metadata_by_name(&self, name: &str) -> Option<PromptRecord> {
        match self.resolve(name).await {
            Ok(record) => Some(record),
            Err(err) => {
                debug!(%err, name, "prompt lookup failed");
                None
            }
        }
    }
}
