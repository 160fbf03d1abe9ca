//! Repositories: raw bytes to validated records, one domain at a time.

use std::collections::HashSet;
use std::marker::PhantomData;
use std::sync::Arc;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use hub_primitives::{AgentRecord, DataSourceRecord, MetadataRecord};
use hub_store::{ObjectClient, PatternScope, StoreGateway};

use crate::error::HubResult;
use crate::settings::DomainSettings;

/// Loads and validates records for one configuration domain.
///
/// Per-item read and parse failures are contained here: a single bad file
/// never aborts a batch, and by-name lookups never raise for missing or
/// malformed data.
#[async_trait]
pub trait MetadataRepository: Send + Sync {
    /// The validated record type produced by this domain.
    type Record: MetadataRecord + Clone + Send + Sync + 'static;

    /// Loads every record matching the supplied name patterns, or all records
    /// under the domain root when no patterns are given. Order follows
    /// listing order; only successfully validated records are returned.
    ///
    /// # Errors
    ///
    /// Returns [`HubError::Store`](crate::HubError::Store) only when the
    /// listing itself fails, so the hub can retain its prior snapshot rather
    /// than install a falsely-empty one.
    async fn get_metadata_values(
        &self,
        name_patterns: Option<&[String]>,
    ) -> HubResult<Vec<Self::Record>>;

    /// Loads a single record by name; `None` for missing or malformed data.
    async fn get_metadata_by_name(&self, name: &str) -> Option<Self::Record>;
}

/// Repository for flat domains storing one JSON document per record.
pub struct JsonRepository<R> {
    gateway: StoreGateway,
    settings: DomainSettings,
    _record: PhantomData<fn() -> R>,
}

/// Repository over agent definition files.
pub type AgentRepository = JsonRepository<AgentRecord>;

/// Repository over data-source profile files.
pub type DataSourceRepository = JsonRepository<DataSourceRecord>;

impl<R> JsonRepository<R>
where
    R: DeserializeOwned + MetadataRecord + Clone + Send + Sync + 'static,
{
    /// Creates a repository over the supplied client with the domain's
    /// layout settings.
    #[must_use]
    pub fn new(client: Arc<dyn ObjectClient>, settings: DomainSettings) -> Self {
        Self {
            gateway: StoreGateway::new(client, settings.scope()),
            settings,
            _record: PhantomData,
        }
    }

    /// Returns the domain settings this repository was built with.
    #[must_use]
    pub fn settings(&self) -> &DomainSettings {
        &self.settings
    }

    fn entry_to_path(&self, entry: &str) -> String {
        match self.settings.scope() {
            PatternScope::LeafName => self.settings.entry_path(entry),
            PatternScope::FullPath => entry.to_owned(),
        }
    }

    async fn load(&self, path: &str) -> Option<R> {
        let content = match self.gateway.read_file_content(path).await {
            Ok(Some(content)) => content,
            Ok(None) => {
                debug!(path, "item absent");
                return None;
            }
            Err(err) => {
                warn!(%err, path, "read failed; skipping item");
                return None;
            }
        };

        match serde_json::from_slice::<R>(&content) {
            Ok(record) => Some(record),
            Err(err) => {
                warn!(%err, path, "malformed record skipped");
                None
            }
        }
    }
}

#[async_trait]
impl<R> MetadataRepository for JsonRepository<R>
where
    R: DeserializeOwned + MetadataRecord + Clone + Send + Sync + 'static,
{
    type Record = R;

    async fn get_metadata_values(&self, name_patterns: Option<&[String]>) -> HubResult<Vec<R>> {
        let mut entries = Vec::new();
        match name_patterns {
            None | Some([]) => {
                // The gateway requires a concrete, possibly-empty prefix.
                entries = self
                    .gateway
                    .try_list(self.settings.root_prefix(), None)
                    .await?;
            }
            Some(patterns) => {
                for pattern in patterns {
                    if pattern.contains(['*', '?']) {
                        entries.extend(
                            self.gateway
                                .try_list(self.settings.root_prefix(), Some(pattern))
                                .await?,
                        );
                    } else {
                        // An explicit name needs no listing round trip.
                        entries.push(format!("{pattern}{}", self.settings.extension()));
                    }
                }
            }
        }

        let mut seen = HashSet::new();
        let mut records = Vec::new();
        for entry in entries {
            if !seen.insert(entry.clone()) {
                continue;
            }
            let path = self.entry_to_path(&entry);
            if let Some(record) = self.load(&path).await {
                records.push(record);
            }
        }
        Ok(records)
    }

    async fn get_metadata_by_name(&self, name: &str) -> Option<R> {
        let path = self.settings.file_path(name);
        if !self.gateway.exists(&path).await {
            return None;
        }
        self.load(&path).await
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use bytes::Bytes;
    use hub_store::{MemoryObjectStore, StoreError, StoreResult};

    use super::*;

    struct CountingClient {
        inner: MemoryObjectStore,
        reads: AtomicUsize,
        lists: AtomicUsize,
    }

    impl CountingClient {
        fn new(objects: &[(&'static str, &'static str)]) -> Self {
            Self {
                inner: MemoryObjectStore::with_objects(objects.iter().copied()),
                reads: AtomicUsize::new(0),
                lists: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl ObjectClient for CountingClient {
        async fn list_objects(&self, prefix: &str) -> StoreResult<Vec<String>> {
            self.lists.fetch_add(1, Ordering::SeqCst);
            self.inner.list_objects(prefix).await
        }

        async fn object_exists(&self, path: &str) -> StoreResult<bool> {
            self.inner.object_exists(path).await
        }

        async fn get_object(&self, path: &str) -> StoreResult<Option<Bytes>> {
            self.reads.fetch_add(1, Ordering::SeqCst);
            self.inner.get_object(path).await
        }

        async fn put_object(&self, path: &str, content: Bytes, overwrite: bool) -> StoreResult<()> {
            self.inner.put_object(path, content, overwrite).await
        }

        async fn delete_object(&self, path: &str) -> StoreResult<()> {
            self.inner.delete_object(path).await
        }
    }

    struct UnreachableClient;

    #[async_trait]
    impl ObjectClient for UnreachableClient {
        async fn list_objects(&self, _prefix: &str) -> StoreResult<Vec<String>> {
            Err(StoreError::unauthorized("credential expired"))
        }

        async fn object_exists(&self, _path: &str) -> StoreResult<bool> {
            Err(StoreError::transport("connection reset"))
        }

        async fn get_object(&self, _path: &str) -> StoreResult<Option<Bytes>> {
            Err(StoreError::transport("connection reset"))
        }

        async fn put_object(
            &self,
            _path: &str,
            _content: Bytes,
            _overwrite: bool,
        ) -> StoreResult<()> {
            Err(StoreError::transport("connection reset"))
        }

        async fn delete_object(&self, _path: &str) -> StoreResult<()> {
            Err(StoreError::transport("connection reset"))
        }
    }

    const VALID_AGENT: &str =
        r#"{"name": "AnomalyAgent", "description": "Responds to anomalies", "type": "sql"}"#;
    const VALID_DEFAULT: &str =
        r#"{"name": "Default", "description": "Default Q/A agent", "type": "conversational"}"#;

    #[tokio::test]
    async fn loads_all_records_under_root() {
        let client = Arc::new(CountingClient::new(&[
            ("AnomalyAgent.json", VALID_AGENT),
            ("Default.json", VALID_DEFAULT),
        ]));
        let repository = AgentRepository::new(client, DomainSettings::agents());

        let records = repository.get_metadata_values(None).await.unwrap();
        assert_eq!(records.len(), 2);
    }

    #[tokio::test]
    async fn malformed_records_are_skipped_not_fatal() {
        let client = Arc::new(CountingClient::new(&[
            ("good.json", VALID_AGENT),
            ("bad.json", r#"{"name": "NoType"}"#),
            ("worse.json", "not json at all"),
        ]));
        let repository = AgentRepository::new(client, DomainSettings::agents());

        let records = repository.get_metadata_values(None).await.unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].name(), "AnomalyAgent");
    }

    #[tokio::test]
    async fn wildcard_patterns_list_and_filter() {
        let client = Arc::new(CountingClient::new(&[
            ("AnomalyAgent.json", VALID_AGENT),
            ("Default.json", VALID_DEFAULT),
        ]));
        let repository = AgentRepository::new(Arc::clone(&client) as Arc<dyn ObjectClient>, DomainSettings::agents());

        let patterns = vec!["Anomaly*".to_owned()];
        let records = repository
            .get_metadata_values(Some(&patterns))
            .await
            .unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].name(), "AnomalyAgent");
        assert_eq!(client.lists.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn explicit_names_skip_the_listing() {
        let client = Arc::new(CountingClient::new(&[("Default.json", VALID_DEFAULT)]));
        let repository = AgentRepository::new(Arc::clone(&client) as Arc<dyn ObjectClient>, DomainSettings::agents());

        let patterns = vec!["Default".to_owned()];
        let records = repository
            .get_metadata_values(Some(&patterns))
            .await
            .unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(client.lists.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn listing_failure_is_typed() {
        let repository = AgentRepository::new(Arc::new(UnreachableClient), DomainSettings::agents());
        assert!(repository.get_metadata_values(None).await.is_err());
    }

    #[tokio::test]
    async fn by_name_probes_existence_before_reading() {
        let client = Arc::new(CountingClient::new(&[("Default.json", VALID_DEFAULT)]));
        let repository = AgentRepository::new(Arc::clone(&client) as Arc<dyn ObjectClient>, DomainSettings::agents());

        let record = repository.get_metadata_by_name("Default").await.unwrap();
        assert_eq!(record.name(), "Default");
        assert_eq!(client.reads.load(Ordering::SeqCst), 1);

        assert!(repository.get_metadata_by_name("Anomaly").await.is_none());
        // The miss issued no additional read, only an existence probe.
        assert_eq!(client.reads.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn by_name_contains_store_errors() {
        let repository = AgentRepository::new(Arc::new(UnreachableClient), DomainSettings::agents());
        assert!(repository.get_metadata_by_name("Default").await.is_none());
    }

    #[tokio::test]
    async fn data_source_records_deserialize_by_discriminator() {
        let sql = r#"{"name": "SQL", "description": "Corporate SQL DB", "underlying_implementation": "sql", "dialect": "mssql"}"#;
        let client = Arc::new(CountingClient::new(&[("ds-sql.json", sql)]));
        let repository = DataSourceRepository::new(client, DomainSettings::data_sources());

        let record = repository.get_metadata_by_name("ds-sql").await.unwrap();
        assert!(matches!(record, DataSourceRecord::Sql { .. }));
    }
}
