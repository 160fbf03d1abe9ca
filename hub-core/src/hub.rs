//! Snapshot-cached facade over a repository and resolver.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Instant;

use chrono::{DateTime, Utc};
use tokio::sync::{Mutex, RwLock};
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info, warn};

use hub_primitives::{AgentRecord, DataSourceRecord, MetadataRecord, RecordDescriptor};

use crate::error::HubResult;
use crate::prompts::PromptRepository;
use crate::repository::{JsonRepository, MetadataRepository};
use crate::resolver::{FirstMatch, NameFilter, RequestContext, Resolver};
use crate::settings::RefreshConfig;

/// An immutable, fully-populated cache state.
///
/// Snapshots are only ever replaced wholesale: readers hold an `Arc` to one
/// and can never observe a half-populated cache.
#[derive(Debug)]
pub struct Snapshot<R> {
    records: Vec<R>,
    refreshed_at: DateTime<Utc>,
    taken_at: Instant,
}

impl<R> Snapshot<R> {
    fn new(records: Vec<R>) -> Self {
        Self {
            records,
            refreshed_at: Utc::now(),
            taken_at: Instant::now(),
        }
    }

    /// Returns the cached records in listing order.
    #[must_use]
    pub fn records(&self) -> &[R] {
        &self.records
    }

    /// Returns when this snapshot was built.
    #[must_use]
    pub const fn refreshed_at(&self) -> DateTime<Utc> {
        self.refreshed_at
    }

    fn is_stale(&self, config: RefreshConfig) -> bool {
        self.taken_at.elapsed() > config.refresh_interval()
    }
}

/// The facade used by collaborators: owns a snapshot cache of resolved
/// records, refreshes it on a fixed interval or on demand, and serves
/// `list()` and `resolve()` without blocking on in-flight refreshes.
pub struct MetadataHub<P, S>
where
    P: MetadataRepository,
    S: Resolver<P::Record>,
{
    repository: P,
    resolver: S,
    config: RefreshConfig,
    snapshot: RwLock<Option<Arc<Snapshot<P::Record>>>>,
    refresh_lock: Mutex<()>,
}

/// Hub over agent definitions with first-match narrowing.
pub type AgentHub = MetadataHub<JsonRepository<AgentRecord>, FirstMatch>;

/// Hub over data-source profiles narrowed by requested names.
pub type DataSourceHub = MetadataHub<JsonRepository<DataSourceRecord>, NameFilter>;

/// Hub over prompt records with first-match narrowing.
pub type PromptHub = MetadataHub<PromptRepository, FirstMatch>;

impl<P, S> MetadataHub<P, S>
where
    P: MetadataRepository,
    S: Resolver<P::Record>,
{
    /// Creates a hub over the supplied repository and resolver strategy.
    ///
    /// # Errors
    ///
    /// Returns [`HubError::InvalidConfig`](crate::HubError::InvalidConfig)
    /// when the refresh configuration is invalid.
    pub fn new(repository: P, resolver: S, config: RefreshConfig) -> HubResult<Self> {
        config.validate()?;
        Ok(Self {
            repository,
            resolver,
            config,
            snapshot: RwLock::new(None),
            refresh_lock: Mutex::new(()),
        })
    }

    /// Returns the refresh configuration.
    #[must_use]
    pub const fn config(&self) -> RefreshConfig {
        self.config
    }

    /// Returns a reference to the underlying repository.
    #[must_use]
    pub fn repository(&self) -> &P {
        &self.repository
    }

    /// Lists lightweight descriptors from the current snapshot, sorted by
    /// name for determinism. Triggers the synchronous initial load when the
    /// hub is uninitialized.
    pub async fn list(&self) -> Vec<RecordDescriptor> {
        let snapshot = self.current_snapshot().await;
        let mut descriptors: Vec<RecordDescriptor> = snapshot
            .records()
            .iter()
            .map(MetadataRecord::descriptor)
            .collect();
        descriptors.sort_by(|a, b| a.name.cmp(&b.name));
        descriptors
    }

    /// Narrows the current snapshot to the records applicable to `request`.
    ///
    /// Never forces a refresh; configuration changes propagate within one
    /// refresh interval.
    pub async fn resolve(&self, request: &RequestContext) -> Vec<P::Record> {
        let snapshot = self.current_snapshot().await;
        self.resolver.resolve(request, snapshot.records())
    }

    /// Returns when the current snapshot was built, if one exists.
    pub async fn refreshed_at(&self) -> Option<DateTime<Utc>> {
        self.snapshot
            .read()
            .await
            .as_ref()
            .map(|snapshot| snapshot.refreshed_at())
    }

    /// Returns `true` when no snapshot exists or the current one has aged
    /// past the refresh interval.
    pub async fn is_stale(&self) -> bool {
        self.snapshot
            .read()
            .await
            .as_ref()
            .is_none_or(|snapshot| snapshot.is_stale(self.config))
    }

    /// Rebuilds the snapshot from a full repository load.
    ///
    /// A refresh already in flight makes this call a no-op (`Ok(false)`);
    /// refreshes coalesce rather than queue. On wholesale failure the prior
    /// snapshot is retained and the error returned; readers keep observing
    /// the prior data until a later cycle succeeds.
    ///
    /// # Errors
    ///
    /// Returns [`HubError::Store`](crate::HubError::Store) when the backing
    /// listing fails outright.
    pub async fn refresh(&self) -> HubResult<bool> {
        let Ok(_guard) = self.refresh_lock.try_lock() else {
            debug!("refresh already in flight; coalescing");
            return Ok(false);
        };
        self.build_and_install().await?;
        Ok(true)
    }

    async fn current_snapshot(&self) -> Arc<Snapshot<P::Record>> {
        if let Some(snapshot) = self.snapshot.read().await.clone() {
            return snapshot;
        }

        // Synchronous initial load; concurrent first callers queue on the
        // refresh lock and then all observe the snapshot the winner built.
        let _guard = self.refresh_lock.lock().await;
        if let Some(snapshot) = self.snapshot.read().await.clone() {
            return snapshot;
        }

        match self.build_and_install().await {
            Ok(snapshot) => snapshot,
            Err(err) => {
                warn!(%err, "initial load failed; serving empty snapshot this call");
                // Not installed, so the next caller retries the load.
                Arc::new(Snapshot::new(Vec::new()))
            }
        }
    }

    async fn build_and_install(&self) -> HubResult<Arc<Snapshot<P::Record>>> {
        match self.repository.get_metadata_values(None).await {
            Ok(records) => {
                let snapshot = Arc::new(Snapshot::new(records));
                *self.snapshot.write().await = Some(Arc::clone(&snapshot));
                info!(records = snapshot.records().len(), "snapshot installed");
                Ok(snapshot)
            }
            Err(err) => {
                warn!(%err, "refresh failed; retaining prior snapshot");
                Err(err)
            }
        }
    }
}

impl<P, S> MetadataHub<P, S>
where
    P: MetadataRepository + 'static,
    S: Resolver<P::Record> + 'static,
{
    /// Spawns the background refresh loop for a shared hub.
    ///
    /// The first tick fires immediately to populate the cache proactively;
    /// subsequent ticks follow the configured interval. Failed cycles are
    /// logged and retried on the next tick. The returned handle stops the
    /// loop without side effects; an abandoned refresh leaves no partial
    /// cache writes behind.
    #[must_use]
    pub fn spawn_refresh_loop(hub: Arc<Self>) -> RefreshTask {
        let shutdown = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&shutdown);

        let handle = tokio::spawn(async move {
            let mut interval = tokio::time::interval(hub.config.refresh_interval());
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                interval.tick().await;
                if flag.load(Ordering::Acquire) {
                    break;
                }
                match hub.refresh().await {
                    Ok(true) => debug!("scheduled refresh completed"),
                    Ok(false) => debug!("scheduled refresh coalesced"),
                    Err(err) => warn!(%err, "scheduled refresh failed; retrying next interval"),
                }
            }
        });

        RefreshTask { handle, shutdown }
    }
}

/// Handle controlling a hub's background refresh loop.
#[derive(Debug)]
pub struct RefreshTask {
    handle: JoinHandle<()>,
    shutdown: Arc<AtomicBool>,
}

impl RefreshTask {
    /// Stops the loop; any in-flight refresh is abandoned without partial
    /// cache writes.
    pub fn stop(&self) {
        self.shutdown.store(true, Ordering::Release);
        self.handle.abort();
    }

    /// Returns `true` once the loop task has exited.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }
}
