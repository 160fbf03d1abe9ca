//! Repositories, resolvers, and the snapshot-cached metadata hub.
//!
//! This crate turns raw object-store bytes into validated records and serves
//! them through a bounded, periodically refreshed cache. Per-item failures
//! are contained at the repository boundary; readers never block on an
//! in-flight refresh.

#![warn(missing_docs, clippy::pedantic)]

mod error;
mod hub;
mod prompts;
mod repository;
mod resolver;
mod settings;

/// Error type and result alias for hub operations.
pub use error::{HubError, HubResult};
/// Snapshot-cached facade, per-domain aliases, and the refresh-loop handle.
pub use hub::{AgentHub, DataSourceHub, MetadataHub, PromptHub, RefreshTask, Snapshot};
/// Hierarchical prompt repository.
pub use prompts::PromptRepository;
/// Repository trait and the flat-JSON domain repositories.
pub use repository::{AgentRepository, DataSourceRepository, JsonRepository, MetadataRepository};
/// Request narrowing trait and bundled strategies.
pub use resolver::{FirstMatch, NameFilter, RequestContext, Resolver};
/// Typed domain layout and refresh configuration.
pub use settings::{DomainSettings, RefreshConfig};
