//! Core shared types for the metadata hub.

#![warn(missing_docs, clippy::pedantic)]

mod agent;
mod data_source;
mod error;
mod path;
mod prompt;
mod record;

/// Agent configuration records, tagged by the `type` discriminator.
pub use agent::AgentRecord;
/// Data-source connection profiles, tagged by `underlying_implementation`.
pub use data_source::DataSourceRecord;
/// Error type and result alias shared across the hub crates.
pub use error::{Error, Result};
/// Normalized store-relative path and leaf helpers.
pub use path::{VirtualPath, leaf_name};
/// Prompt prefix/suffix records.
pub use prompt::PromptRecord;
/// Record trait, shared base fields, and listing descriptors.
pub use record::{MetadataRecord, RecordBase, RecordDescriptor};
