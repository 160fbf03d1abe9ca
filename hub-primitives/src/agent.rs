//! Agent configuration records.

use serde::{Deserialize, Serialize};

use crate::record::{MetadataRecord, RecordBase};

/// A validated agent definition, discriminated by the `type` field.
///
/// Unknown discriminators fail deserialization; the conversational fallback
/// applies when an execution strategy is selected, not when a record is
/// parsed.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum AgentRecord {
    /// Answers questions against a relational database.
    Sql {
        /// Shared name/description fields.
        #[serde(flatten)]
        base: RecordBase,
        /// Optional dialect hint forwarded to the execution layer.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        dialect: Option<String>,
    },
    /// Answers questions against delimited files.
    Csv {
        /// Shared name/description fields.
        #[serde(flatten)]
        base: RecordBase,
    },
    /// Answers questions against blob-stored documents.
    BlobStorage {
        /// Shared name/description fields.
        #[serde(flatten)]
        base: RecordBase,
    },
    /// Surfaces anomalies detected in an upstream feed.
    Anomaly {
        /// Shared name/description fields.
        #[serde(flatten)]
        base: RecordBase,
    },
    /// Summarizes supplied content.
    Summarizer {
        /// Shared name/description fields.
        #[serde(flatten)]
        base: RecordBase,
    },
    /// Routes a request to the most suitable downstream agent.
    GenericResolver {
        /// Shared name/description fields.
        #[serde(flatten)]
        base: RecordBase,
    },
    /// General question/answer agent, the execution-layer fallback.
    Conversational {
        /// Shared name/description fields.
        #[serde(flatten)]
        base: RecordBase,
    },
}

impl AgentRecord {
    /// Returns the shared base fields.
    #[must_use]
    pub fn base(&self) -> &RecordBase {
        match self {
            Self::Sql { base, .. }
            | Self::Csv { base }
            | Self::BlobStorage { base }
            | Self::Anomaly { base }
            | Self::Summarizer { base }
            | Self::GenericResolver { base }
            | Self::Conversational { base } => base,
        }
    }

    /// Returns the discriminator string for this variant.
    #[must_use]
    pub const fn discriminator(&self) -> &'static str {
        match self {
            Self::Sql { .. } => "sql",
            Self::Csv { .. } => "csv",
            Self::BlobStorage { .. } => "blob-storage",
            Self::Anomaly { .. } => "anomaly",
            Self::Summarizer { .. } => "summarizer",
            Self::GenericResolver { .. } => "generic-resolver",
            Self::Conversational { .. } => "conversational",
        }
    }
}

impl MetadataRecord for AgentRecord {
    fn name(&self) -> &str {
        self.base().name()
    }

    fn description(&self) -> Option<&str> {
        self.base().description()
    }

    fn kind(&self) -> &str {
        self.discriminator()
    }
}
