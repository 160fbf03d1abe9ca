//! Data-source connection profiles.

use serde::{Deserialize, Serialize};

use crate::record::{MetadataRecord, RecordBase};

/// A validated data-source profile, discriminated by `underlying_implementation`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "underlying_implementation", rename_all = "kebab-case")]
pub enum DataSourceRecord {
    /// Relational database reachable over a SQL dialect.
    Sql {
        /// Shared name/description fields.
        #[serde(flatten)]
        base: RecordBase,
        /// Connection dialect, e.g. `mssql` or `postgresql`.
        dialect: String,
        /// Optional server host name.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        host: Option<String>,
        /// Reference to the secret holding connection credentials.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        credential_secret: Option<String>,
        /// Tables exposed to callers; empty means all.
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        include_tables: Vec<String>,
        /// Whether row-level security is enforced on queries.
        #[serde(default)]
        row_level_security_enabled: bool,
    },
    /// Delimited files exposed as a tabular source.
    Csv {
        /// Shared name/description fields.
        #[serde(flatten)]
        base: RecordBase,
        /// Free-form description of the data contents.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        data_description: Option<String>,
    },
    /// Documents held in blob storage.
    BlobStorage {
        /// Shared name/description fields.
        #[serde(flatten)]
        base: RecordBase,
        /// Free-form description of the data contents.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        data_description: Option<String>,
    },
}

impl DataSourceRecord {
    /// Returns the shared base fields.
    #[must_use]
    pub fn base(&self) -> &RecordBase {
        match self {
            Self::Sql { base, .. } | Self::Csv { base, .. } | Self::BlobStorage { base, .. } => {
                base
            }
        }
    }

    /// Returns the discriminator string for this variant.
    #[must_use]
    pub const fn discriminator(&self) -> &'static str {
        match self {
            Self::Sql { .. } => "sql",
            Self::Csv { .. } => "csv",
            Self::BlobStorage { .. } => "blob-storage",
        }
    }
}

impl MetadataRecord for DataSourceRecord {
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
