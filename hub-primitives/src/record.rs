//! Record trait, shared base fields, and listing descriptors.

use serde::{Deserialize, Serialize};

/// Behavior shared by every validated configuration record.
///
/// Records are immutable value objects: they are created only by successful
/// deserialization (or prompt composition) inside a repository and are never
/// mutated afterwards.
pub trait MetadataRecord: Send + Sync {
    /// Returns the record name, unique within its domain.
    fn name(&self) -> &str;

    /// Returns the optional human-readable description.
    fn description(&self) -> Option<&str>;

    /// Returns the discriminator string selecting the record shape.
    fn kind(&self) -> &str;

    /// Returns the lightweight listing shape for this record.
    fn descriptor(&self) -> RecordDescriptor {
        RecordDescriptor {
            name: self.name().to_owned(),
            description: self.description().map(str::to_owned),
        }
    }
}

/// Fields common to every record shape, flattened into each variant.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordBase {
    name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    description: Option<String>,
}

impl RecordBase {
    /// Creates a base with the supplied name.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
        }
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Returns the record name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the optional description.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }
}

/// Name/description pair served by hub listings.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordDescriptor {
    /// Record name, unique within its domain.
    pub name: String,
    /// Optional human-readable description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}
