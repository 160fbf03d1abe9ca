//! Prompt prefix/suffix records.

use serde::{Deserialize, Serialize};

use crate::record::MetadataRecord;

/// A prompt template composed from a mandatory prefix and an optional suffix.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PromptRecord {
    name: String,
    prompt_prefix: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    prompt_suffix: Option<String>,
}

impl PromptRecord {
    /// Creates a record with the supplied name and prefix text.
    #[must_use]
    pub fn new(name: impl Into<String>, prompt_prefix: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            prompt_prefix: prompt_prefix.into(),
            prompt_suffix: None,
        }
    }

    /// Sets the optional suffix text.
    #[must_use]
    pub fn with_suffix(mut self, prompt_suffix: impl Into<String>) -> Self {
        self.prompt_suffix = Some(prompt_suffix.into());
        self
    }

    /// Returns the prefix text.
    #[must_use]
    pub fn prompt_prefix(&self) -> &str {
        &self.prompt_prefix
    }

    /// Returns the suffix text if present.
    #[must_use]
    pub fn prompt_suffix(&self) -> Option<&str> {
        self.prompt_suffix.as_deref()
    }
}

impl MetadataRecord for PromptRecord {
    fn name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> Option<&str> {
        None
    }

    fn kind(&self) -> &str {
        "prompt"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_prefix_only_record() {
        let record = PromptRecord::new("default", "You are a helpful agent.");
        assert_eq!(record.name(), "default");
        assert_eq!(record.prompt_prefix(), "You are a helpful agent.");
        assert_eq!(record.prompt_suffix(), None);
        assert_eq!(record.kind(), "prompt");
    }

    #[test]
    fn carries_optional_suffix() {
        let record =
            PromptRecord::new("anomaly", "Detect anomalies.").with_suffix("Answer briefly.");
        assert_eq!(record.prompt_suffix(), Some("Answer briefly."));
    }

    #[test]
    fn suffix_absent_from_serialized_form() {
        let record = PromptRecord::new("default", "prefix");
        let json = serde_json::to_string(&record).unwrap();
        assert!(!json.contains("prompt_suffix"));
    }
}
