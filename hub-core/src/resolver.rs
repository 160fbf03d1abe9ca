//! Request-context narrowing over candidate records.

use serde::{Deserialize, Serialize};

use hub_primitives::MetadataRecord;

/// Domain-specific filter supplied by the upstream collaborator.
///
/// An absent or empty name list means every candidate is eligible.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestContext {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    names: Option<Vec<String>>,
}

impl RequestContext {
    /// A context that leaves the candidate set unconstrained.
    #[must_use]
    pub fn all() -> Self {
        Self::default()
    }

    /// A context requesting records with the supplied names.
    #[must_use]
    pub fn for_names<N: Into<String>>(names: impl IntoIterator<Item = N>) -> Self {
        Self {
            names: Some(names.into_iter().map(Into::into).collect()),
        }
    }

    /// Returns the requested names, if any were supplied.
    #[must_use]
    pub fn names(&self) -> Option<&[String]> {
        self.names.as_deref()
    }

    /// Returns `true` when the context does not constrain the candidates.
    #[must_use]
    pub fn is_unconstrained(&self) -> bool {
        self.names.as_ref().is_none_or(Vec::is_empty)
    }
}

/// Narrows a candidate set to the records applicable to one request.
///
/// Resolvers perform no I/O and are deterministic over their inputs, which
/// makes this the seam for injecting alternative matching strategies without
/// touching the repository or hub.
pub trait Resolver<R>: Send + Sync {
    /// Returns the subset of `candidates` relevant to `request`.
    fn resolve(&self, request: &RequestContext, candidates: &[R]) -> Vec<R>;
}

/// Returns the single first candidate; the simplest narrowing strategy, used
/// when no finer policy is configured.
#[derive(Clone, Copy, Debug, Default)]
pub struct FirstMatch;

impl<R: Clone> Resolver<R> for FirstMatch {
    fn resolve(&self, _request: &RequestContext, candidates: &[R]) -> Vec<R> {
        candidates.first().cloned().into_iter().collect()
    }
}

/// Filters candidates by the request's explicit name list.
#[derive(Clone, Copy, Debug, Default)]
pub struct NameFilter;

impl<R: MetadataRecord + Clone> Resolver<R> for NameFilter {
    fn resolve(&self, request: &RequestContext, candidates: &[R]) -> Vec<R> {
        if request.is_unconstrained() {
            return candidates.to_vec();
        }
        let names = request.names().unwrap_or_default();
        candidates
            .iter()
            .filter(|record| names.iter().any(|name| name == record.name()))
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use hub_primitives::{AgentRecord, DataSourceRecord, RecordBase};

    use super::*;

    fn agents() -> Vec<AgentRecord> {
        vec![
            AgentRecord::Anomaly {
                base: RecordBase::new("anomaly"),
            },
            AgentRecord::Conversational {
                base: RecordBase::new("default"),
            },
        ]
    }

    fn sources() -> Vec<DataSourceRecord> {
        vec![
            DataSourceRecord::Sql {
                base: RecordBase::new("sales-db"),
                dialect: "mssql".to_owned(),
                host: None,
                credential_secret: None,
                include_tables: Vec::new(),
                row_level_security_enabled: false,
            },
            DataSourceRecord::BlobStorage {
                base: RecordBase::new("survey-files"),
                data_description: None,
            },
        ]
    }

    #[test]
    fn first_match_returns_single_candidate() {
        let resolved = FirstMatch.resolve(&RequestContext::all(), &agents());
        assert_eq!(resolved.len(), 1);
        assert_eq!(resolved[0].name(), "anomaly");
    }

    #[test]
    fn first_match_on_empty_candidates_is_empty() {
        let resolved: Vec<AgentRecord> = FirstMatch.resolve(&RequestContext::all(), &[]);
        assert!(resolved.is_empty());
    }

    #[test]
    fn name_filter_selects_requested_subset() {
        let request = RequestContext::for_names(["survey-files"]);
        let resolved = NameFilter.resolve(&request, &sources());
        assert_eq!(resolved.len(), 1);
        assert_eq!(resolved[0].name(), "survey-files");
    }

    #[test]
    fn empty_name_list_means_all() {
        let request = RequestContext::for_names(Vec::<String>::new());
        assert!(request.is_unconstrained());
        let resolved = NameFilter.resolve(&request, &sources());
        assert_eq!(resolved.len(), 2);
    }

    #[test]
    fn resolution_is_deterministic() {
        let request = RequestContext::for_names(["sales-db"]);
        let first = NameFilter.resolve(&request, &sources());
        let second = NameFilter.resolve(&request, &sources());
        assert_eq!(first, second);
    }
}
