use crate::Result;
use crate::metrics::MetricCatalog;
use crate::projects::Project;
use compact_str::CompactString;
use serde::Deserialize;

/// A source for the two slices of dashboard data.
pub trait Fetcher {
    /// Fetch the metric catalog.
    fn fetch_catalog(&self) -> impl Future<Output = Result<MetricCatalog>> + Send;

    /// Fetch all projects, with measures for `metric_keys`.
    fn fetch_projects(&self, metric_keys: &[CompactString]) -> impl Future<Output = Result<Vec<Project>>> + Send;
}

/// The project list is sent either bare or wrapped in an object.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(super) enum ProjectsPayload {
    List(Vec<Project>),
    Wrapped { projects: Vec<Project> },
}

impl ProjectsPayload {
    pub(super) fn into_projects(self) -> Vec<Project> {
        match self {
            Self::List(projects) | Self::Wrapped { projects } => projects,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bare_list() {
        let payload: ProjectsPayload = serde_json::from_str(r#"[ { "key": "a" } ]"#).unwrap();
        assert_eq!(payload.into_projects().len(), 1);
    }

    #[test]
    fn test_wrapped_list() {
        let payload: ProjectsPayload = serde_json::from_str(r#"{ "projects": [ { "key": "a" }, { "key": "b" } ] }"#).unwrap();
        assert_eq!(payload.into_projects().len(), 2);
    }

    #[test]
    fn test_other_shapes_are_rejected() {
        let _ = serde_json::from_str::<ProjectsPayload>(r#"{ "items": [] }"#).unwrap_err();
        let _ = serde_json::from_str::<ProjectsPayload>("42").unwrap_err();
    }
}
