use super::{FetchState, Fetcher, LOG_TARGET};
use crate::metrics::MetricCatalog;
use crate::projects::Project;
use compact_str::CompactString;

/// The dashboard's data: two slices, each fetched and replaced independently.
#[derive(Debug, Clone, Default)]
pub struct Dashboard {
    pub catalog: FetchState<MetricCatalog>,
    pub projects: FetchState<Vec<Project>>,
}

impl Dashboard {
    /// Fetch both slices concurrently.
    pub async fn load(fetcher: &impl Fetcher, metric_keys: &[CompactString]) -> Self {
        let (catalog, projects) = tokio::join!(fetcher.fetch_catalog(), fetcher.fetch_projects(metric_keys));

        let dashboard = Self {
            catalog: catalog.into(),
            projects: projects.into(),
        };

        if let Some(e) = dashboard.catalog.error() {
            log::error!(target: LOG_TARGET, "Could not fetch the metric catalog: {e:#}");
        }
        if let Some(e) = dashboard.projects.error() {
            log::error!(target: LOG_TARGET, "Could not fetch the project list: {e:#}");
        }

        dashboard
    }

    /// The catalog to render with. Until it has loaded this is empty.
    #[must_use]
    pub fn catalog(&self) -> MetricCatalog {
        self.catalog.loaded().cloned().unwrap_or_default()
    }

    /// The projects to render. Until they have loaded this is empty.
    #[must_use]
    pub fn projects(&self) -> &[Project] {
        self.projects.loaded().map(Vec::as_slice).unwrap_or_default()
    }

    /// Errors of the slices that failed, labelled with what was being fetched.
    pub fn failures(&self) -> impl Iterator<Item = (&'static str, &ohno::AppError)> {
        [
            ("metric catalog", self.catalog.error()),
            ("project list", self.projects.error()),
        ]
        .into_iter()
        .filter_map(|(what, e)| e.map(|e| (what, e)))
    }
}
