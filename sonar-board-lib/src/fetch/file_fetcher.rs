use super::fetcher::ProjectsPayload;
use super::{Fetcher, LOG_TARGET};
use crate::Result;
use crate::metrics::MetricCatalog;
use crate::projects::Project;
use camino::{Utf8Path, Utf8PathBuf};
use compact_str::CompactString;
use ohno::IntoAppError;
use serde::de::DeserializeOwned;
use std::fs;

/// Reads dashboard data from local JSON files shaped like the service's responses.
#[derive(Debug, Clone)]
pub struct FileFetcher {
    catalog_path: Utf8PathBuf,
    projects_path: Utf8PathBuf,
}

impl FileFetcher {
    #[must_use]
    pub fn new(catalog_path: impl Into<Utf8PathBuf>, projects_path: impl Into<Utf8PathBuf>) -> Self {
        Self {
            catalog_path: catalog_path.into(),
            projects_path: projects_path.into(),
        }
    }
}

fn load<T: DeserializeOwned>(path: &Utf8Path, what: &str) -> Result<T> {
    log::info!(target: LOG_TARGET, "Reading {what} from '{path}'");
    let text = fs::read_to_string(path).into_app_err_with(|| format!("unable to read {what} from '{path}'"))?;
    serde_json::from_str(&text).into_app_err_with(|| format!("unable to parse {what} from '{path}'"))
}

impl Fetcher for FileFetcher {
    async fn fetch_catalog(&self) -> Result<MetricCatalog> {
        load(&self.catalog_path, "metric catalog")
    }

    /// Files hold whatever measures they were saved with; `metric_keys` does not filter them.
    async fn fetch_projects(&self, _metric_keys: &[CompactString]) -> Result<Vec<Project>> {
        let payload: ProjectsPayload = load(&self.projects_path, "project list")?;
        Ok(payload.into_projects())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_temp(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    fn utf8(file: &tempfile::NamedTempFile) -> Utf8PathBuf {
        Utf8PathBuf::from_path_buf(file.path().to_path_buf()).unwrap()
    }

    #[tokio::test]
    async fn test_reads_both_files() {
        let catalog = write_temp(r#"{ "ncloc": { "name": "Lines", "type": "INT" } }"#);
        let projects = write_temp(r#"{ "projects": [ { "key": "p1", "name": "P1" } ] }"#);
        let fetcher = FileFetcher::new(utf8(&catalog), utf8(&projects));

        let catalog = fetcher.fetch_catalog().await.unwrap();
        assert_eq!(catalog.name("ncloc"), Some("Lines"));

        let projects = fetcher.fetch_projects(&[]).await.unwrap();
        assert_eq!(projects.len(), 1);
        assert_eq!(projects[0].key(), "p1");
    }

    #[tokio::test]
    async fn test_missing_file() {
        let fetcher = FileFetcher::new("/nonexistent/catalog.json", "/nonexistent/projects.json");
        let err = fetcher.fetch_catalog().await.unwrap_err();
        assert!(err.to_string().contains("unable to read metric catalog"));
    }

    #[tokio::test]
    async fn test_malformed_file() {
        let projects = write_temp("not json");
        let fetcher = FileFetcher::new("/nonexistent/catalog.json", utf8(&projects));
        let err = fetcher.fetch_projects(&[]).await.unwrap_err();
        assert!(err.to_string().contains("unable to parse project list"));
    }
}
