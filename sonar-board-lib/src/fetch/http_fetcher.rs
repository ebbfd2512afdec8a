use super::fetcher::ProjectsPayload;
use super::{Fetcher, LOG_TARGET};
use crate::Result;
use crate::metrics::MetricCatalog;
use crate::projects::Project;
use compact_str::CompactString;
use core::time::Duration;
use ohno::{IntoAppError, app_err};
use serde::de::DeserializeOwned;
use url::Url;

pub const DEFAULT_CATALOG_PATH: &str = "api/metrics/catalog";
pub const DEFAULT_PROJECTS_PATH: &str = "api/projects/measures";

/// Fetches dashboard data from the analysis service over HTTP.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: reqwest::Client,
    catalog_url: Url,
    projects_url: Url,
}

impl HttpFetcher {
    /// Create a fetcher for the service at `server_url`. The endpoint paths are resolved
    /// relative to it, so `https://host/sonar` and `https://host/sonar/` behave the same.
    pub fn new(server_url: &str, catalog_path: &str, projects_path: &str, timeout: Duration) -> Result<Self> {
        let base = base_url(server_url)?;

        let client = reqwest::Client::builder()
            .user_agent("sonar-board")
            .timeout(timeout)
            .build()
            .into_app_err("unable to create HTTP client")?;

        Ok(Self {
            client,
            catalog_url: join(&base, catalog_path)?,
            projects_url: join(&base, projects_path)?,
        })
    }

    #[must_use]
    pub const fn catalog_url(&self) -> &Url {
        &self.catalog_url
    }

    /// The projects URL including the `metricKeys` query for `metric_keys`.
    #[must_use]
    pub fn projects_url(&self, metric_keys: &[CompactString]) -> Url {
        let mut url = self.projects_url.clone();
        if !metric_keys.is_empty() {
            let keys: Vec<&str> = metric_keys.iter().map(CompactString::as_str).collect();
            let _ = url.query_pairs_mut().append_pair("metricKeys", &keys.join(","));
        }
        url
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url, what: &str) -> Result<T> {
        log::info!(target: LOG_TARGET, "Fetching {what} from {url}");

        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .into_app_err_with(|| format!("could not fetch {what} from '{url}'"))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_else(|_| String::from("<unable to read body>"));
            log::debug!(target: LOG_TARGET, "Response body (first 500 chars): {}", body.chars().take(500).collect::<String>());
            return Err(app_err!("could not fetch {what} from '{url}': HTTP {status}"));
        }

        let body = response
            .text()
            .await
            .into_app_err_with(|| format!("could not read {what} from '{url}'"))?;

        serde_json::from_str(&body).into_app_err_with(|| format!("could not parse {what} from '{url}'"))
    }
}

impl Fetcher for HttpFetcher {
    async fn fetch_catalog(&self) -> Result<MetricCatalog> {
        let catalog: MetricCatalog = self.get_json(self.catalog_url.clone(), "metric catalog").await?;
        log::debug!(target: LOG_TARGET, "Metric catalog has {} entries", catalog.len());
        Ok(catalog)
    }

    async fn fetch_projects(&self, metric_keys: &[CompactString]) -> Result<Vec<Project>> {
        let payload: ProjectsPayload = self.get_json(self.projects_url(metric_keys), "project list").await?;
        let projects = payload.into_projects();
        log::debug!(target: LOG_TARGET, "Project list has {} entries", projects.len());
        Ok(projects)
    }
}

fn base_url(server_url: &str) -> Result<Url> {
    let mut url = Url::parse(server_url).into_app_err_with(|| format!("invalid server URL '{server_url}'"))?;
    if url.cannot_be_a_base() {
        return Err(app_err!("server URL '{server_url}' cannot be used as a base URL"));
    }

    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}

fn join(base: &Url, path: &str) -> Result<Url> {
    base.join(path.trim_start_matches('/'))
        .into_app_err_with(|| format!("invalid endpoint path '{path}'"))
}

#[cfg(test)]
mod tests {
    use super::*;

    const TIMEOUT: Duration = Duration::from_secs(5);

    fn fetcher(server_url: &str) -> HttpFetcher {
        HttpFetcher::new(server_url, DEFAULT_CATALOG_PATH, DEFAULT_PROJECTS_PATH, TIMEOUT).unwrap()
    }

    #[test]
    fn test_endpoint_urls() {
        let fetcher = fetcher("https://sonar.example.com");
        assert_eq!(fetcher.catalog_url().as_str(), "https://sonar.example.com/api/metrics/catalog");
        assert_eq!(
            fetcher.projects_url(&[]).as_str(),
            "https://sonar.example.com/api/projects/measures"
        );
    }

    #[test]
    fn test_server_url_with_path_prefix() {
        for server in ["https://example.com/sonar", "https://example.com/sonar/"] {
            let fetcher = fetcher(server);
            assert_eq!(fetcher.catalog_url().as_str(), "https://example.com/sonar/api/metrics/catalog");
        }
    }

    #[test]
    fn test_leading_slash_in_path_keeps_prefix() {
        let fetcher = HttpFetcher::new("https://example.com/sonar", "/catalog.json", "/projects.json", TIMEOUT).unwrap();
        assert_eq!(fetcher.catalog_url().as_str(), "https://example.com/sonar/catalog.json");
    }

    #[test]
    fn test_metric_keys_query() {
        let fetcher = fetcher("https://sonar.example.com");
        let url = fetcher.projects_url(&["ncloc".into(), "coverage".into()]);
        let pairs: Vec<(String, String)> = url.query_pairs().map(|(k, v)| (k.into_owned(), v.into_owned())).collect();
        assert_eq!(pairs, vec![("metricKeys".to_string(), "ncloc,coverage".to_string())]);
    }

    #[test]
    fn test_invalid_server_url() {
        let err = HttpFetcher::new("not a url", DEFAULT_CATALOG_PATH, DEFAULT_PROJECTS_PATH, TIMEOUT).unwrap_err();
        assert!(err.to_string().contains("invalid server URL"));

        let err = HttpFetcher::new("mailto:someone@example.com", DEFAULT_CATALOG_PATH, DEFAULT_PROJECTS_PATH, TIMEOUT).unwrap_err();
        assert!(err.to_string().contains("cannot be used as a base URL"));
    }
}
