use crate::Result;
use camino::{Utf8Path, Utf8PathBuf};
use compact_str::CompactString;
use core::time::Duration;
use ohno::{IntoAppError, app_err};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::io;
use url::Url;

/// The default configuration TOML content, embedded from `default_config.toml`
pub const DEFAULT_CONFIG_TOML: &str = include_str!("../../default_config.toml");

/// Name of the configuration file looked up in the working directory
pub const DEFAULT_CONFIG_FILE: &str = "sonar-board.toml";

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Base URL of the code-quality service
    #[serde(default = "default_server_url")]
    pub server_url: String,

    /// Path of the metric catalog endpoint, relative to `server_url`
    #[serde(default = "default_catalog_path")]
    pub catalog_path: String,

    /// Path of the project list endpoint, relative to `server_url`
    #[serde(default = "default_projects_path")]
    pub projects_path: String,

    /// Prefix of the per-project link
    #[serde(default = "default_dashboard_url")]
    pub dashboard_url: String,

    /// Metric columns, in display order
    #[serde(default = "default_metric_keys")]
    pub metric_keys: Vec<CompactString>,

    /// Only projects analyzed within this window are shown
    #[serde(default = "default_recency_window", with = "humantime_serde")]
    pub recency_window: Duration,

    /// Timeout applied to each request made to the service
    #[serde(default = "default_request_timeout", with = "humantime_serde")]
    pub request_timeout: Duration,
}

fn default_server_url() -> String {
    "https://sonar.ximedes.com/".to_string()
}

fn default_catalog_path() -> String {
    crate::fetch::DEFAULT_CATALOG_PATH.to_string()
}

fn default_projects_path() -> String {
    crate::fetch::DEFAULT_PROJECTS_PATH.to_string()
}

fn default_dashboard_url() -> String {
    "https://sonar.ximedes.com/dashboard?id=".to_string()
}

fn default_metric_keys() -> Vec<CompactString> {
    [
        "ncloc",
        "duplicated_lines_density",
        "blocker_violations",
        "critical_violations",
        "class_complexity",
        "high_severity_vulns",
        "coverage",
    ]
    .into_iter()
    .map(CompactString::const_new)
    .collect()
}

const fn default_recency_window() -> Duration {
    Duration::from_hours(30 * 24)
}

const fn default_request_timeout() -> Duration {
    Duration::from_secs(60)
}

impl Config {
    /// Load configuration from a file or use defaults
    ///
    /// Without an explicit path, `sonar-board.toml` in `base_dir` is used when present.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed, or fails validation
    pub fn load(base_dir: &Utf8Path, config_path: Option<&Utf8Path>) -> Result<Self> {
        let (final_path, text) = if let Some(path) = config_path {
            let text = fs::read_to_string(path).into_app_err_with(|| format!("reading sonar-board configuration file '{path}'"))?;
            (path.to_path_buf(), text)
        } else {
            let path = base_dir.join(DEFAULT_CONFIG_FILE);
            match fs::read_to_string(&path) {
                Ok(text) => (path, text),
                Err(e) if e.kind() == io::ErrorKind::NotFound => {
                    log::debug!("no configuration file at '{path}', using defaults");
                    return Ok(Self::default());
                }
                Err(e) => return Err(e).into_app_err_with(|| format!("reading sonar-board configuration file '{path}'")),
            }
        };

        let config: Self = toml::from_str(&text).into_app_err_with(|| format!("parsing configuration file '{final_path}'"))?;
        config.validate()?;

        log::debug!("loaded configuration from '{final_path}'");
        Ok(config)
    }

    /// Resolve which file [`Config::load`] reads, if any
    #[must_use]
    pub fn resolve_path(base_dir: &Utf8Path, config_path: Option<&Utf8Path>) -> Option<Utf8PathBuf> {
        match config_path {
            Some(path) => Some(path.to_path_buf()),
            None => Some(base_dir.join(DEFAULT_CONFIG_FILE)).filter(|path| path.is_file()),
        }
    }

    /// Save the default configuration to a TOML file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written
    pub fn save_default(output_path: &Utf8Path) -> Result<()> {
        fs::write(output_path, DEFAULT_CONFIG_TOML).into_app_err_with(|| format!("writing default configuration to {output_path}"))?;
        Ok(())
    }

    /// Validate configuration values
    ///
    /// # Errors
    ///
    /// Returns an error if the server URL is malformed, a duration is zero, or the metric keys are empty or repeated
    pub fn validate(&self) -> Result<()> {
        let _ = Url::parse(&self.server_url).into_app_err_with(|| format!("server_url '{}' is not a valid URL", self.server_url))?;

        if self.recency_window.is_zero() {
            return Err(app_err!("recency_window must be greater than zero"));
        }

        if self.request_timeout.is_zero() {
            return Err(app_err!("request_timeout must be greater than zero"));
        }

        if self.metric_keys.is_empty() {
            return Err(app_err!("metric_keys must list at least one metric"));
        }

        let mut seen = HashSet::with_capacity(self.metric_keys.len());
        for key in &self.metric_keys {
            if key.trim().is_empty() {
                return Err(app_err!("metric_keys must not contain empty keys"));
            }

            if !seen.insert(key.as_str()) {
                return Err(app_err!("metric_keys lists '{key}' more than once"));
            }
        }

        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        toml::from_str(DEFAULT_CONFIG_TOML).expect("default_config.toml should be valid TOML that deserializes to Config")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_dir() -> (tempfile::TempDir, Utf8PathBuf) {
        let tmp = tempfile::tempdir().unwrap();
        let path = Utf8PathBuf::try_from(tmp.path().to_path_buf()).unwrap();
        (tmp, path)
    }

    #[test]
    fn test_default_config_is_valid() {
        let config = Config::default();
        config.validate().unwrap();
    }

    #[test]
    fn test_default_config_matches_field_defaults() {
        let config = Config::default();
        let empty: Config = toml::from_str("").unwrap();

        assert_eq!(config.server_url, empty.server_url);
        assert_eq!(config.catalog_path, empty.catalog_path);
        assert_eq!(config.projects_path, empty.projects_path);
        assert_eq!(config.dashboard_url, empty.dashboard_url);
        assert_eq!(config.metric_keys, empty.metric_keys);
        assert_eq!(config.recency_window, empty.recency_window);
        assert_eq!(config.request_timeout, empty.request_timeout);
    }

    #[test]
    fn test_default_values() {
        let config = Config::default();
        assert_eq!(config.recency_window, Duration::from_hours(30 * 24));
        assert_eq!(config.request_timeout, Duration::from_secs(60));
        assert_eq!(config.metric_keys.first().map(CompactString::as_str), Some("ncloc"));
        assert_eq!(config.metric_keys.last().map(CompactString::as_str), Some("coverage"));
        assert_eq!(config.dashboard_url, "https://sonar.ximedes.com/dashboard?id=");
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: Config = toml::from_str(
            r#"
            metric_keys = ["coverage", "ncloc"]
            recency_window = "7days"
            "#,
        )
        .unwrap();

        assert_eq!(config.metric_keys, vec![CompactString::from("coverage"), CompactString::from("ncloc")]);
        assert_eq!(config.recency_window, Duration::from_hours(7 * 24));
        assert_eq!(config.request_timeout, Duration::from_secs(60));
        assert_eq!(config.catalog_path, "api/metrics/catalog");
    }

    #[test]
    fn test_unknown_field_is_rejected() {
        let result = toml::from_str::<Config>("colour = \"red\"");
        let err = result.unwrap_err();
        assert!(err.to_string().contains("colour"));
    }

    #[test]
    fn test_validate_bad_url() {
        let config = Config { server_url: "not a url".to_string(), ..Config::default() };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("server_url"));
    }

    #[test]
    fn test_validate_zero_recency_window() {
        let config = Config { recency_window: Duration::ZERO, ..Config::default() };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("recency_window"));
    }

    #[test]
    fn test_validate_zero_timeout() {
        let config = Config { request_timeout: Duration::ZERO, ..Config::default() };
        let _ = config.validate().unwrap_err();
    }

    #[test]
    fn test_validate_empty_metric_keys() {
        let config = Config { metric_keys: Vec::new(), ..Config::default() };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("at least one metric"));
    }

    #[test]
    fn test_validate_blank_metric_key() {
        let config = Config { metric_keys: vec![CompactString::from("ncloc"), CompactString::from(" ")], ..Config::default() };
        let _ = config.validate().unwrap_err();
    }

    #[test]
    fn test_validate_duplicate_metric_keys() {
        let config = Config {
            metric_keys: vec![CompactString::from("ncloc"), CompactString::from("coverage"), CompactString::from("ncloc")],
            ..Config::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("'ncloc' more than once"));
    }

    #[test]
    #[cfg_attr(miri, ignore = "Miri cannot call GetTempPathW")]
    fn test_save_default_and_load() {
        let (_tmp, dir) = temp_dir();
        let output_path = dir.join("custom.toml");
        Config::save_default(&output_path).unwrap();
        let loaded = Config::load(&dir, Some(&output_path)).unwrap();
        assert_eq!(loaded.metric_keys, Config::default().metric_keys);
    }

    #[test]
    #[cfg_attr(miri, ignore = "Miri cannot call GetTempPathW")]
    fn test_load_from_base_dir() {
        let (_tmp, dir) = temp_dir();
        fs::write(dir.join(DEFAULT_CONFIG_FILE), "metric_keys = [\"bugs\"]\n").unwrap();

        let config = Config::load(&dir, None).unwrap();
        assert_eq!(config.metric_keys, vec![CompactString::from("bugs")]);
        assert_eq!(Config::resolve_path(&dir, None), Some(dir.join(DEFAULT_CONFIG_FILE)));
    }

    #[test]
    #[cfg_attr(miri, ignore = "Miri cannot call GetTempPathW")]
    fn test_load_missing_config_uses_defaults() {
        let (_tmp, dir) = temp_dir();
        let config = Config::load(&dir, None).unwrap();
        config.validate().unwrap();
        assert_eq!(Config::resolve_path(&dir, None), None);
    }

    #[test]
    #[cfg_attr(miri, ignore = "Miri cannot call GetTempPathW")]
    fn test_load_missing_explicit_config_fails() {
        let (_tmp, dir) = temp_dir();
        let missing = dir.join("missing.toml");
        let err = Config::load(&dir, Some(&missing)).unwrap_err();
        assert!(err.to_string().contains("reading sonar-board configuration file"));
    }

    #[test]
    #[cfg_attr(miri, ignore = "Miri cannot call GetTempPathW")]
    fn test_load_invalid_config_fails() {
        let (_tmp, dir) = temp_dir();
        let path = dir.join("bad.toml");
        fs::write(&path, "metric_keys = []\n").unwrap();
        let err = Config::load(&dir, Some(&path)).unwrap_err();
        assert!(err.to_string().contains("at least one metric"));
    }

    #[test]
    fn test_default_config_toml_is_not_empty() {
        assert!(!DEFAULT_CONFIG_TOML.is_empty());
    }
}
