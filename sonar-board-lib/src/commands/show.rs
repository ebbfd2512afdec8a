use super::Host;
use super::common::{ColorMode, LogLevel, ReportArgs, init_logging, write_reports};
use super::config::Config;
use crate::Result;
use crate::fetch::{Dashboard, FileFetcher, HttpFetcher};
use crate::projects::GateStatus;
use crate::table::{RecencyWindow, SortDirection, TableSettings, build_table};
use camino::{Utf8Path, Utf8PathBuf};
use chrono::Utc;
use clap::Args;
use compact_str::CompactString;
use core::time::Duration;
use ohno::app_err;
use serde::de::IntoDeserializer;
use serde::de::value::{Error as ValueError, StrDeserializer};
use std::io::Write;

#[derive(Args, Debug, Clone)]
pub struct ShowArgs {
    /// Path to configuration file (default is `sonar-board.toml`)
    #[arg(long, short = 'c', value_name = "PATH")]
    pub config: Option<Utf8PathBuf>,

    /// Base URL of the code-quality service, overriding the configuration
    #[arg(long, value_name = "URL")]
    pub server: Option<String>,

    /// Metric keys to show, overriding the configured `metric_keys`
    #[arg(long = "metric", value_name = "KEY", value_delimiter = ',')]
    pub metrics: Vec<String>,

    /// Only show projects analyzed within this duration, such as `14days`
    #[arg(long, value_name = "DURATION", value_parser = parse_duration)]
    pub recent: Option<Duration>,

    /// Show every project regardless of when it was last analyzed
    #[arg(long, conflicts_with = "recent")]
    pub all: bool,

    /// Sort by this column instead of newest analysis first
    #[arg(long, value_name = "COLUMN")]
    pub sort: Option<String>,

    /// Sort in ascending order
    #[arg(long, requires = "sort")]
    pub ascending: bool,

    /// Control when to use colored output
    #[arg(long, value_name = "WHEN", default_value = "auto")]
    pub color: ColorMode,

    /// Set the logging level for diagnostic output
    #[arg(long, value_name = "LEVEL", default_value = "none")]
    pub log_level: LogLevel,

    /// Read the metric catalog from a JSON file instead of the service
    #[arg(long, value_name = "PATH", requires = "projects_file", help_heading = "Offline Input")]
    pub catalog_file: Option<Utf8PathBuf>,

    /// Read the project list from a JSON file instead of the service
    #[arg(long, value_name = "PATH", requires = "catalog_file", help_heading = "Offline Input")]
    pub projects_file: Option<Utf8PathBuf>,

    /// Exit with status code 1 if the catalog or the project list could not be fetched
    #[arg(long)]
    pub fail_on_fetch_error: bool,

    /// Exit with status code 1 if any shown project fails its quality gate
    #[arg(long)]
    pub fail_on_gate_error: bool,

    #[command(flatten)]
    pub reports: ReportArgs,
}

fn parse_duration(text: &str) -> Result<Duration, ValueError> {
    let deserializer: StrDeserializer<'_, ValueError> = text.into_deserializer();
    humantime_serde::deserialize(deserializer)
}

impl ShowArgs {
    fn metric_keys(&self, config: &Config) -> Result<Vec<CompactString>> {
        if self.metrics.is_empty() {
            return Ok(config.metric_keys.clone());
        }

        let mut keys: Vec<CompactString> = Vec::with_capacity(self.metrics.len());
        for key in self.metrics.iter().map(|key| key.trim()).filter(|key| !key.is_empty()) {
            if keys.iter().any(|k| k.as_str() == key) {
                return Err(app_err!("--metric lists '{key}' more than once"));
            }
            keys.push(key.into());
        }
        Ok(keys)
    }

    fn recency(&self, config: &Config) -> Option<RecencyWindow> {
        if self.all {
            None
        } else {
            Some(RecencyWindow::new(self.recent.unwrap_or(config.recency_window)))
        }
    }

    fn sort(&self) -> Option<(String, SortDirection)> {
        let direction = if self.ascending { SortDirection::Ascending } else { SortDirection::Descending };
        self.sort.as_ref().map(|column| (column.clone(), direction))
    }
}

/// Fetch the dashboard data and write the table in the requested formats
pub async fn show_dashboard<H: Host>(host: &mut H, args: &ShowArgs) -> Result<()> {
    init_logging(args.log_level);

    let config = Config::load(Utf8Path::new("."), args.config.as_deref())?;
    let metric_keys = args.metric_keys(&config)?;
    if metric_keys.is_empty() {
        return Err(app_err!("--metric must name at least one metric key"));
    }

    let dashboard = if let (Some(catalog_file), Some(projects_file)) = (&args.catalog_file, &args.projects_file) {
        let fetcher = FileFetcher::new(catalog_file.clone(), projects_file.clone());
        Dashboard::load(&fetcher, &metric_keys).await
    } else {
        let server_url = args.server.as_deref().unwrap_or(&config.server_url);
        let fetcher = HttpFetcher::new(server_url, &config.catalog_path, &config.projects_path, config.request_timeout)?;
        Dashboard::load(&fetcher, &metric_keys).await
    };

    let mut fetch_failures = 0;
    for (what, e) in dashboard.failures() {
        fetch_failures += 1;
        let _ = writeln!(host.error(), "Unable to load the {what}: {e}");
    }

    let catalog = dashboard.catalog();
    let settings = TableSettings {
        metric_keys,
        dashboard_url: config.dashboard_url.clone(),
        recency: args.recency(&config),
        sort: args.sort(),
    };

    let now = Utc::now();
    let table = build_table(&catalog, dashboard.projects(), &settings, now)?;
    write_reports(host, &table, &args.reports, args.color, now)?;

    if args.fail_on_fetch_error && fetch_failures > 0 {
        return Err(app_err!("unable to load {fetch_failures} of the dashboard's data sources"));
    }

    if args.fail_on_gate_error {
        let failing = table.rows().iter().filter(|row| row.status == GateStatus::Error).count();
        if failing > 0 {
            return Err(app_err!("{failing} project(s) failed their quality gate"));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Parser, Debug)]
    struct Cli {
        #[command(flatten)]
        show: ShowArgs,
    }

    fn parse(args: &[&str]) -> ShowArgs {
        Cli::try_parse_from(core::iter::once("show").chain(args.iter().copied())).unwrap().show
    }

    #[test]
    fn test_metric_override() {
        let config = Config::default();
        assert_eq!(parse(&[]).metric_keys(&config).unwrap(), config.metric_keys);

        let args = parse(&["--metric", "coverage,ncloc", "--metric", "bugs"]);
        assert_eq!(
            args.metric_keys(&config).unwrap(),
            vec![CompactString::from("coverage"), CompactString::from("ncloc"), CompactString::from("bugs")]
        );
    }

    #[test]
    fn test_repeated_metric_is_rejected() {
        let config = Config::default();
        let err = parse(&["--metric", "ncloc,coverage", "--metric", " ncloc"]).metric_keys(&config).unwrap_err();
        assert!(err.to_string().contains("--metric lists 'ncloc' more than once"));
    }

    #[test]
    fn test_recency_options() {
        let config = Config::default();
        assert_eq!(parse(&[]).recency(&config), Some(RecencyWindow::new(config.recency_window)));
        assert_eq!(
            parse(&["--recent", "7days"]).recency(&config),
            Some(RecencyWindow::new(Duration::from_hours(7 * 24)))
        );
        assert_eq!(parse(&["--all"]).recency(&config), None);
    }

    #[test]
    fn test_all_conflicts_with_recent() {
        let result = Cli::try_parse_from(["show", "--all", "--recent", "1day"]);
        let _ = result.unwrap_err();
    }

    #[test]
    fn test_sort_options() {
        assert_eq!(parse(&[]).sort(), None);
        assert_eq!(parse(&["--sort", "coverage"]).sort(), Some(("coverage".to_string(), SortDirection::Descending)));
        assert_eq!(
            parse(&["--sort", "name", "--ascending"]).sort(),
            Some(("name".to_string(), SortDirection::Ascending))
        );
    }

    #[test]
    fn test_ascending_requires_sort() {
        let _ = Cli::try_parse_from(["show", "--ascending"]).unwrap_err();
    }

    #[test]
    fn test_offline_files_come_in_pairs() {
        let _ = Cli::try_parse_from(["show", "--catalog-file", "catalog.json"]).unwrap_err();
        let args = parse(&["--catalog-file", "catalog.json", "--projects-file", "projects.json"]);
        assert_eq!(args.catalog_file.as_deref(), Some(Utf8Path::new("catalog.json")));
        assert_eq!(args.projects_file.as_deref(), Some(Utf8Path::new("projects.json")));
    }
}
