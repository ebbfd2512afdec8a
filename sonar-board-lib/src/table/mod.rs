//! Column assembly, recency filtering, and table rendering
//!
//! This is where the metric, project, and status pieces come together. A
//! [`ColumnBuilder`] turns the catalog and the requested metric keys into an
//! ordered list of [`Column`]s. Each column knows how to extract a [`CellValue`]
//! from a project (used for sorting) and how to render that value into a
//! [`Cell`] (used by the report generators). [`Table`] applies every column to
//! every recent project.
//!
//! Building a table never fails on data: a catalog or project list that has not
//! loaded yet simply produces blank headers, blank cells, or no rows.

mod cell;
mod column;
mod grid;
mod recency;
mod relative_date;

pub use cell::{Cell, CellValue};
pub use column::{Column, ColumnBuilder, ColumnId, DATE_COLUMN_ID, NAME_COLUMN_ID, STATUS_COLUMN_ID, SortDirection};
pub use grid::{Row, Table};
pub use recency::{RecencyWindow, is_recent};
pub use relative_date::format_relative;

use crate::Result;
use crate::metrics::MetricCatalog;
use crate::projects::Project;
use chrono::{DateTime, Utc};
use compact_str::CompactString;
use ohno::app_err;

/// How a table is assembled from the fetched data.
#[derive(Debug, Clone)]
pub struct TableSettings {
    /// Metric columns, in display order. Empty means every catalog metric.
    pub metric_keys: Vec<CompactString>,

    /// Prefix of the per-project link; the project key is appended.
    pub dashboard_url: String,

    /// Only projects analyzed within this window are shown. `None` shows every project.
    pub recency: Option<RecencyWindow>,

    /// Explicit sort column and direction, overriding the default newest-first order.
    pub sort: Option<(String, SortDirection)>,
}

/// Build the table for `projects` as of `now`.
///
/// # Errors
///
/// Fails only when `settings.sort` names a column the table does not have.
pub fn build_table<'a>(
    catalog: &'a MetricCatalog,
    projects: &[Project],
    settings: &'a TableSettings,
    now: DateTime<Utc>,
) -> Result<Table<'a>> {
    let columns = ColumnBuilder::new(catalog, &settings.metric_keys, &settings.dashboard_url, now).build();

    let cutoff = settings.recency.map(|window| window.cutoff(now));
    let shown = projects
        .iter()
        .filter(|project| cutoff.is_none_or(|cutoff| is_recent(project, cutoff)));

    let mut table = Table::build(columns, shown);
    log::debug!("showing {} of {} projects", table.rows().len(), projects.len());

    if let Some((column_id, direction)) = &settings.sort
        && !table.sort_by(column_id, *direction)
    {
        let known: Vec<_> = table.columns().iter().map(|c| c.id().to_string()).collect();
        return Err(app_err!("unknown sort column '{column_id}', expected one of: {}", known.join(", ")));
    }

    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::{MetricDefinition, MetricKind};
    use crate::projects::Measure;
    use chrono::{TimeDelta, TimeZone};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 20, 12, 0, 0).unwrap()
    }

    fn settings(recency: Option<RecencyWindow>, sort: Option<(&str, SortDirection)>) -> TableSettings {
        TableSettings {
            metric_keys: vec!["ncloc".into()],
            dashboard_url: "https://sonar.example.com/dashboard?id=".to_string(),
            recency,
            sort: sort.map(|(id, direction)| (id.to_string(), direction)),
        }
    }

    fn projects() -> Vec<Project> {
        vec![
            Project::new("fresh", "Fresh")
                .with_analysis_date(now() - TimeDelta::days(2))
                .with_measure(Measure::new("ncloc", "10")),
            Project::new("stale", "Stale")
                .with_analysis_date(now() - TimeDelta::days(45))
                .with_measure(Measure::new("ncloc", "20")),
            Project::new("never", "Never"),
        ]
    }

    fn catalog() -> MetricCatalog {
        core::iter::once(MetricDefinition::new("ncloc", "Lines", MetricKind::Int)).collect()
    }

    #[test]
    fn test_recency_filter_applies() {
        let catalog = catalog();
        let projects = projects();
        let settings = settings(Some(RecencyWindow::default()), None);
        let table = build_table(&catalog, &projects, &settings, now()).unwrap();
        let keys: Vec<_> = table.rows().iter().map(|r| r.project_key.as_str()).collect();
        assert_eq!(keys, vec!["fresh"]);
    }

    #[test]
    fn test_no_recency_shows_everything() {
        let catalog = catalog();
        let projects = projects();
        let settings = settings(None, None);
        let table = build_table(&catalog, &projects, &settings, now()).unwrap();
        let keys: Vec<_> = table.rows().iter().map(|r| r.project_key.as_str()).collect();
        assert_eq!(keys, vec!["fresh", "stale", "never"]);
    }

    #[test]
    fn test_explicit_sort() {
        let catalog = catalog();
        let projects = projects();
        let settings = settings(None, Some(("ncloc", SortDirection::Descending)));
        let table = build_table(&catalog, &projects, &settings, now()).unwrap();
        let keys: Vec<_> = table.rows().iter().map(|r| r.project_key.as_str()).collect();
        assert_eq!(keys, vec!["stale", "fresh", "never"]);
    }

    #[test]
    fn test_sort_by_date_with_colliding_metric_keys() {
        let catalog = catalog();
        let projects = projects();
        let settings = TableSettings {
            metric_keys: vec!["ncloc".into(), "ncloc".into(), "date".into()],
            ..settings(None, Some(("date", SortDirection::Ascending)))
        };
        let table = build_table(&catalog, &projects, &settings, now()).unwrap();

        let ids: Vec<_> = table.columns().iter().map(|c| c.id().to_string()).collect();
        assert_eq!(ids, vec!["status", "name", "ncloc", "date"]);

        let keys: Vec<_> = table.rows().iter().map(|r| r.project_key.as_str()).collect();
        assert_eq!(keys, vec!["never", "stale", "fresh"]);
    }

    #[test]
    fn test_unknown_sort_column_is_an_error() {
        let catalog = catalog();
        let projects = projects();
        let settings = settings(None, Some(("coverage", SortDirection::Ascending)));
        let err = build_table(&catalog, &projects, &settings, now()).unwrap_err();
        assert!(err.to_string().contains("unknown sort column 'coverage'"));
    }

    #[test]
    fn test_pending_catalog_still_renders() {
        let catalog = MetricCatalog::new();
        let projects = projects();
        let settings = settings(None, None);
        let table = build_table(&catalog, &projects, &settings, now()).unwrap();
        assert_eq!(table.columns()[2].header(), "");
        assert!(table.rows().iter().all(|r| r.cells[2].text().is_empty()));
    }
}
