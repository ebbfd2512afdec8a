use super::{Cell, CellValue, format_relative};
use crate::metrics::{MetricCatalog, MetricValue};
use crate::projects::Project;
use crate::status::{metric_class, project_status, status_glyph};
use chrono::{DateTime, Utc};
use compact_str::CompactString;
use core::fmt;
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};

/// Characters left untouched when a project key is appended to the dashboard URL.
/// These are the URI reserved and unreserved characters.
const URI_KEEP: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b';')
    .remove(b',')
    .remove(b'/')
    .remove(b'?')
    .remove(b':')
    .remove(b'@')
    .remove(b'&')
    .remove(b'=')
    .remove(b'+')
    .remove(b'$')
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')')
    .remove(b'#');

pub const STATUS_COLUMN_ID: &str = "status";
pub const NAME_COLUMN_ID: &str = "name";
pub const DATE_COLUMN_ID: &str = "date";

/// Stable identity of a column, used to key sort state.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ColumnId {
    Status,
    Name,
    Metric(CompactString),
    AnalysisDate,
}

impl ColumnId {
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Status => STATUS_COLUMN_ID,
            Self::Name => NAME_COLUMN_ID,
            Self::Metric(key) => key.as_str(),
            Self::AnalysisDate => DATE_COLUMN_ID,
        }
    }
}

impl fmt::Display for ColumnId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

/// One table column: how to extract a value from a project and how to render it.
#[derive(Debug, Clone)]
pub struct Column<'a> {
    id: ColumnId,
    header: String,
    default_sort: Option<SortDirection>,
    catalog: &'a MetricCatalog,
    dashboard_url: &'a str,
    now: DateTime<Utc>,
}

impl Column<'_> {
    #[must_use]
    pub const fn id(&self) -> &ColumnId {
        &self.id
    }

    #[must_use]
    pub fn header(&self) -> &str {
        &self.header
    }

    #[must_use]
    pub const fn default_sort(&self) -> Option<SortDirection> {
        self.default_sort
    }

    /// Extract this column's value from a project.
    #[must_use]
    pub fn value(&self, project: &Project) -> CellValue {
        match &self.id {
            ColumnId::Status => CellValue::Status(project_status(project)),
            ColumnId::Name => CellValue::Text(project.name().into()),
            ColumnId::Metric(key) => {
                let raw = project.measure(key).and_then(|m| m.raw_value.as_deref());
                CellValue::Metric(self.catalog.cast(key, raw))
            }
            ColumnId::AnalysisDate => CellValue::Date(project.analysis_date()),
        }
    }

    /// Render a value previously extracted by [`Column::value`] for the same project.
    #[must_use]
    pub fn render(&self, value: &CellValue, project: &Project) -> Cell {
        match (&self.id, value) {
            (ColumnId::Status, CellValue::Status(status)) => status_glyph(status).map_or(Cell::Empty, |glyph| Cell::Glyph {
                glyph,
                alt: status.clone(),
            }),
            (ColumnId::Name, CellValue::Text(name)) => Cell::Link {
                text: name.to_string(),
                href: format!("{}{}", self.dashboard_url, utf8_percent_encode(project.key(), URI_KEEP)),
            },
            (ColumnId::Metric(key), CellValue::Metric(metric)) => Cell::Metric {
                class: metric_class(project, key),
                text: self.format_metric(key, metric.as_ref()),
            },
            (ColumnId::AnalysisDate, CellValue::Date(date)) => Cell::Text(format_relative(*date, self.now)),
            (id, other) => {
                log::debug!("column '{id}' cannot render value {other:?}");
                Cell::Empty
            }
        }
    }

    fn format_metric(&self, key: &str, value: Option<&MetricValue>) -> Option<String> {
        if self.catalog.contains(key) {
            self.catalog.format(key, value)
        } else {
            None
        }
    }
}

/// Assembles the ordered table columns: status, name, one per metric, and last analysis.
#[derive(Debug)]
pub struct ColumnBuilder<'a> {
    catalog: &'a MetricCatalog,
    metric_keys: &'a [CompactString],
    dashboard_url: &'a str,
    now: DateTime<Utc>,
}

impl<'a> ColumnBuilder<'a> {
    /// Metric columns follow `metric_keys`; when it is empty they follow the catalog's order.
    #[must_use]
    pub const fn new(catalog: &'a MetricCatalog, metric_keys: &'a [CompactString], dashboard_url: &'a str, now: DateTime<Utc>) -> Self {
        Self {
            catalog,
            metric_keys,
            dashboard_url,
            now,
        }
    }

    /// Keys that would repeat a column id (a fixed column's or an earlier metric's) are skipped,
    /// so every column id in the result is unique.
    #[must_use]
    pub fn build(&self) -> Vec<Column<'a>> {
        let requested: Vec<CompactString> = if self.metric_keys.is_empty() {
            self.catalog.keys().map(CompactString::from).collect()
        } else {
            self.metric_keys.to_vec()
        };

        let mut metric_keys: Vec<CompactString> = Vec::with_capacity(requested.len());
        for key in requested {
            if [STATUS_COLUMN_ID, NAME_COLUMN_ID, DATE_COLUMN_ID].contains(&key.as_str()) {
                log::warn!("metric '{key}' is not shown as its key is a reserved column id");
            } else if metric_keys.contains(&key) {
                log::debug!("metric '{key}' is requested more than once");
            } else {
                metric_keys.push(key);
            }
        }

        let mut columns = Vec::with_capacity(metric_keys.len() + 3);
        columns.push(self.column(ColumnId::Status, String::new(), None));
        columns.push(self.column(ColumnId::Name, "Name".to_string(), None));
        for key in metric_keys {
            let header = self.catalog.name(&key).unwrap_or_default().to_string();
            columns.push(self.column(ColumnId::Metric(key), header, None));
        }
        columns.push(self.column(ColumnId::AnalysisDate, "Last Analysis".to_string(), Some(SortDirection::Descending)));
        columns
    }

    const fn column(&self, id: ColumnId, header: String, default_sort: Option<SortDirection>) -> Column<'a> {
        Column {
            id,
            header,
            default_sort,
            catalog: self.catalog,
            dashboard_url: self.dashboard_url,
            now: self.now,
        }
    }
}
