use crate::metrics::MetricValue;
use crate::projects::GateStatus;
use crate::status::{MetricClass, StatusGlyph};
use chrono::{DateTime, Utc};
use compact_str::CompactString;
use core::cmp::Ordering;

/// The value a column extracts from a project, before rendering. Sorting works on these.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Status(GateStatus),
    Text(CompactString),
    Metric(Option<MetricValue>),
    Date(Option<DateTime<Utc>>),
}

impl CellValue {
    /// Total order used for sorting. Absent values sort lowest, text sorts below numbers,
    /// and statuses sort by severity.
    #[must_use]
    pub fn compare(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Self::Status(a), Self::Status(b)) => status_rank(a).cmp(&status_rank(b)),
            (Self::Text(a), Self::Text(b)) => a.to_lowercase().cmp(&b.to_lowercase()).then_with(|| a.cmp(b)),
            (Self::Metric(a), Self::Metric(b)) => compare_metric(a.as_ref(), b.as_ref()),
            (Self::Date(a), Self::Date(b)) => a.cmp(b),
            _ => variant_rank(self).cmp(&variant_rank(other)),
        }
    }
}

const fn status_rank(status: &GateStatus) -> u8 {
    match status {
        GateStatus::None => 0,
        GateStatus::Other(_) => 1,
        GateStatus::Ok => 2,
        GateStatus::Warn => 3,
        GateStatus::Error => 4,
    }
}

const fn variant_rank(value: &CellValue) -> u8 {
    match value {
        CellValue::Status(_) => 0,
        CellValue::Text(_) => 1,
        CellValue::Metric(_) => 2,
        CellValue::Date(_) => 3,
    }
}

fn compare_metric(a: Option<&MetricValue>, b: Option<&MetricValue>) -> Ordering {
    match (a, b) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (Some(MetricValue::Text(a)), Some(MetricValue::Text(b))) => a.cmp(b),
        (Some(MetricValue::Text(_)), Some(MetricValue::Number(_))) => Ordering::Less,
        (Some(MetricValue::Number(_)), Some(MetricValue::Text(_))) => Ordering::Greater,
        (Some(MetricValue::Number(a)), Some(MetricValue::Number(b))) => a.total_cmp(b),
    }
}

/// A rendered table cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Cell {
    Empty,

    /// A status indicator; `alt` is the status text for non-graphical surfaces.
    Glyph { glyph: StatusGlyph, alt: GateStatus },

    /// Text linking to an external page.
    Link { text: String, href: String },

    /// A formatted metric, `None` when the project has no value for it.
    Metric { class: MetricClass, text: Option<String> },

    Text(String),
}

impl Cell {
    /// The plain-text content of the cell.
    #[must_use]
    pub fn text(&self) -> &str {
        match self {
            Self::Empty => "",
            Self::Glyph { alt, .. } => alt.as_str(),
            Self::Link { text, .. } | Self::Text(text) => text,
            Self::Metric { text, .. } => text.as_deref().unwrap_or(""),
        }
    }

    #[must_use]
    pub const fn class(&self) -> MetricClass {
        match self {
            Self::Metric { class, .. } => *class,
            _ => MetricClass::Neutral,
        }
    }
}
