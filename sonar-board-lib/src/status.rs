//! Quality-gate classification of projects and metrics
//!
//! The service evaluates each project against a quality gate. This module reads
//! that evaluation back: the project's overall [`GateStatus`], the [`MetricClass`]
//! of individual metrics, and the [`StatusGlyph`] reports draw for a status.
//! Every function here is total. Missing status data classifies as neutral.

use crate::projects::{ConditionStatus, GateStatus, Project};

/// The overall gate status of a project, or [`GateStatus::None`] when the project
/// has no gate result.
#[must_use]
pub fn project_status(project: &Project) -> GateStatus {
    project
        .status()
        .and_then(|status| status.status.clone())
        .unwrap_or(GateStatus::None)
}

/// Visual classification of a single metric cell.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum MetricClass {
    #[default]
    Neutral,
    Warn,
    Error,
}

impl MetricClass {
    /// The style class reports attach to a metric cell; empty for neutral cells.
    #[must_use]
    pub const fn css_class(self) -> &'static str {
        match self {
            Self::Neutral => "",
            Self::Warn => "metric-warn",
            Self::Error => "metric-error",
        }
    }
}

/// Classify metric `metric_key` of a project by the first quality-gate condition on it.
#[must_use]
pub fn metric_class(project: &Project, metric_key: &str) -> MetricClass {
    match project.condition(metric_key).and_then(|c| c.status.as_ref()) {
        Some(ConditionStatus::Warn) => MetricClass::Warn,
        Some(ConditionStatus::Error) => MetricClass::Error,
        Some(ConditionStatus::Ok | ConditionStatus::Other(_)) | None => MetricClass::Neutral,
    }
}

/// The indicator drawn in the status column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatusGlyph {
    Green,
    Orange,
    Red,
}

impl StatusGlyph {
    #[must_use]
    pub const fn color_hex(self) -> &'static str {
        match self {
            Self::Green => "#2e7d32",
            Self::Orange => "#ef6c00",
            Self::Red => "#c62828",
        }
    }
}

/// The glyph for a gate status. Only an exact `OK`, `WARN`, or `ERROR` gets one.
#[must_use]
pub const fn status_glyph(status: &GateStatus) -> Option<StatusGlyph> {
    match status {
        GateStatus::Ok => Some(StatusGlyph::Green),
        GateStatus::Warn => Some(StatusGlyph::Orange),
        GateStatus::Error => Some(StatusGlyph::Red),
        GateStatus::None | GateStatus::Other(_) => None,
    }
}
