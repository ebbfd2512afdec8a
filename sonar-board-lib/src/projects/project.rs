use super::analysis_date;
use super::{ConditionStatus, GateStatus};
use chrono::{DateTime, Utc};
use compact_str::CompactString;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A raw value for one metric.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Measure {
    #[serde(rename = "metric", alias = "metricKey")]
    pub metric_key: CompactString,

    #[serde(rename = "value", alias = "rawValue", default)]
    pub raw_value: Option<String>,
}

impl Measure {
    #[must_use]
    pub fn new(metric_key: impl Into<CompactString>, raw_value: impl Into<String>) -> Self {
        Self {
            metric_key: metric_key.into(),
            raw_value: Some(raw_value.into()),
        }
    }
}

/// The evaluated quality-gate outcome for one metric.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Condition {
    pub metric_key: CompactString,
    #[serde(default)]
    pub status: Option<ConditionStatus>,
}

impl Condition {
    #[must_use]
    pub fn new(metric_key: impl Into<CompactString>, status: ConditionStatus) -> Self {
        Self {
            metric_key: metric_key.into(),
            status: Some(status),
        }
    }
}

/// The quality-gate evaluation of a project.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectStatus {
    #[serde(default, deserialize_with = "deserialize_gate_status")]
    pub status: Option<GateStatus>,

    #[serde(default)]
    pub conditions: Option<Vec<Condition>>,
}

impl ProjectStatus {
    #[must_use]
    pub const fn new(status: GateStatus, conditions: Vec<Condition>) -> Self {
        Self {
            status: Some(status),
            conditions: Some(conditions),
        }
    }
}

/// An empty status string means the same as no status at all.
fn deserialize_gate_status<'de, D: serde::Deserializer<'de>>(deserializer: D) -> Result<Option<GateStatus>, D::Error> {
    let raw = Option::<CompactString>::deserialize(deserializer)?;
    Ok(raw.filter(|s| !s.is_empty()).map(|s| GateStatus::parse(&s)))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ProjectRecord {
    key: CompactString,
    #[serde(default)]
    name: CompactString,
    #[serde(default, deserialize_with = "analysis_date::deserialize")]
    analysis_date: Option<DateTime<Utc>>,
    #[serde(default)]
    measures: Vec<Measure>,
    #[serde(default)]
    status: Option<ProjectStatus>,
}

/// A project with its measures and quality-gate evaluation.
#[derive(Debug, Clone, Deserialize)]
#[serde(from = "ProjectRecord")]
pub struct Project {
    key: CompactString,
    name: CompactString,
    analysis_date: Option<DateTime<Utc>>,
    measures: Vec<Measure>,
    status: Option<ProjectStatus>,
    measure_index: HashMap<CompactString, usize>,
    condition_index: HashMap<CompactString, usize>,
}

impl From<ProjectRecord> for Project {
    fn from(record: ProjectRecord) -> Self {
        let mut project = Self::new(record.key, record.name);
        project.analysis_date = record.analysis_date;
        for measure in record.measures {
            project = project.with_measure(measure);
        }
        if let Some(status) = record.status {
            project = project.with_status(status);
        }
        project
    }
}

impl Project {
    #[must_use]
    pub fn new(key: impl Into<CompactString>, name: impl Into<CompactString>) -> Self {
        Self {
            key: key.into(),
            name: name.into(),
            analysis_date: None,
            measures: Vec::new(),
            status: None,
            measure_index: HashMap::new(),
            condition_index: HashMap::new(),
        }
    }

    #[must_use]
    pub const fn with_analysis_date(mut self, analysis_date: DateTime<Utc>) -> Self {
        self.analysis_date = Some(analysis_date);
        self
    }

    /// Add a measure. When a project carries several measures for the same key, the
    /// first one is the one that lookups return.
    #[must_use]
    pub fn with_measure(mut self, measure: Measure) -> Self {
        let _ = self.measure_index.entry(measure.metric_key.clone()).or_insert(self.measures.len());
        self.measures.push(measure);
        self
    }

    /// Set the quality-gate evaluation, replacing any previous one.
    #[must_use]
    pub fn with_status(mut self, status: ProjectStatus) -> Self {
        self.condition_index.clear();
        for (i, condition) in status.conditions.iter().flatten().enumerate() {
            let _ = self.condition_index.entry(condition.metric_key.clone()).or_insert(i);
        }
        self.status = Some(status);
        self
    }

    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub const fn analysis_date(&self) -> Option<DateTime<Utc>> {
        self.analysis_date
    }

    #[must_use]
    pub fn measures(&self) -> &[Measure] {
        &self.measures
    }

    #[must_use]
    pub const fn status(&self) -> Option<&ProjectStatus> {
        self.status.as_ref()
    }

    /// The measure for `metric_key`, if the project has one.
    #[must_use]
    pub fn measure(&self, metric_key: &str) -> Option<&Measure> {
        self.measure_index.get(metric_key).and_then(|&i| self.measures.get(i))
    }

    /// The quality-gate condition for `metric_key`, if the project has one.
    #[must_use]
    pub fn condition(&self, metric_key: &str) -> Option<&Condition> {
        let conditions = self.status.as_ref()?.conditions.as_ref()?;
        self.condition_index.get(metric_key).and_then(|&i| conditions.get(i))
    }
}
