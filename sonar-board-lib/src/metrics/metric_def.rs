use super::MetricKind;
use compact_str::CompactString;
use serde::{Deserialize, Serialize};

/// A metric as described by the service's catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetricDefinition {
    pub key: CompactString,
    pub name: CompactString,
    #[serde(rename = "type")]
    pub kind: MetricKind,
}

impl MetricDefinition {
    #[must_use]
    pub fn new(key: impl Into<CompactString>, name: impl Into<CompactString>, kind: MetricKind) -> Self {
        Self {
            key: key.into(),
            name: name.into(),
            kind,
        }
    }
}
