use compact_str::CompactString;
use core::fmt;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// The value type the service declares for a metric.
///
/// Kinds other than the five the dashboard understands are kept verbatim in
/// [`MetricKind::Other`] and handled like [`MetricKind::String`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum MetricKind {
    Int,
    Float,
    Percent,
    Millisec,
    String,
    Other(CompactString),
}

impl MetricKind {
    #[must_use]
    pub fn parse(s: &str) -> Self {
        match s {
            "INT" => Self::Int,
            "FLOAT" => Self::Float,
            "PERCENT" => Self::Percent,
            "MILLISEC" => Self::Millisec,
            "STRING" => Self::String,
            other => Self::Other(other.into()),
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Int => "INT",
            Self::Float => "FLOAT",
            Self::Percent => "PERCENT",
            Self::Millisec => "MILLISEC",
            Self::String => "STRING",
            Self::Other(name) => name.as_str(),
        }
    }

    /// Whether raw values of this kind are parsed as numbers.
    #[must_use]
    pub const fn is_numeric(&self) -> bool {
        matches!(self, Self::Int | Self::Float | Self::Percent | Self::Millisec)
    }
}

impl fmt::Display for MetricKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for MetricKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for MetricKind {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = CompactString::deserialize(deserializer)?;
        Ok(Self::parse(&s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_kinds() {
        assert_eq!(MetricKind::parse("INT"), MetricKind::Int);
        assert_eq!(MetricKind::parse("FLOAT"), MetricKind::Float);
        assert_eq!(MetricKind::parse("PERCENT"), MetricKind::Percent);
        assert_eq!(MetricKind::parse("MILLISEC"), MetricKind::Millisec);
        assert_eq!(MetricKind::parse("STRING"), MetricKind::String);
    }

    #[test]
    fn test_parse_unknown_kind_is_kept() {
        let kind = MetricKind::parse("WORK_DUR");
        assert_eq!(kind, MetricKind::Other("WORK_DUR".into()));
        assert_eq!(kind.as_str(), "WORK_DUR");
        assert!(!kind.is_numeric());
    }

    #[test]
    fn test_parse_is_case_sensitive() {
        assert_eq!(MetricKind::parse("int"), MetricKind::Other("int".into()));
    }

    #[test]
    fn test_is_numeric() {
        assert!(MetricKind::Int.is_numeric());
        assert!(MetricKind::Float.is_numeric());
        assert!(MetricKind::Percent.is_numeric());
        assert!(MetricKind::Millisec.is_numeric());
        assert!(!MetricKind::String.is_numeric());
    }

    #[test]
    fn test_deserialize_from_json() {
        let kinds: Vec<MetricKind> = serde_json::from_str(r#"["PERCENT", "LEVEL"]"#).unwrap();
        assert_eq!(kinds, vec![MetricKind::Percent, MetricKind::Other("LEVEL".into())]);
    }

    #[test]
    fn test_display_matches_wire_name() {
        assert_eq!(MetricKind::Millisec.to_string(), "MILLISEC");
        assert_eq!(MetricKind::Other("RATING".into()).to_string(), "RATING");
    }
}
