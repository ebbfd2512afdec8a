use compact_str::CompactString;
use core::fmt;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// The aggregate quality-gate status of a project.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum GateStatus {
    Ok,
    Warn,
    Error,

    /// The project has no gate result.
    None,

    /// A status string the dashboard does not recognize.
    Other(CompactString),
}

impl GateStatus {
    #[must_use]
    pub fn parse(s: &str) -> Self {
        match s {
            "OK" => Self::Ok,
            "WARN" => Self::Warn,
            "ERROR" => Self::Error,
            "NONE" | "" => Self::None,
            other => Self::Other(other.into()),
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Ok => "OK",
            Self::Warn => "WARN",
            Self::Error => "ERROR",
            Self::None => "NONE",
            Self::Other(s) => s.as_str(),
        }
    }
}

impl fmt::Display for GateStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for GateStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for GateStatus {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = CompactString::deserialize(deserializer)?;
        Ok(Self::parse(&s))
    }
}

/// The outcome of one quality-gate condition.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ConditionStatus {
    Ok,
    Warn,
    Error,
    Other(CompactString),
}

impl ConditionStatus {
    #[must_use]
    pub fn parse(s: &str) -> Self {
        match s {
            "OK" => Self::Ok,
            "WARN" => Self::Warn,
            "ERROR" => Self::Error,
            other => Self::Other(other.into()),
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Ok => "OK",
            Self::Warn => "WARN",
            Self::Error => "ERROR",
            Self::Other(s) => s.as_str(),
        }
    }
}

impl fmt::Display for ConditionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for ConditionStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for ConditionStatus {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = CompactString::deserialize(deserializer)?;
        Ok(Self::parse(&s))
    }
}
