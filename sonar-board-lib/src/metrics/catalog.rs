use super::{MetricDefinition, MetricKind, MetricValue, cast, format_metric};
use compact_str::CompactString;
use core::fmt;
use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer};
use std::collections::HashMap;

/// The set of metrics known to the service, keyed by metric key.
///
/// Iteration follows the order in which definitions were added, which for a
/// deserialized catalog is the order of the keys in the service's payload.
/// An empty catalog is a valid state: it is what the dashboard renders with
/// until the catalog has been fetched.
#[derive(Debug, Clone, Default)]
pub struct MetricCatalog {
    definitions: Vec<MetricDefinition>,
    index: HashMap<CompactString, usize>,
}

impl MetricCatalog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a definition. The first definition for a key wins; returns `false` if
    /// the key was already present.
    pub fn insert(&mut self, definition: MetricDefinition) -> bool {
        if self.index.contains_key(&definition.key) {
            log::debug!("ignoring duplicate catalog entry for metric '{}'", definition.key);
            return false;
        }

        let _ = self.index.insert(definition.key.clone(), self.definitions.len());
        self.definitions.push(definition);
        true
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&MetricDefinition> {
        self.index.get(key).and_then(|&i| self.definitions.get(i))
    }

    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.index.contains_key(key)
    }

    /// Display name of a metric, or `None` while the catalog lacks it.
    #[must_use]
    pub fn name(&self, key: &str) -> Option<&str> {
        self.get(key).map(|def| def.name.as_str())
    }

    #[must_use]
    pub fn kind(&self, key: &str) -> Option<&MetricKind> {
        self.get(key).map(|def| &def.kind)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.definitions.iter().map(|def| def.key.as_str())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }

    /// Cast a raw value for `key`, or `None` if the value is absent or the catalog
    /// does not know the key yet.
    #[must_use]
    pub fn cast(&self, key: &str, raw_value: Option<&str>) -> Option<MetricValue> {
        let kind = self.kind(key)?;
        cast(raw_value, kind)
    }

    /// Format a value of metric `key` for display.
    ///
    /// Callers are expected to only format keys the catalog knows. An unknown key
    /// is not treated as fatal: the value is rendered as if it were a plain string.
    #[must_use]
    pub fn format(&self, key: &str, value: Option<&MetricValue>) -> Option<String> {
        match self.kind(key) {
            Some(kind) => format_metric(kind, value),
            None => {
                log::debug!("formatting metric '{key}' which is not in the catalog");
                format_metric(&MetricKind::String, value)
            }
        }
    }
}

impl FromIterator<MetricDefinition> for MetricCatalog {
    fn from_iter<I: IntoIterator<Item = MetricDefinition>>(iter: I) -> Self {
        let mut catalog = Self::new();
        for def in iter {
            let _ = catalog.insert(def);
        }
        catalog
    }
}

/// A catalog entry as delivered by the service, without its key.
#[derive(Debug, Deserialize)]
struct CatalogEntry {
    #[serde(default)]
    name: CompactString,
    #[serde(rename = "type")]
    kind: MetricKind,
}

struct CatalogVisitor;

impl<'de> Visitor<'de> for CatalogVisitor {
    type Value = MetricCatalog;

    fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("a map from metric key to {name, type}")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
        let mut catalog = MetricCatalog::new();
        while let Some((key, entry)) = map.next_entry::<CompactString, CatalogEntry>()? {
            let _ = catalog.insert(MetricDefinition {
                key,
                name: entry.name,
                kind: entry.kind,
            });
        }
        Ok(catalog)
    }
}

impl<'de> Deserialize<'de> for MetricCatalog {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(CatalogVisitor)
    }
}
