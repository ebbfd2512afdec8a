use compact_str::CompactString;

/// A measure value after casting.
///
/// Numeric kinds produce [`MetricValue::Number`], which may hold `NaN` when the raw
/// value was not a number. Everything else, including an empty raw value for a
/// numeric kind, is carried as [`MetricValue::Text`].
#[derive(Debug, Clone, PartialEq)]
pub enum MetricValue {
    Number(f64),
    Text(CompactString),
}
