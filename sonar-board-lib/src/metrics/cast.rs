use super::{MetricKind, MetricValue};

/// Cast a raw measure string into a typed value for the given kind.
///
/// - An absent raw value stays absent.
/// - For numeric kinds, an empty raw value is passed through as empty text rather
///   than being forced to zero, and anything that does not parse becomes `NaN`.
/// - For all other kinds the raw value is returned as text.
#[must_use]
pub fn cast(raw_value: Option<&str>, kind: &MetricKind) -> Option<MetricValue> {
    let raw = raw_value?;

    if !kind.is_numeric() || raw.is_empty() {
        return Some(MetricValue::Text(raw.into()));
    }

    Some(MetricValue::Number(parse_number(raw)))
}

fn parse_number(raw: &str) -> f64 {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        // whitespace-only is numerically zero
        return 0.0;
    }

    match trimmed {
        "Infinity" | "+Infinity" => f64::INFINITY,
        "-Infinity" => f64::NEG_INFINITY,
        _ if trimmed.chars().any(char::is_alphabetic) && !is_exponent_form(trimmed) => f64::NAN,
        _ => trimmed.parse().unwrap_or(f64::NAN),
    }
}

/// Rust's float parser accepts words like `inf` and `nan`; only the exponent marker is
/// a legitimate letter in a measure value.
fn is_exponent_form(s: &str) -> bool {
    s.chars().filter(|c| c.is_alphabetic()).all(|c| c == 'e' || c == 'E')
}
