use super::{MetricKind, MetricValue};

/// Format a metric value for display.
///
/// Returns `None` if and only if `value` is `None`.
///
/// Numbers are rendered according to `kind`:
/// - `Int`: rounded, with thousands separators (`1234` → `1,234`)
/// - `Float`: one decimal place, with thousands separators (`3.14159` → `3.1`)
/// - `Percent`: one decimal place and a `%` suffix (`12.34` → `12.3%`)
/// - anything else: the number as-is (`1500` → `1500`)
///
/// `NaN` renders as `NaN` for every kind. Text values are rendered unchanged.
#[must_use]
pub fn format_metric(kind: &MetricKind, value: Option<&MetricValue>) -> Option<String> {
    let value = value?;

    let formatted = match value {
        MetricValue::Text(text) => text.to_string(),
        MetricValue::Number(n) if !n.is_finite() => format_non_finite(*n).to_string(),
        MetricValue::Number(n) => match kind {
            MetricKind::Int => format_grouped(*n, 0),
            MetricKind::Float => format_grouped(*n, 1),
            MetricKind::Percent => format!("{}%", format_grouped(*n, 1)),
            MetricKind::Millisec | MetricKind::String | MetricKind::Other(_) => format_plain(*n),
        },
    };

    Some(formatted)
}

const fn format_non_finite(n: f64) -> &'static str {
    if n.is_nan() {
        "NaN"
    } else if n.is_sign_negative() {
        "-Infinity"
    } else {
        "Infinity"
    }
}

/// Round half away from zero to `decimals` places and insert thousands separators.
fn format_grouped(value: f64, decimals: u8) -> String {
    let factor = 10f64.powi(i32::from(decimals));
    let scaled = value * factor;
    let rounded = if scaled.is_finite() { scaled.round() / factor } else { value };

    let text = format!("{:.*}", usize::from(decimals), rounded.abs());
    let (int_part, frac_part) = text.split_once('.').map_or((text.as_str(), None), |(i, f)| (i, Some(f)));

    let mut out = String::with_capacity(text.len() + text.len() / 3 + 1);
    if rounded < 0.0 {
        out.push('-');
    }
    out.push_str(&group_thousands(int_part));
    if let Some(frac) = frac_part {
        out.push('.');
        out.push_str(frac);
    }
    out
}

fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

fn format_plain(value: f64) -> String {
    if value == 0.0 {
        // avoid rendering negative zero as "-0"
        return "0".to_string();
    }
    value.to_string()
}
