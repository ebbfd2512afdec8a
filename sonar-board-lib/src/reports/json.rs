use super::common;
use crate::Result;
use crate::metrics::MetricValue;
use crate::status::MetricClass;
use crate::table::{Cell, CellValue, Table};
use chrono::{DateTime, SecondsFormat, Utc};
use core::fmt::Write;
use serde_json::json;

#[expect(unused_results, reason = "Map::insert intentionally overwrites values")]
pub fn generate<W: Write>(table: &Table<'_>, generated: DateTime<Utc>, writer: &mut W) -> Result<()> {
    let columns: Vec<_> = table
        .columns()
        .iter()
        .map(|c| json!({ "id": c.id().as_str(), "header": c.header() }))
        .collect();

    let mut rows = Vec::with_capacity(table.rows().len());
    for row in table.rows() {
        let mut row_obj = serde_json::Map::new();
        for ((column, cell), value) in table.columns().iter().zip(&row.cells).zip(&row.values) {
            row_obj.insert(column.id().as_str().to_string(), cell_to_json(cell, value));
        }
        rows.push(json!(row_obj));
    }

    let output = json!({
        "generated": generated.to_rfc3339_opts(SecondsFormat::Secs, true),
        "columns": columns,
        "rows": rows,
    });

    write!(writer, "{}", serde_json::to_string_pretty(&output)?)?;
    Ok(())
}

fn cell_to_json(cell: &Cell, value: &CellValue) -> serde_json::Value {
    match cell {
        Cell::Empty => json!(null),
        Cell::Glyph { glyph, alt } => json!({ "status": alt.as_str(), "glyph": common::glyph_name(*glyph) }),
        Cell::Link { text, href } => json!({ "text": text, "href": href }),
        Cell::Metric { class, text } => {
            let class = match class {
                MetricClass::Neutral => json!(null),
                MetricClass::Warn | MetricClass::Error => json!(class.css_class()),
            };
            json!({ "text": text, "value": raw_value_to_json(value), "class": class })
        }
        Cell::Text(text) => json!({ "text": text, "value": raw_value_to_json(value) }),
    }
}

fn raw_value_to_json(value: &CellValue) -> serde_json::Value {
    match value {
        CellValue::Metric(Some(MetricValue::Number(n))) if n.is_finite() => json!(n),
        CellValue::Metric(Some(MetricValue::Text(s))) => json!(s.as_str()),
        CellValue::Date(Some(date)) => json!(date.to_rfc3339_opts(SecondsFormat::Secs, true)),
        CellValue::Status(status) => json!(status.as_str()),
        CellValue::Text(s) => json!(s.as_str()),
        CellValue::Metric(_) | CellValue::Date(None) => json!(null),
    }
}
