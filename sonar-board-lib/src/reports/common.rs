//! Common utilities shared across report generators.

use crate::status::StatusGlyph;
use crate::table::{Column, ColumnId};

/// Header text for surfaces that cannot show an empty header, such as CSV or spreadsheets.
pub fn labelled_header<'a>(column: &'a Column<'_>) -> &'a str {
    match column.id() {
        ColumnId::Status => "Status",
        _ => column.header(),
    }
}

/// Whether a column holds numbers that read best right-aligned.
pub const fn is_numeric_column(column: &Column<'_>) -> bool {
    matches!(column.id(), ColumnId::Metric(_))
}

pub const fn glyph_name(glyph: StatusGlyph) -> &'static str {
    match glyph {
        StatusGlyph::Green => "green",
        StatusGlyph::Orange => "orange",
        StatusGlyph::Red => "red",
    }
}
