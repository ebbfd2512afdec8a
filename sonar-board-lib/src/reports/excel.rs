use super::common;
use crate::Result;
use crate::status::{MetricClass, StatusGlyph};
use crate::table::{Cell, Table};
use ohno::IntoAppError;
use rust_xlsxwriter::{Color, DocProperties, Format, FormatAlign, Workbook, Worksheet};
use std::io::Write;

struct Formats {
    header: Format,
    numeric: Format,
    warn: Format,
    error: Format,
    green: Format,
    orange: Format,
    red: Format,
}

impl Formats {
    fn new() -> Self {
        Self {
            header: Format::new()
                .set_bold()
                .set_background_color(Color::RGB(0x00E2_E8F0))
                .set_align(FormatAlign::Left),
            numeric: Format::new().set_align(FormatAlign::Right),
            warn: Format::new()
                .set_align(FormatAlign::Right)
                .set_font_color(Color::RGB(0x00D9_7706))
                .set_bold(),
            error: Format::new()
                .set_align(FormatAlign::Right)
                .set_font_color(Color::RGB(0x00DC_2626))
                .set_bold(),
            green: Format::new()
                .set_align(FormatAlign::Center)
                .set_background_color(Color::RGB(0x00C8_E6C9))
                .set_font_color(Color::RGB(0x002E_7D32))
                .set_bold(),
            orange: Format::new()
                .set_align(FormatAlign::Center)
                .set_background_color(Color::RGB(0x00FF_E0B2))
                .set_font_color(Color::RGB(0x00EF_6C00))
                .set_bold(),
            red: Format::new()
                .set_align(FormatAlign::Center)
                .set_background_color(Color::RGB(0x00FF_CDD2))
                .set_font_color(Color::RGB(0x00C6_2828))
                .set_bold(),
        }
    }

    const fn glyph(&self, glyph: StatusGlyph) -> &Format {
        match glyph {
            StatusGlyph::Green => &self.green,
            StatusGlyph::Orange => &self.orange,
            StatusGlyph::Red => &self.red,
        }
    }

    const fn metric(&self, class: MetricClass) -> &Format {
        match class {
            MetricClass::Neutral => &self.numeric,
            MetricClass::Warn => &self.warn,
            MetricClass::Error => &self.error,
        }
    }
}

#[expect(unused_results, reason = "rust_xlsxwriter methods return &mut Worksheet for chaining")]
pub fn generate<W: Write>(table: &Table<'_>, writer: &mut W) -> Result<()> {
    let mut workbook = Workbook::new();

    let properties = DocProperties::new().set_author("sonar-board");
    workbook.set_properties(&properties);

    let worksheet = workbook.add_worksheet().set_name("Projects")?;
    let formats = Formats::new();

    for (col_idx, column) in table.columns().iter().enumerate() {
        let col = column_index(col_idx)?;
        worksheet.write_string_with_format(0, col, common::labelled_header(column), &formats.header)?;
    }

    // Freeze the header row
    worksheet.set_freeze_panes(1, 0)?;

    for (row_idx, row) in table.rows().iter().enumerate() {
        let row_num = u32::try_from(row_idx + 1).into_app_err("too many rows for a worksheet")?;
        for (col_idx, cell) in row.cells.iter().enumerate() {
            write_cell(worksheet, row_num, column_index(col_idx)?, cell, &formats)?;
        }
    }

    worksheet.autofit();

    let data = workbook.save_to_buffer()?;
    writer.write_all(&data)?;

    Ok(())
}

#[expect(unused_results, reason = "rust_xlsxwriter methods return &mut Worksheet for chaining")]
fn write_cell(worksheet: &mut Worksheet, row: u32, col: u16, cell: &Cell, formats: &Formats) -> Result<()> {
    match cell {
        Cell::Empty | Cell::Metric { text: None, .. } => {}
        Cell::Glyph { glyph, alt } => {
            worksheet.write_string_with_format(row, col, alt.as_str(), formats.glyph(*glyph))?;
        }
        Cell::Link { text, href } => {
            if let Err(e) = worksheet.write_url_with_text(row, col, href.as_str(), text.as_str()) {
                log::debug!("writing link '{href}' as plain text: {e}");
                worksheet.write_string(row, col, text)?;
            }
        }
        Cell::Metric { class, text: Some(text) } => {
            worksheet.write_string_with_format(row, col, text, formats.metric(*class))?;
        }
        Cell::Text(text) => {
            worksheet.write_string(row, col, text)?;
        }
    }
    Ok(())
}

fn column_index(index: usize) -> Result<u16> {
    u16::try_from(index).into_app_err("too many columns for a worksheet")
}
