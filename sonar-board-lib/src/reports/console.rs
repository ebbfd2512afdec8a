use super::common;
use crate::Result;
use crate::status::{MetricClass, StatusGlyph};
use crate::table::{Cell, ColumnId, Table};
use core::fmt::Write;
use owo_colors::OwoColorize;
use terminal_size::{Width, terminal_size};

const GLYPH: &str = "●";
const COLUMN_GAP: &str = "  ";
const MIN_NAME_WIDTH: usize = 12;

pub fn generate<W: Write>(table: &Table<'_>, use_colors: bool, writer: &mut W) -> Result<()> {
    render(table, use_colors, get_terminal_width(), writer)
}

fn render<W: Write>(table: &Table<'_>, use_colors: bool, term_width: usize, writer: &mut W) -> Result<()> {
    let columns = table.columns();
    let rows = table.rows();

    let mut widths: Vec<usize> = columns.iter().map(|c| display_width(c.header())).collect();
    for row in rows {
        for (width, cell) in widths.iter_mut().zip(&row.cells) {
            *width = (*width).max(display_width(&plain_text(cell, use_colors)));
        }
    }

    // The name column gives up space when the table would not fit the terminal.
    if let Some(name_index) = columns.iter().position(|c| *c.id() == ColumnId::Name) {
        let others: usize = widths
            .iter()
            .enumerate()
            .filter(|&(i, _)| i != name_index)
            .map(|(_, w)| w + COLUMN_GAP.len())
            .sum();
        let available = term_width.saturating_sub(others).max(MIN_NAME_WIDTH);
        widths[name_index] = widths[name_index].min(available);
    }

    let mut line = String::new();
    for (i, column) in columns.iter().enumerate() {
        if i > 0 {
            line.push_str(COLUMN_GAP);
        }
        let text = pad(column.header(), widths[i], common::is_numeric_column(column));
        if use_colors {
            write!(line, "{}", text.bold().underline())?;
        } else {
            line.push_str(&text);
        }
    }
    writeln!(writer, "{}", line.trim_end())?;

    if !use_colors {
        let total = widths.iter().sum::<usize>() + COLUMN_GAP.len() * widths.len().saturating_sub(1);
        writeln!(writer, "{}", "-".repeat(total))?;
    }

    if rows.is_empty() {
        writeln!(writer, "No projects to show")?;
        return Ok(());
    }

    for row in rows {
        line.clear();
        for (i, (column, cell)) in columns.iter().zip(&row.cells).enumerate() {
            if i > 0 {
                line.push_str(COLUMN_GAP);
            }
            let text = truncate(&plain_text(cell, use_colors), widths[i]);
            let padded = pad(&text, widths[i], common::is_numeric_column(column));
            if use_colors {
                write_colored(&mut line, cell, &padded)?;
            } else {
                line.push_str(&padded);
            }
        }
        writeln!(writer, "{}", line.trim_end())?;
    }

    Ok(())
}

/// The visible text of a cell. Without colors a glyph would not tell statuses apart,
/// so the status text is shown instead.
fn plain_text(cell: &Cell, use_colors: bool) -> String {
    match cell {
        Cell::Glyph { .. } if use_colors => GLYPH.to_string(),
        _ => cell.text().to_string(),
    }
}

fn write_colored<W: Write>(writer: &mut W, cell: &Cell, padded: &str) -> Result<()> {
    match cell {
        Cell::Glyph { glyph, .. } => match glyph {
            StatusGlyph::Green => write!(writer, "{}", padded.green())?,
            StatusGlyph::Orange => write!(writer, "{}", padded.yellow())?,
            StatusGlyph::Red => write!(writer, "{}", padded.red())?,
        },
        Cell::Metric { class, .. } => match class {
            MetricClass::Neutral => write!(writer, "{padded}")?,
            MetricClass::Warn => write!(writer, "{}", padded.yellow())?,
            MetricClass::Error => write!(writer, "{}", padded.red().bold())?,
        },
        Cell::Empty | Cell::Link { .. } | Cell::Text(_) => write!(writer, "{padded}")?,
    }
    Ok(())
}

fn display_width(s: &str) -> usize {
    s.chars().count()
}

fn pad(text: &str, width: usize, right_align: bool) -> String {
    if right_align {
        format!("{text:>width$}")
    } else {
        format!("{text:<width$}")
    }
}

fn truncate(text: &str, width: usize) -> String {
    if display_width(text) <= width {
        return text.to_string();
    }

    let mut truncated: String = text.chars().take(width.saturating_sub(1)).collect();
    truncated.push('…');
    truncated
}

/// Get the terminal width, defaulting to 120 if not detectable
fn get_terminal_width() -> usize {
    terminal_size().map_or(120, |(Width(w), _)| usize::from(w))
}
