use super::common;
use crate::Result;
use crate::table::{Cell, Column, ColumnId, Table};
use chrono::{DateTime, Local};
use core::fmt::Write;

pub fn generate<W: Write>(table: &Table<'_>, timestamp: DateTime<Local>, writer: &mut W) -> Result<()> {
    writeln!(writer, "<!DOCTYPE html>")?;
    writeln!(writer, "<html>")?;
    writeln!(writer, "<head>")?;
    writeln!(writer, "  <meta charset=\"UTF-8\">")?;
    writeln!(writer, "  <meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">")?;
    writeln!(writer, "  <title>Code Quality Dashboard</title>")?;
    write_styles(writer)?;
    writeln!(writer, "</head>")?;
    writeln!(writer, "<body>")?;

    write_header(writer, timestamp, table.rows().len())?;

    writeln!(writer, "  <table class=\"dashboard\">")?;
    writeln!(writer, "    <thead>")?;
    writeln!(writer, "      <tr>")?;
    for column in table.columns() {
        writeln!(
            writer,
            "        <th class=\"{}\" data-column=\"{}\">{}</th>",
            column_class(column),
            html_escape(column.id().as_str()),
            html_escape(column.header())
        )?;
    }
    writeln!(writer, "      </tr>")?;
    writeln!(writer, "    </thead>")?;

    writeln!(writer, "    <tbody>")?;
    if table.rows().is_empty() {
        writeln!(
            writer,
            "      <tr><td class=\"empty\" colspan=\"{}\">No projects to show</td></tr>",
            table.columns().len()
        )?;
    }
    for row in table.rows() {
        writeln!(writer, "      <tr data-project=\"{}\">", html_escape(&row.project_key))?;
        for (column, cell) in table.columns().iter().zip(&row.cells) {
            write!(writer, "        ")?;
            write_cell(writer, column, cell)?;
            writeln!(writer)?;
        }
        writeln!(writer, "      </tr>")?;
    }
    writeln!(writer, "    </tbody>")?;
    writeln!(writer, "  </table>")?;

    writeln!(writer, "</body>")?;
    writeln!(writer, "</html>")?;

    Ok(())
}

fn write_styles<W: Write>(writer: &mut W) -> Result<()> {
    writeln!(writer, "  <style>")?;
    writeln!(writer, "    :root {{")?;
    writeln!(writer, "      --bg-color: #f0f2f5;")?;
    writeln!(writer, "      --card-bg: #ffffff;")?;
    writeln!(writer, "      --text-color: #1a202c;")?;
    writeln!(writer, "      --text-secondary: #64748b;")?;
    writeln!(writer, "      --border-color: #e2e8f0;")?;
    writeln!(writer, "      --stripe-bg: #f8fafc;")?;
    writeln!(writer, "      --accent-color: #3b82f6;")?;
    writeln!(writer, "      --warn-color: #d97706;")?;
    writeln!(writer, "      --error-color: #dc2626;")?;
    writeln!(writer, "    }}")?;
    writeln!(writer, "    @media (prefers-color-scheme: dark) {{")?;
    writeln!(writer, "      :root {{")?;
    writeln!(writer, "        --bg-color: #0f172a;")?;
    writeln!(writer, "        --card-bg: #1e293b;")?;
    writeln!(writer, "        --text-color: #e2e8f0;")?;
    writeln!(writer, "        --text-secondary: #94a3b8;")?;
    writeln!(writer, "        --border-color: #334155;")?;
    writeln!(writer, "        --stripe-bg: #263044;")?;
    writeln!(writer, "        --accent-color: #60a5fa;")?;
    writeln!(writer, "        --warn-color: #fbbf24;")?;
    writeln!(writer, "        --error-color: #f87171;")?;
    writeln!(writer, "      }}")?;
    writeln!(writer, "    }}")?;

    writeln!(writer, "    * {{ box-sizing: border-box; }}")?;
    writeln!(writer, "    body {{ font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Helvetica, Arial, sans-serif; margin: 0; padding: 32px; background: var(--bg-color); color: var(--text-color); line-height: 1.5; }}")?;
    writeln!(writer, "    h1 {{ margin: 0 0 2px 0; font-size: 26px; font-weight: 700; letter-spacing: -0.5px; }}")?;
    writeln!(writer, "    .header {{ margin-bottom: 24px; }}")?;
    writeln!(writer, "    .subtitle {{ margin: 0; font-size: 13px; color: var(--text-secondary); }}")?;

    writeln!(writer, "    table.dashboard {{ width: 100%; border-collapse: collapse; background: var(--card-bg); border-radius: 12px; overflow: hidden; border: 1px solid var(--border-color); }}")?;
    writeln!(writer, "    th {{ text-align: left; font-size: 12px; text-transform: uppercase; letter-spacing: 0.6px; color: var(--text-secondary); padding: 10px 14px; border-bottom: 2px solid var(--border-color); }}")?;
    writeln!(writer, "    td {{ padding: 8px 14px; border-bottom: 1px solid var(--border-color); font-size: 14px; }}")?;
    writeln!(writer, "    tbody tr:nth-child(even) {{ background: var(--stripe-bg); }}")?;
    writeln!(writer, "    .numeric {{ text-align: right; font-variant-numeric: tabular-nums; }}")?;
    writeln!(writer, "    .status {{ width: 24px; text-align: center; }}")?;
    writeln!(writer, "    .status-dot {{ display: inline-block; width: 12px; height: 12px; border-radius: 50%; }}")?;
    writeln!(writer, "    .metric-warn {{ color: var(--warn-color); font-weight: 600; }}")?;
    writeln!(writer, "    .metric-error {{ color: var(--error-color); font-weight: 700; }}")?;
    writeln!(writer, "    .empty {{ text-align: center; color: var(--text-secondary); padding: 24px; }}")?;
    writeln!(writer, "    a {{ color: var(--accent-color); text-decoration: none; }}")?;
    writeln!(writer, "    a:hover {{ text-decoration: underline; }}")?;
    writeln!(writer, "  </style>")?;
    Ok(())
}

fn write_header<W: Write>(writer: &mut W, timestamp: DateTime<Local>, project_count: usize) -> Result<()> {
    let date = timestamp.format("%Y-%m-%d %H:%M").to_string();
    writeln!(writer, "  <div class=\"header\">")?;
    writeln!(writer, "    <h1>Code Quality Dashboard</h1>")?;
    writeln!(
        writer,
        "    <p class=\"subtitle\">{project_count} projects, produced by sonar-board {} on {date}</p>",
        env!("CARGO_PKG_VERSION")
    )?;
    writeln!(writer, "  </div>")?;
    Ok(())
}

fn column_class(column: &Column<'_>) -> &'static str {
    match column.id() {
        ColumnId::Status => "status",
        ColumnId::Name => "name",
        ColumnId::Metric(_) => "numeric",
        ColumnId::AnalysisDate => "date",
    }
}

fn write_cell<W: Write>(writer: &mut W, column: &Column<'_>, cell: &Cell) -> Result<()> {
    let class = column_class(column);
    match cell {
        Cell::Empty => write!(writer, "<td class=\"{class}\"></td>")?,
        Cell::Glyph { glyph, alt } => {
            let alt = html_escape(alt.as_str());
            write!(
                writer,
                "<td class=\"{class}\"><span class=\"status-dot status-{}\" style=\"background: {}\" title=\"{alt}\" aria-label=\"{alt}\"></span></td>",
                common::glyph_name(*glyph),
                glyph.color_hex()
            )?;
        }
        Cell::Link { text, href } => write!(
            writer,
            "<td class=\"{class}\"><a href=\"{}\" target=\"_blank\">{}</a></td>",
            html_escape(href),
            html_escape(text)
        )?,
        Cell::Metric { class: metric_class, text } => {
            let css = metric_class.css_class();
            let classes = if css.is_empty() { class.to_string() } else { format!("{class} {css}") };
            write!(
                writer,
                "<td class=\"{classes}\">{}</td>",
                text.as_deref().map(html_escape).unwrap_or_default()
            )?;
        }
        Cell::Text(text) => write!(writer, "<td class=\"{class}\">{}</td>", html_escape(text))?,
    }
    Ok(())
}

fn html_escape(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '"' => result.push_str("&quot;"),
            '\'' => result.push_str("&#39;"),
            _ => result.push(c),
        }
    }
    result
}
