//! Multi-format report generation for the dashboard table
//!
//! This module provides report generators that turn a rendered [`Table`](crate::table::Table)
//! into various output formats for human consumption and programmatic processing.
//!
//! # Implementation Model
//!
//! Five report generators are provided, each accessed through a `generate` function:
//! - **Console**: Aligned terminal table with colored status glyphs
//! - **CSV**: Spreadsheet-compatible format with proper escaping
//! - **HTML**: Self-contained document with embedded CSS and dark mode
//! - **Excel**: Native .xlsx format with a frozen header row
//! - **JSON**: Machine-readable structured data
//!
//! All generators consume the same table: its columns supply the headers and its
//! rows carry cells that have already been formatted and classified. Generators
//! only decide presentation; they never re-derive values or statuses.

mod common;
mod console;
mod csv;
mod excel;
mod html;
mod json;

pub use console::generate as generate_console;
pub use csv::generate as generate_csv;
pub use excel::generate as generate_xlsx;
pub use html::generate as generate_html;
pub use json::generate as generate_json;
