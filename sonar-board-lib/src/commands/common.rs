//! Logging, color, and report output shared by the commands.

use super::Host;
use crate::Result;
use crate::reports::{generate_console, generate_csv, generate_html, generate_json, generate_xlsx};
use crate::table::Table;
use camino::Utf8PathBuf;
use chrono::{DateTime, Local, Utc};
use clap::{Args, ValueEnum};
use ohno::IntoAppError;
use std::fs;
use std::io::Write;

/// Color mode configuration for output
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ColorMode {
    /// Always use colors
    Always,

    /// Never use colors
    Never,

    /// Use colors if the output is a terminal, otherwise don't use colors
    Auto,
}

impl ColorMode {
    /// Whether console output should be colored
    #[must_use]
    pub fn use_colors(self) -> bool {
        match self {
            Self::Always => true,
            Self::Never => false,
            Self::Auto => {
                use std::io::{IsTerminal, stdout};
                stdout().is_terminal()
            }
        }
    }
}

/// Log level for diagnostic output
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    /// No logging output
    None,

    /// Only error messages
    Error,

    /// Warning and error messages
    Warn,

    /// Info, warning, and error messages
    Info,

    /// Debug, info, warning, and error messages
    Debug,

    /// Trace, debug, info, warning, and error messages
    Trace,
}

/// Where the dashboard table is written
#[derive(Args, Debug, Clone, Default)]
pub struct ReportArgs {
    /// Output the table to the console. This is the default when no other report is requested
    #[arg(long, help_heading = "Report Output")]
    pub console: bool,

    /// Output the table to an Excel spreadsheet file
    #[arg(long, value_name = "PATH", help_heading = "Report Output")]
    pub excel: Option<Utf8PathBuf>,

    /// Output the table to an HTML file
    #[arg(long, value_name = "PATH", help_heading = "Report Output")]
    pub html: Option<Utf8PathBuf>,

    /// Output the table to a CSV file
    #[arg(long, value_name = "PATH", help_heading = "Report Output")]
    pub csv: Option<Utf8PathBuf>,

    /// Output the table to a JSON file
    #[arg(long, value_name = "PATH", help_heading = "Report Output")]
    pub json: Option<Utf8PathBuf>,
}

impl ReportArgs {
    const fn generating_files(&self) -> bool {
        self.excel.is_some() || self.html.is_some() || self.csv.is_some() || self.json.is_some()
    }
}

/// Initialize logger based on log level
pub fn init_logging(log_level: LogLevel) {
    let level = match log_level {
        LogLevel::None => return,
        LogLevel::Error => "error",
        LogLevel::Warn => "warn",
        LogLevel::Info => "info",
        LogLevel::Debug => "debug",
        LogLevel::Trace => "trace",
    };

    let env = env_logger::Env::default().filter_or("RUST_LOG", level);

    // a logger may already be installed when commands run more than once in a process
    let _ = env_logger::Builder::from_env(env)
        .format_timestamp(None)
        .format_module_path(false)
        .format_target(matches!(log_level, LogLevel::Debug | LogLevel::Trace))
        .try_init();
}

/// Write the table to the console and to every requested report file
pub fn write_reports<H: Host>(host: &mut H, table: &Table<'_>, args: &ReportArgs, color: ColorMode, now: DateTime<Utc>) -> Result<()> {
    if args.console || !args.generating_files() {
        let mut console_output = String::new();
        generate_console(table, color.use_colors(), &mut console_output)?;
        let _ = write!(host.output(), "{console_output}");
    }

    if let Some(filename) = &args.html {
        let mut html = String::new();
        generate_html(table, now.with_timezone(&Local), &mut html)?;
        fs::write(filename, html).into_app_err_with(|| format!("writing HTML report to '{filename}'"))?;
    }

    if let Some(filename) = &args.excel {
        let mut file = fs::File::create(filename).into_app_err_with(|| format!("creating Excel report '{filename}'"))?;
        generate_xlsx(table, &mut file)?;
    }

    if let Some(filename) = &args.csv {
        let mut csv_output = String::new();
        generate_csv(table, &mut csv_output)?;
        fs::write(filename, csv_output).into_app_err_with(|| format!("writing CSV report to '{filename}'"))?;
    }

    if let Some(filename) = &args.json {
        let mut json_output = String::new();
        generate_json(table, now, &mut json_output)?;
        fs::write(filename, json_output).into_app_err_with(|| format!("writing JSON report to '{filename}'"))?;
    }

    Ok(())
}
