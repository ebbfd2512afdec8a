//! Command-line interface and orchestration for sonar-board
//!
//! This module implements the CLI commands and ties the fetch, table, and report
//! layers together into end-to-end workflows. It handles argument parsing,
//! configuration management, and report output.
//!
//! # Implementation Model
//!
//! ## Commands
//!
//! - **show**: Fetch the metric catalog and the project list (or read them from
//!   local files), keep the recently analyzed projects, build the table, and
//!   write it to the console and any requested report files
//! - **init**: Generate a default configuration file
//! - **validate**: Check a configuration file's syntax and values
//!
//! ## Execution Flow
//!
//! The `run` function parses command-line arguments using clap and routes
//! to the appropriate command handler. `show` follows these steps:
//!
//! 1. Set up logging and load configuration
//! 2. Fetch both data slices concurrently
//! 3. Report each slice that failed to load on the error stream
//! 4. Build the table from whatever loaded
//! 5. Generate the requested reports
//!
//! The `common` module provides shared functionality like logging setup,
//! color mode handling, and report output.

mod common;
mod config;
mod host;
mod init;
mod run;
mod show;
mod validate;

#[cfg(debug_assertions)]
pub use config::Config;

pub use host::Host;
pub use init::{InitArgs, init_config};
pub use run::run;
pub use show::{ShowArgs, show_dashboard};
pub use validate::{ValidateArgs, validate_config};
