#![doc(hidden)]
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Core library for sonar-board
//!
//! This library holds all functionality of the sonar-board tool, which shows a table of
//! code-quality metrics for the projects recently analyzed by a SonarQube-style service.
//!
//! # Module Organization
//!
//! - [`commands`]: Command-line interface and orchestration
//! - [`fetch`]: Retrieval of the metric catalog and the project list
//! - [`metrics`]: Metric catalog, value casting, and value formatting
//! - [`projects`]: Project records as delivered by the service
//! - [`status`]: Quality-gate classification of projects and metrics
//! - [`table`]: Column assembly, recency filtering, and table rendering
//! - [`reports`]: Report generation in multiple formats

pub type Result<T, E = ohno::AppError> = core::result::Result<T, E>;

#[cfg(any(debug_assertions, test))]
pub mod commands;
#[cfg(not(any(debug_assertions, test)))]
mod commands;

pub mod fetch;
pub mod metrics;
pub mod projects;
pub mod status;
pub mod table;

#[cfg(any(debug_assertions, test))]
pub mod reports;
#[cfg(not(any(debug_assertions, test)))]
mod reports;

pub use crate::commands::{Host, run};
