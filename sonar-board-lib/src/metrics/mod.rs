//! Metric catalog, value casting, and value formatting
//!
//! The service reports every measure as a raw string. This module turns those
//! strings into typed values and typed values into display text, both driven by
//! the metric catalog fetched from the service.
//!
//! # Implementation Model
//!
//! - [`MetricCatalog`] maps a metric key to its [`MetricDefinition`] (display name
//!   and [`MetricKind`]) and remembers the order in which the service listed them.
//! - [`cast`] converts a raw measure string into a [`MetricValue`] according to a kind.
//!   Casting never fails: a non-numeric value for a numeric kind becomes `NaN`.
//! - [`format_metric`] converts a [`MetricValue`] back into display text according
//!   to a kind. Formatting returns `None` exactly when there is no value.
//!
//! A key that the catalog does not know is a legitimate state (the catalog may
//! not have loaded yet), so catalog lookups return `Option` and the table layer
//! leaves such cells blank instead of guessing a kind.

mod cast;
mod catalog;
mod format;
mod metric_def;
mod metric_kind;
mod metric_value;

pub use cast::cast;
pub use catalog::MetricCatalog;
pub use format::format_metric;
pub use metric_def::MetricDefinition;
pub use metric_kind::MetricKind;
pub use metric_value::MetricValue;
