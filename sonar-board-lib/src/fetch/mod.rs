//! Retrieval of the metric catalog and the project list
//!
//! The dashboard needs two independent pieces of data from the service: the
//! metric catalog and the project list. Each is fetched on its own and kept in
//! its own [`FetchState`] slice of the [`Dashboard`], so a failure in one does
//! not prevent the other from being shown.
//!
//! # Implementation Model
//!
//! A [`Fetcher`] knows how to produce each slice. [`HttpFetcher`] talks to the
//! service and [`FileFetcher`] reads saved responses from disk. [`Dashboard::load`]
//! issues both requests concurrently and records each outcome.

mod dashboard;
mod fetch_state;
mod fetcher;
mod file_fetcher;
mod http_fetcher;

pub use dashboard::Dashboard;
pub use fetch_state::FetchState;
pub use fetcher::Fetcher;
pub use file_fetcher::FileFetcher;
pub use http_fetcher::{DEFAULT_CATALOG_PATH, DEFAULT_PROJECTS_PATH, HttpFetcher};

const LOG_TARGET: &str = "     fetch";
