use crate::projects::Project;
use chrono::{DateTime, TimeDelta, Utc};
use core::time::Duration;

const DEFAULT_WINDOW: Duration = Duration::from_secs(30 * 24 * 60 * 60);

/// The trailing time span within which a project must have been analyzed to be shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecencyWindow(Duration);

impl RecencyWindow {
    #[must_use]
    pub const fn new(window: Duration) -> Self {
        Self(window)
    }

    #[must_use]
    pub const fn duration(self) -> Duration {
        self.0
    }

    /// The oldest analysis date that is still too old to be shown.
    #[must_use]
    pub fn cutoff(self, now: DateTime<Utc>) -> DateTime<Utc> {
        TimeDelta::from_std(self.0)
            .ok()
            .and_then(|delta| now.checked_sub_signed(delta))
            .unwrap_or(DateTime::<Utc>::MIN_UTC)
    }
}

impl Default for RecencyWindow {
    fn default() -> Self {
        Self(DEFAULT_WINDOW)
    }
}

/// Whether `project` was analyzed strictly after `cutoff`. Projects that were never
/// analyzed are not recent.
#[must_use]
pub fn is_recent(project: &Project, cutoff: DateTime<Utc>) -> bool {
    project.analysis_date().is_some_and(|date| date > cutoff)
}
