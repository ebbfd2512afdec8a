//! Project records as delivered by the service
//!
//! A [`Project`] carries its raw [`Measure`]s and, optionally, the quality-gate
//! evaluation the service computed for it ([`ProjectStatus`] with its
//! [`Condition`]s). Projects are immutable once built: measures and conditions
//! are indexed by metric key at construction so that lookups are explicit
//! `Option`s rather than repeated scans.

mod analysis_date;
mod gate_status;
mod project;

pub use gate_status::{ConditionStatus, GateStatus};
pub use project::{Condition, Measure, Project, ProjectStatus};
