//! Daily-task KPI tracking.
//!
//! A day holds weighted tasks, optionally split into sub-tasks; the scoring
//! engine turns the day's leaves into a normalized 0-100 score, and the
//! dashboard module rolls recorded days up into trend, category, and summary
//! statistics. Persistence sits behind the [`store::TrackerStore`] trait so
//! the service can run against disk, memory, or anything else.

pub mod backup;
pub mod dashboard;
pub mod domain;
pub mod router;
pub mod scoring;
pub mod service;
pub mod store;

#[cfg(test)]
mod tests;

pub use backup::{BackupDocument, BackupError, RestoredData, BACKUP_VERSION};
pub use dashboard::{
    CategoryPerformance, Dashboard, DashboardSummary, RangeSelector, TrendPoint,
};
pub use domain::{Category, DayData, SubTask, Task, TaskStatus, WeightLevel, CATEGORY_PALETTE};
pub use router::tracker_router;
pub use scoring::compute_kpi;
pub use service::{BackupSummary, TrackerError, TrackerService};
pub use store::{StoreError, TrackerStore};
