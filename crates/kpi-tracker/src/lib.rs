//! Core library for the daily-task KPI tracker: domain model, scoring and
//! aggregation engines, the persistence contract, and the HTTP router the
//! service binary mounts.

pub mod config;
pub mod error;
pub mod telemetry;
pub mod tracker;

pub use tracker::compute_kpi;
