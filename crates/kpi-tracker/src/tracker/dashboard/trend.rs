use chrono::NaiveDate;
use serde::Serialize;

use super::super::domain::{DayData, TaskStatus};
use super::super::scoring::{compute_kpi, day_leaves, round1};

/// One day on the dashboard time axis. `actual_kpi` is recomputed from the
/// task list; the stored cache is display-only and never read here.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendPoint {
    pub date: NaiveDate,
    pub actual_kpi: f64,
    pub target_kpi: u8,
    pub expense: f64,
    pub completion_rate: f64,
    pub time_estimated_hours: f64,
    pub time_actual_hours: f64,
}

pub(super) fn trend_points(days: &[&DayData]) -> Vec<TrendPoint> {
    days.iter().map(|day| trend_point(day)).collect()
}

fn trend_point(day: &DayData) -> TrendPoint {
    let leaves = day_leaves(&day.tasks);

    let completion_rate = if leaves.is_empty() {
        0.0
    } else {
        let done = leaves
            .iter()
            .filter(|leaf| leaf.status == TaskStatus::Done)
            .count();
        done as f64 / leaves.len() as f64 * 100.0
    };

    let estimated_minutes: u32 = leaves.iter().map(|leaf| leaf.time_estimated).sum();
    let actual_minutes: u32 = leaves.iter().map(|leaf| leaf.time_actual).sum();

    TrendPoint {
        date: day.date,
        actual_kpi: compute_kpi(&day.tasks),
        target_kpi: day.target_kpi,
        expense: day.expense,
        completion_rate,
        time_estimated_hours: round1(f64::from(estimated_minutes) / 60.0),
        time_actual_hours: round1(f64::from(actual_minutes) / 60.0),
    }
}
