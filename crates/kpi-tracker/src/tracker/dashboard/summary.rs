use serde::Serialize;

use super::trend::TrendPoint;

/// Headline numbers for the selected range, derived from the trend series.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    pub days_tracked: usize,
    pub average_kpi: f64,
    pub success_rate: f64,
    pub total_expense: f64,
    pub total_estimated_hours: f64,
    pub total_actual_hours: f64,
}

pub(super) fn summarize(trend: &[TrendPoint]) -> DashboardSummary {
    if trend.is_empty() {
        return DashboardSummary {
            days_tracked: 0,
            average_kpi: 0.0,
            success_rate: 0.0,
            total_expense: 0.0,
            total_estimated_hours: 0.0,
            total_actual_hours: 0.0,
        };
    }

    let days = trend.len() as f64;
    let kpi_sum: f64 = trend.iter().map(|point| point.actual_kpi).sum();
    let on_target = trend
        .iter()
        .filter(|point| point.actual_kpi >= f64::from(point.target_kpi))
        .count();

    DashboardSummary {
        days_tracked: trend.len(),
        average_kpi: kpi_sum / days,
        success_rate: on_target as f64 / days * 100.0,
        total_expense: trend.iter().map(|point| point.expense).sum(),
        total_estimated_hours: trend.iter().map(|point| point.time_estimated_hours).sum(),
        total_actual_hours: trend.iter().map(|point| point.time_actual_hours).sum(),
    }
}
