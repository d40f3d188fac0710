mod categories;
mod summary;
mod trend;

pub use categories::CategoryPerformance;
pub use summary::DashboardSummary;
pub use trend::TrendPoint;

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::domain::{Category, DayData};

/// Window the dashboard aggregates over, counted in recorded days rather
/// than calendar days: "last 7" means the 7 latest dates with a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RangeSelector {
    #[serde(rename = "7")]
    Last7,
    #[serde(rename = "30")]
    Last30,
    #[serde(rename = "all")]
    All,
}

impl RangeSelector {
    pub const fn day_limit(self) -> Option<usize> {
        match self {
            Self::Last7 => Some(7),
            Self::Last30 => Some(30),
            Self::All => None,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Last7 => "last 7 days",
            Self::Last30 => "last 30 days",
            Self::All => "all time",
        }
    }
}

impl Default for RangeSelector {
    fn default() -> Self {
        Self::Last7
    }
}

/// Aggregated dashboard payload for one range selection.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Dashboard {
    pub range: RangeSelector,
    pub summary: DashboardSummary,
    pub trend: Vec<TrendPoint>,
    pub categories: Vec<CategoryPerformance>,
}

/// Roll the stored days up for one range. Total over its inputs: an empty
/// store, category list, or range yields empty series and zeroed summary.
pub fn build(
    days: &BTreeMap<NaiveDate, DayData>,
    categories: &[Category],
    range: RangeSelector,
) -> Dashboard {
    let selected = select_days(days, range);
    let trend = trend::trend_points(&selected);
    let categories = categories::category_performance(&selected, categories);
    let summary = summary::summarize(&trend);

    Dashboard {
        range,
        summary,
        trend,
        categories,
    }
}

/// Last N recorded days in ascending date order. Dates without a record are
/// never synthesized into the window.
fn select_days(days: &BTreeMap<NaiveDate, DayData>, range: RangeSelector) -> Vec<&DayData> {
    let mut selected: Vec<&DayData> = days.values().collect();
    if let Some(limit) = range.day_limit() {
        if selected.len() > limit {
            selected = selected.split_off(selected.len() - limit);
        }
    }
    selected
}
