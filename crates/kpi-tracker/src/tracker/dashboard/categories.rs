use serde::Serialize;

use super::super::domain::{Category, DayData};
use super::super::scoring::task_leaves;

/// Rollup of leaf outcomes for one category across the selected days.
/// `performance` is the mean status coefficient as a percentage; `volume`
/// counts the contributing leaves.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryPerformance {
    pub name: String,
    pub color: String,
    pub performance: f64,
    pub volume: usize,
}

/// One entry per category with at least one matching leaf, in category list
/// order. Leaves whose task has no category, or whose id no longer resolves,
/// contribute nowhere.
pub(super) fn category_performance(
    days: &[&DayData],
    categories: &[Category],
) -> Vec<CategoryPerformance> {
    categories
        .iter()
        .filter_map(|category| {
            let mut volume = 0usize;
            let mut total_score = 0.0f64;

            for day in days {
                for task in &day.tasks {
                    if task.category_id.as_deref() != Some(category.id.as_str()) {
                        continue;
                    }
                    for leaf in task_leaves(task) {
                        volume += 1;
                        total_score += leaf.status.coefficient();
                    }
                }
            }

            if volume == 0 {
                return None;
            }

            Some(CategoryPerformance {
                name: category.name.clone(),
                color: category.color.clone(),
                performance: total_score / volume as f64 * 100.0,
                volume,
            })
        })
        .collect()
}
