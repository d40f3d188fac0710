use super::domain::{Task, TaskStatus, WeightLevel};

/// Atomic scoring unit after container flattening: a sub-task, or a task
/// with no sub-tasks.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoringLeaf {
    pub weight: WeightLevel,
    pub status: TaskStatus,
    pub time_estimated: u32,
    pub time_actual: u32,
}

/// Leaves contributed by one task. A task with sub-tasks contributes each
/// sub-task and discards its own weight/status/time fields.
pub fn task_leaves(task: &Task) -> Vec<ScoringLeaf> {
    if task.sub_tasks.is_empty() {
        return vec![ScoringLeaf {
            weight: task.weight_level,
            status: task.status,
            time_estimated: task.time_estimated,
            time_actual: task.time_actual,
        }];
    }

    task.sub_tasks
        .iter()
        .map(|sub| ScoringLeaf {
            weight: sub.weight_level,
            status: sub.status,
            time_estimated: sub.time_estimated,
            time_actual: sub.time_actual,
        })
        .collect()
}

pub fn day_leaves(tasks: &[Task]) -> Vec<ScoringLeaf> {
    tasks.iter().flat_map(task_leaves).collect()
}

/// Score a day's task list on the 0-100 scale.
///
/// Each leaf's raw weight is normalized against the day's total so the
/// shares sum to 100, then scaled by the status coefficient. Total over all
/// structurally valid input: empty lists and zero total weight yield 0.
pub fn compute_kpi(tasks: &[Task]) -> f64 {
    let leaves = day_leaves(tasks);
    if leaves.is_empty() {
        return 0.0;
    }

    let total_weight: f64 = leaves.iter().map(|leaf| leaf.weight.raw_weight()).sum();
    if total_weight <= 0.0 {
        return 0.0;
    }

    let score: f64 = leaves
        .iter()
        .map(|leaf| {
            let normalized = leaf.weight.raw_weight() / total_weight * 100.0;
            normalized * leaf.status.coefficient()
        })
        .sum();

    round2(score)
}

/// Fixed-point rounding to two decimals, half away from zero.
pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

pub(crate) fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
