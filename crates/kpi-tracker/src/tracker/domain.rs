use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Importance level assigned to a task or sub-task. Raw weights are relative:
/// scoring normalizes them against the day's total, so a lone LOW task still
/// carries the whole day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WeightLevel {
    VeryHigh,
    High,
    Medium,
    LowMedium,
    Low,
}

impl WeightLevel {
    pub const fn ordered() -> [Self; 5] {
        [
            Self::VeryHigh,
            Self::High,
            Self::Medium,
            Self::LowMedium,
            Self::Low,
        ]
    }

    pub const fn raw_weight(self) -> f64 {
        match self {
            Self::VeryHigh => 40.0,
            Self::High => 30.0,
            Self::Medium => 15.0,
            Self::LowMedium => 10.0,
            Self::Low => 5.0,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::VeryHigh => "Very High",
            Self::High => "High",
            Self::Medium => "Medium",
            Self::LowMedium => "Low-Medium",
            Self::Low => "Low",
        }
    }
}

/// Completion state of a leaf. The coefficient scales the leaf's normalized
/// weight share: full credit, partial credit, or none.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskStatus {
    Done,
    Neutral,
    NotDone,
}

impl TaskStatus {
    pub const fn ordered() -> [Self; 3] {
        [Self::Done, Self::Neutral, Self::NotDone]
    }

    pub const fn coefficient(self) -> f64 {
        match self {
            Self::Done => 1.0,
            Self::Neutral => 0.25,
            Self::NotDone => 0.0,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Done => "Done",
            Self::Neutral => "Neutral",
            Self::NotDone => "Not Done",
        }
    }
}

/// Hex colors offered when creating categories; the default set draws from it.
pub const CATEGORY_PALETTE: [&str; 10] = [
    "#10b981", "#3b82f6", "#8b5cf6", "#ec4899", "#f97316", "#eab308", "#06b6d4", "#ef4444",
    "#6366f1", "#64748b",
];

/// Grouping label a task can point at. The reference is weak: deleting a
/// category leaves referencing tasks untouched, and dashboards resolve ids
/// at read time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: String,
    pub name: String,
    pub color: String,
}

impl Category {
    pub fn new(name: &str, color: &str) -> Self {
        Self {
            id: fresh_id(),
            name: name.to_string(),
            color: color.to_string(),
        }
    }

    /// Starter set persisted the first time categories are requested.
    pub fn default_set() -> Vec<Self> {
        vec![
            Self::new("Work", "#3b82f6"),
            Self::new("Sports", "#10b981"),
            Self::new("Personal Growth", "#8b5cf6"),
            Self::new("Mental Health", "#06b6d4"),
            Self::new("Finance", "#eab308"),
        ]
    }
}

/// Leaf unit under a task. Time fields are whole minutes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubTask {
    pub id: String,
    pub name: String,
    pub weight_level: WeightLevel,
    pub status: TaskStatus,
    #[serde(default)]
    pub time_estimated: u32,
    #[serde(default)]
    pub time_actual: u32,
}

impl SubTask {
    pub fn new(name: &str) -> Self {
        Self {
            id: fresh_id(),
            name: name.to_string(),
            weight_level: WeightLevel::Medium,
            status: TaskStatus::Neutral,
            time_estimated: 0,
            time_actual: 0,
        }
    }

    pub(crate) fn carried_over(&self) -> Self {
        Self {
            id: fresh_id(),
            name: self.name.clone(),
            weight_level: self.weight_level,
            status: TaskStatus::Neutral,
            time_estimated: self.time_estimated,
            time_actual: 0,
        }
    }
}

/// A day's task. With one or more sub-tasks it is a pure container: its own
/// weight, status, and time fields are ignored by scoring, and only the
/// sub-tasks count as leaves.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: String,
    pub name: String,
    pub weight_level: WeightLevel,
    pub status: TaskStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_id: Option<String>,
    #[serde(default)]
    pub time_estimated: u32,
    #[serde(default)]
    pub time_actual: u32,
    #[serde(default)]
    pub sub_tasks: Vec<SubTask>,
}

impl Task {
    pub fn new(name: &str) -> Self {
        Self {
            id: fresh_id(),
            name: name.to_string(),
            weight_level: WeightLevel::Medium,
            status: TaskStatus::Neutral,
            category_id: None,
            time_estimated: 0,
            time_actual: 0,
            sub_tasks: Vec::new(),
        }
    }

    /// Clone usable as the next day's plan: fresh ids throughout, every
    /// status reset to Neutral, actual time cleared, estimates kept.
    pub fn carried_over(&self) -> Self {
        Self {
            id: fresh_id(),
            name: self.name.clone(),
            weight_level: self.weight_level,
            status: TaskStatus::Neutral,
            category_id: self.category_id.clone(),
            time_estimated: self.time_estimated,
            time_actual: 0,
            sub_tasks: self.sub_tasks.iter().map(SubTask::carried_over).collect(),
        }
    }
}

pub(crate) const DEFAULT_TARGET_KPI: u8 = 80;

fn default_target_kpi() -> u8 {
    DEFAULT_TARGET_KPI
}

/// One tracked day. `actual_kpi` is a cache of the last computed score:
/// saving overwrites it and aggregation recomputes from `tasks` instead of
/// trusting it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DayData {
    pub date: NaiveDate,
    #[serde(default = "default_target_kpi")]
    pub target_kpi: u8,
    #[serde(default)]
    pub expense: f64,
    #[serde(default)]
    pub tasks: Vec<Task>,
    #[serde(default)]
    pub actual_kpi: f64,
}

impl DayData {
    /// Default-initialized day handed out for dates with no stored record.
    pub fn empty(date: NaiveDate) -> Self {
        Self {
            date,
            target_kpi: DEFAULT_TARGET_KPI,
            expense: 0.0,
            tasks: Vec::new(),
            actual_kpi: 0.0,
        }
    }
}

fn fresh_id() -> String {
    Uuid::new_v4().simple().to_string()
}
