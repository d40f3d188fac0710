use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::{Duration, NaiveDate, Utc};
use serde::Serialize;

use super::backup::{self, BackupDocument, BackupError, RestoredData};
use super::dashboard::{self, Dashboard, RangeSelector};
use super::domain::{Category, DayData, Task};
use super::scoring::compute_kpi;
use super::store::{StoreError, TrackerStore};

/// Service composing the store with the scoring and aggregation engines.
/// Every mutation funnels through here so derived state stays consistent:
/// saves recompute the cached score, first category access seeds defaults,
/// and imports replace both entries or nothing.
pub struct TrackerService<S> {
    store: Arc<S>,
}

impl<S> TrackerService<S>
where
    S: TrackerStore + 'static,
{
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Stored record for the date, or a default-initialized day. Synthesized
    /// days are not persisted until explicitly saved.
    pub fn day(&self, date: NaiveDate) -> Result<DayData, TrackerError> {
        let days = self.store.load_days()?;
        Ok(days
            .get(&date)
            .cloned()
            .unwrap_or_else(|| DayData::empty(date)))
    }

    pub fn all_days(&self) -> Result<BTreeMap<NaiveDate, DayData>, TrackerError> {
        Ok(self.store.load_days()?)
    }

    /// Persist a day, overwriting any record for that date. The cached score
    /// is recomputed from the task list and the target clamped to 100.
    pub fn save_day(&self, mut day: DayData) -> Result<DayData, TrackerError> {
        day.target_kpi = day.target_kpi.min(100);
        day.actual_kpi = compute_kpi(&day.tasks);

        let mut days = self.store.load_days()?;
        days.insert(day.date, day.clone());
        self.store.save_days(&days)?;
        Ok(day)
    }

    /// Stored categories, seeding and persisting the default set the first
    /// time. An emptied list is a deliberate state and is never reseeded.
    pub fn categories(&self) -> Result<Vec<Category>, TrackerError> {
        match self.store.load_categories()? {
            Some(categories) => Ok(categories),
            None => {
                let seeded = Category::default_set();
                self.store.save_categories(&seeded)?;
                Ok(seeded)
            }
        }
    }

    /// Replace the category list wholesale. Tasks keep whatever ids they
    /// reference; dangling ids simply stop resolving.
    pub fn save_categories(&self, categories: Vec<Category>) -> Result<Vec<Category>, TrackerError> {
        self.store.save_categories(&categories)?;
        Ok(categories)
    }

    pub fn dashboard(&self, range: RangeSelector) -> Result<Dashboard, TrackerError> {
        let days = self.store.load_days()?;
        let categories = self.categories()?;
        Ok(dashboard::build(&days, &categories, range))
    }

    /// Append the previous day's tasks to `date` as a fresh plan: new ids,
    /// Neutral statuses, actual time cleared.
    pub fn carry_over(&self, date: NaiveDate) -> Result<DayData, TrackerError> {
        let source_date = date - Duration::days(1);
        let days = self.store.load_days()?;

        let carried: Vec<Task> = match days.get(&source_date) {
            Some(previous) if !previous.tasks.is_empty() => {
                previous.tasks.iter().map(Task::carried_over).collect()
            }
            _ => return Err(TrackerError::NothingToCarryOver { date: source_date }),
        };

        let mut day = days
            .get(&date)
            .cloned()
            .unwrap_or_else(|| DayData::empty(date));
        day.tasks.extend(carried);
        self.save_day(day)
    }

    /// Snapshot both entries into a versioned export document.
    pub fn export_backup(&self) -> Result<BackupDocument, TrackerError> {
        Ok(BackupDocument {
            version: backup::BACKUP_VERSION.to_string(),
            export_date: Utc::now(),
            data: self.store.load_days()?,
            categories: self.categories()?,
        })
    }

    /// Validate a backup payload and wholesale-replace both entries. A
    /// rejected document leaves the store untouched.
    pub fn import_backup(&self, value: serde_json::Value) -> Result<BackupSummary, TrackerError> {
        let restored = backup::restore(value)?;
        self.replace_with(restored)
    }

    /// Import from raw file bytes, e.g. a backup document on disk.
    pub fn import_backup_slice(&self, bytes: &[u8]) -> Result<BackupSummary, TrackerError> {
        let restored = backup::restore_slice(bytes)?;
        self.replace_with(restored)
    }

    fn replace_with(&self, restored: RestoredData) -> Result<BackupSummary, TrackerError> {
        self.store.save_days(&restored.data)?;
        self.store.save_categories(&restored.categories)?;
        Ok(BackupSummary {
            days: restored.data.len(),
            categories: restored.categories.len(),
        })
    }

    /// Erase both entries. Confirmation is the caller's concern; this
    /// executes immediately.
    pub fn clear_all(&self) -> Result<(), TrackerError> {
        Ok(self.store.clear()?)
    }
}

/// Counts reported after a successful import.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BackupSummary {
    pub days: usize,
    pub categories: usize,
}

/// Error raised by tracker operations.
#[derive(Debug, thiserror::Error)]
pub enum TrackerError {
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error(transparent)]
    Backup(#[from] BackupError),
    #[error("no tasks recorded on {date} to carry over")]
    NothingToCarryOver { date: NaiveDate },
}
