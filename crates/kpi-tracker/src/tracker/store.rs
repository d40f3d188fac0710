use std::collections::BTreeMap;

use chrono::NaiveDate;

use super::domain::{Category, DayData};

/// Storage abstraction over the two persisted entries so the service module
/// can be exercised against memory, disk, or anything else.
///
/// `load_categories` distinguishes a never-written entry (`None`, which the
/// service seeds with defaults) from a deliberately emptied list (`Some`
/// with no elements, which stays empty).
pub trait TrackerStore: Send + Sync {
    fn load_days(&self) -> Result<BTreeMap<NaiveDate, DayData>, StoreError>;
    fn save_days(&self, days: &BTreeMap<NaiveDate, DayData>) -> Result<(), StoreError>;
    fn load_categories(&self) -> Result<Option<Vec<Category>>, StoreError>;
    fn save_categories(&self, categories: &[Category]) -> Result<(), StoreError>;
    fn clear(&self) -> Result<(), StoreError>;
}

/// Error enumeration for store failures.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("storage unavailable: {0}")]
    Io(#[from] std::io::Error),
    #[error("stored document failed to encode: {0}")]
    Encode(#[from] serde_json::Error),
}
