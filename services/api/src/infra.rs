use chrono::NaiveDate;
use kpi_tracker::tracker::{Category, DayData, RangeSelector, StoreError, TrackerStore};
use metrics_exporter_prometheus::PrometheusHandle;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::PathBuf;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};
use tracing::warn;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

pub(crate) const DAYS_FILE: &str = "days.json";
pub(crate) const CATEGORIES_FILE: &str = "categories.json";

/// File-backed store keeping each entry as one pretty-printed JSON document
/// under the data directory. Writes go through a sibling temp file and a
/// rename so a crash never leaves a half-written entry behind.
pub(crate) struct JsonFileStore {
    data_dir: PathBuf,
}

impl JsonFileStore {
    pub(crate) fn new(data_dir: PathBuf) -> Self {
        Self { data_dir }
    }

    fn read_entry<T: DeserializeOwned>(&self, file: &str) -> Result<Option<T>, StoreError> {
        let path = self.data_dir.join(file);
        let bytes = match fs::read(&path) {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(StoreError::Io(err)),
        };

        match serde_json::from_slice(&bytes) {
            Ok(value) => Ok(Some(value)),
            Err(err) => {
                // An unreadable entry is treated like a missing one rather
                // than wedging every request behind it.
                warn!(file, %err, "stored entry does not parse, treating it as absent");
                Ok(None)
            }
        }
    }

    fn write_entry<T: Serialize>(&self, file: &str, value: &T) -> Result<(), StoreError> {
        fs::create_dir_all(&self.data_dir)?;
        let body = serde_json::to_string_pretty(value)?;

        let path = self.data_dir.join(file);
        let mut tmp_path = path.clone();
        tmp_path.set_extension("json.tmp");
        fs::write(&tmp_path, body)?;
        fs::rename(&tmp_path, &path)?;
        Ok(())
    }
}

impl TrackerStore for JsonFileStore {
    fn load_days(&self) -> Result<BTreeMap<NaiveDate, DayData>, StoreError> {
        Ok(self.read_entry(DAYS_FILE)?.unwrap_or_default())
    }

    fn save_days(&self, days: &BTreeMap<NaiveDate, DayData>) -> Result<(), StoreError> {
        self.write_entry(DAYS_FILE, days)
    }

    fn load_categories(&self) -> Result<Option<Vec<Category>>, StoreError> {
        self.read_entry(CATEGORIES_FILE)
    }

    fn save_categories(&self, categories: &[Category]) -> Result<(), StoreError> {
        self.write_entry(CATEGORIES_FILE, &categories)
    }

    fn clear(&self) -> Result<(), StoreError> {
        for file in [DAYS_FILE, CATEGORIES_FILE] {
            match fs::remove_file(self.data_dir.join(file)) {
                Ok(()) => {}
                Err(err) if err.kind() == io::ErrorKind::NotFound => {}
                Err(err) => return Err(StoreError::Io(err)),
            }
        }
        Ok(())
    }
}

/// Volatile store backing the CLI demo.
#[derive(Default)]
pub(crate) struct InMemoryTrackerStore {
    days: Mutex<BTreeMap<NaiveDate, DayData>>,
    categories: Mutex<Option<Vec<Category>>>,
}

impl TrackerStore for InMemoryTrackerStore {
    fn load_days(&self) -> Result<BTreeMap<NaiveDate, DayData>, StoreError> {
        Ok(self.days.lock().expect("store mutex poisoned").clone())
    }

    fn save_days(&self, days: &BTreeMap<NaiveDate, DayData>) -> Result<(), StoreError> {
        *self.days.lock().expect("store mutex poisoned") = days.clone();
        Ok(())
    }

    fn load_categories(&self) -> Result<Option<Vec<Category>>, StoreError> {
        Ok(self
            .categories
            .lock()
            .expect("store mutex poisoned")
            .clone())
    }

    fn save_categories(&self, categories: &[Category]) -> Result<(), StoreError> {
        *self.categories.lock().expect("store mutex poisoned") = Some(categories.to_vec());
        Ok(())
    }

    fn clear(&self) -> Result<(), StoreError> {
        self.days.lock().expect("store mutex poisoned").clear();
        *self.categories.lock().expect("store mutex poisoned") = None;
        Ok(())
    }
}

pub(crate) fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}

pub(crate) fn parse_range(raw: &str) -> Result<RangeSelector, String> {
    match raw.trim() {
        "7" => Ok(RangeSelector::Last7),
        "30" => Ok(RangeSelector::Last30),
        "all" => Ok(RangeSelector::All),
        other => Err(format!("'{other}' is not one of 7, 30, all")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kpi_tracker::tracker::{Task, TaskStatus};
    use tempfile::TempDir;

    fn sample_days() -> BTreeMap<NaiveDate, DayData> {
        let date = NaiveDate::from_ymd_opt(2026, 8, 21).expect("valid date");
        let mut day = DayData::empty(date);
        let mut task = Task::new("Write report");
        task.status = TaskStatus::Done;
        day.tasks = vec![task];
        BTreeMap::from([(date, day)])
    }

    #[test]
    fn round_trips_days_and_categories_through_disk() {
        let dir = TempDir::new().expect("temp dir");
        let store = JsonFileStore::new(dir.path().to_path_buf());

        let days = sample_days();
        store.save_days(&days).expect("save days");
        let categories = vec![Category::new("Work", "#3b82f6")];
        store.save_categories(&categories).expect("save categories");

        assert_eq!(store.load_days().expect("load days"), days);
        assert_eq!(
            store.load_categories().expect("load categories"),
            Some(categories)
        );
        // No stray temp file once the rename lands.
        assert!(!dir.path().join("days.json.tmp").exists());
    }

    #[test]
    fn missing_files_read_as_never_written() {
        let dir = TempDir::new().expect("temp dir");
        let store = JsonFileStore::new(dir.path().join("nested"));

        assert!(store.load_days().expect("load days").is_empty());
        assert_eq!(store.load_categories().expect("load categories"), None);
    }

    #[test]
    fn unparseable_entries_read_as_absent() {
        let dir = TempDir::new().expect("temp dir");
        fs::write(dir.path().join(DAYS_FILE), b"{ truncated").expect("write garbage");
        let store = JsonFileStore::new(dir.path().to_path_buf());

        assert!(store.load_days().expect("load days").is_empty());
    }

    #[test]
    fn clear_removes_entries_and_tolerates_their_absence() {
        let dir = TempDir::new().expect("temp dir");
        let store = JsonFileStore::new(dir.path().to_path_buf());
        store.save_days(&sample_days()).expect("save days");

        store.clear().expect("clear");
        assert!(!dir.path().join(DAYS_FILE).exists());

        // Clearing an already-empty directory is not an error.
        store.clear().expect("clear again");
    }

    #[test]
    fn parse_range_accepts_the_three_selectors() {
        assert_eq!(parse_range("7"), Ok(RangeSelector::Last7));
        assert_eq!(parse_range(" 30 "), Ok(RangeSelector::Last30));
        assert_eq!(parse_range("all"), Ok(RangeSelector::All));
        assert!(parse_range("90").is_err());
    }
}
