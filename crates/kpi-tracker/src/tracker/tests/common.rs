use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

use chrono::NaiveDate;
use serde_json::Value;

use crate::tracker::domain::{Category, DayData, SubTask, Task, TaskStatus, WeightLevel};
use crate::tracker::service::TrackerService;
use crate::tracker::store::{StoreError, TrackerStore};

pub(super) fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid date")
}

pub(super) fn task(name: &str, weight: WeightLevel, status: TaskStatus) -> Task {
    let mut task = Task::new(name);
    task.weight_level = weight;
    task.status = status;
    task
}

pub(super) fn sub_task(name: &str, weight: WeightLevel, status: TaskStatus) -> SubTask {
    let mut sub = SubTask::new(name);
    sub.weight_level = weight;
    sub.status = status;
    sub
}

pub(super) fn categorized_task(
    name: &str,
    weight: WeightLevel,
    status: TaskStatus,
    category_id: &str,
) -> Task {
    let mut task = task(name, weight, status);
    task.category_id = Some(category_id.to_string());
    task
}

pub(super) fn day_with_tasks(date: NaiveDate, tasks: Vec<Task>) -> DayData {
    let mut day = DayData::empty(date);
    day.tasks = tasks;
    day
}

pub(super) fn build_service() -> (Arc<TrackerService<MemoryStore>>, Arc<MemoryStore>) {
    let store = Arc::new(MemoryStore::default());
    let service = Arc::new(TrackerService::new(store.clone()));
    (service, store)
}

#[derive(Default)]
pub(super) struct MemoryStore {
    days: Mutex<BTreeMap<NaiveDate, DayData>>,
    categories: Mutex<Option<Vec<Category>>>,
}

impl TrackerStore for MemoryStore {
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

pub(super) struct UnavailableStore;

fn offline() -> StoreError {
    StoreError::Io(std::io::Error::new(
        std::io::ErrorKind::Other,
        "storage offline",
    ))
}

impl TrackerStore for UnavailableStore {
    fn load_days(&self) -> Result<BTreeMap<NaiveDate, DayData>, StoreError> {
        Err(offline())
    }

    fn save_days(&self, _days: &BTreeMap<NaiveDate, DayData>) -> Result<(), StoreError> {
        Err(offline())
    }

    fn load_categories(&self) -> Result<Option<Vec<Category>>, StoreError> {
        Err(offline())
    }

    fn save_categories(&self, _categories: &[Category]) -> Result<(), StoreError> {
        Err(offline())
    }

    fn clear(&self) -> Result<(), StoreError> {
        Err(offline())
    }
}

pub(super) async fn read_json_body(response: axum::response::Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
