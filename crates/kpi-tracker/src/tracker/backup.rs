use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::domain::{Category, DayData};

pub const BACKUP_VERSION: &str = "1.0";

/// Wire format of an exported snapshot: the whole day mapping plus the
/// category list under version metadata. Import only requires `data` and
/// `categories`; `version` and `exportDate` are informational.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BackupDocument {
    pub version: String,
    pub export_date: DateTime<Utc>,
    pub data: BTreeMap<NaiveDate, DayData>,
    pub categories: Vec<Category>,
}

impl BackupDocument {
    /// Conventional download name, e.g. `kpi-tracker-backup-2026-08-22.json`.
    pub fn default_file_name(&self) -> String {
        format!("kpi-tracker-backup-{}.json", self.export_date.date_naive())
    }
}

/// Entries decoded from an accepted backup document.
#[derive(Debug, Clone, PartialEq)]
pub struct RestoredData {
    pub data: BTreeMap<NaiveDate, DayData>,
    pub categories: Vec<Category>,
}

/// Error raised when a backup document is rejected. Nothing is restored on
/// failure.
#[derive(Debug, thiserror::Error)]
pub enum BackupError {
    #[error("invalid backup format: {0}")]
    InvalidFormat(String),
}

/// Validate a backup payload and decode both entries. The shape gate is the
/// historical contract: `data` must be a JSON object and `categories` an
/// array; entries that pass the gate but fail to decode reject the whole
/// document the same way.
pub fn restore(value: serde_json::Value) -> Result<RestoredData, BackupError> {
    let root = value
        .as_object()
        .ok_or_else(|| BackupError::InvalidFormat("document is not a JSON object".to_string()))?;

    let data_value = root
        .get("data")
        .ok_or_else(|| BackupError::InvalidFormat("missing 'data' entry".to_string()))?;
    if !data_value.is_object() {
        return Err(BackupError::InvalidFormat(
            "'data' entry is not an object".to_string(),
        ));
    }

    let categories_value = root
        .get("categories")
        .ok_or_else(|| BackupError::InvalidFormat("missing 'categories' entry".to_string()))?;
    if !categories_value.is_array() {
        return Err(BackupError::InvalidFormat(
            "'categories' entry is not an array".to_string(),
        ));
    }

    let data: BTreeMap<NaiveDate, DayData> = serde_json::from_value(data_value.clone())
        .map_err(|err| BackupError::InvalidFormat(format!("day records do not decode: {err}")))?;
    let categories: Vec<Category> = serde_json::from_value(categories_value.clone())
        .map_err(|err| BackupError::InvalidFormat(format!("categories do not decode: {err}")))?;

    Ok(RestoredData { data, categories })
}

/// Decode raw backup bytes (an uploaded or on-disk file) before restoring.
pub fn restore_slice(bytes: &[u8]) -> Result<RestoredData, BackupError> {
    let value: serde_json::Value = serde_json::from_slice(bytes)
        .map_err(|err| BackupError::InvalidFormat(format!("not valid JSON: {err}")))?;
    restore(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tracker::domain::Task;
    use serde_json::json;

    fn sample_document() -> serde_json::Value {
        let mut task = Task::new("Morning run");
        task.time_estimated = 45;
        json!({
            "version": BACKUP_VERSION,
            "exportDate": "2026-08-20T06:30:00Z",
            "data": {
                "2026-08-19": {
                    "date": "2026-08-19",
                    "targetKpi": 80,
                    "expense": 12.5,
                    "tasks": [task],
                    "actualKpi": 25.0
                }
            },
            "categories": [
                { "id": "cat-1", "name": "Sports", "color": "#10b981" }
            ]
        })
    }

    #[test]
    fn restore_accepts_well_formed_documents() {
        let restored = restore(sample_document()).expect("document restores");
        assert_eq!(restored.data.len(), 1);
        assert_eq!(restored.categories.len(), 1);

        let date = NaiveDate::from_ymd_opt(2026, 8, 19).expect("valid date");
        let day = restored.data.get(&date).expect("day present");
        assert_eq!(day.tasks.len(), 1);
        assert_eq!(day.tasks[0].time_estimated, 45);
    }

    #[test]
    fn restore_accepts_documents_without_version_metadata() {
        let mut document = sample_document();
        let root = document.as_object_mut().expect("object");
        root.remove("version");
        root.remove("exportDate");

        assert!(restore(document).is_ok());
    }

    #[test]
    fn restore_rejects_missing_data_entry() {
        let document = json!({ "categories": [] });
        match restore(document) {
            Err(BackupError::InvalidFormat(reason)) => assert!(reason.contains("data")),
            other => panic!("expected invalid format, got {other:?}"),
        }
    }

    #[test]
    fn restore_rejects_non_array_categories() {
        let document = json!({ "data": {}, "categories": {} });
        match restore(document) {
            Err(BackupError::InvalidFormat(reason)) => assert!(reason.contains("categories")),
            other => panic!("expected invalid format, got {other:?}"),
        }
    }

    #[test]
    fn restore_rejects_day_records_that_do_not_decode() {
        let document = json!({
            "data": { "not-a-date": { "tasks": [] } },
            "categories": []
        });
        assert!(matches!(
            restore(document),
            Err(BackupError::InvalidFormat(_))
        ));
    }

    #[test]
    fn restore_slice_rejects_non_json_bytes() {
        assert!(matches!(
            restore_slice(b"definitely not json"),
            Err(BackupError::InvalidFormat(_))
        ));
    }

    #[test]
    fn default_file_name_uses_export_date() {
        let document = BackupDocument {
            version: BACKUP_VERSION.to_string(),
            export_date: "2026-08-20T06:30:00Z".parse().expect("valid timestamp"),
            data: BTreeMap::new(),
            categories: Vec::new(),
        };
        assert_eq!(
            document.default_file_name(),
            "kpi-tracker-backup-2026-08-20.json"
        );
    }
}
