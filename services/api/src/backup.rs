use crate::infra::JsonFileStore;
use clap::Args;
use kpi_tracker::config::AppConfig;
use kpi_tracker::error::AppError;
use kpi_tracker::tracker::TrackerService;
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Args, Debug)]
pub(crate) struct ExportArgs {
    /// Where to write the document (defaults to kpi-tracker-backup-<date>.json)
    #[arg(long)]
    pub(crate) output: Option<PathBuf>,
    /// Override the configured data directory
    #[arg(long)]
    pub(crate) data_dir: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub(crate) struct ImportArgs {
    /// Backup document to restore from
    pub(crate) file: PathBuf,
    /// Override the configured data directory
    #[arg(long)]
    pub(crate) data_dir: Option<PathBuf>,
}

fn service_for(data_dir: Option<PathBuf>) -> Result<TrackerService<JsonFileStore>, AppError> {
    let data_dir = match data_dir {
        Some(dir) => dir,
        None => AppConfig::load()?.storage.data_dir,
    };
    Ok(TrackerService::new(Arc::new(JsonFileStore::new(data_dir))))
}

pub(crate) fn run_export(args: ExportArgs) -> Result<(), AppError> {
    let service = service_for(args.data_dir)?;
    let document = service.export_backup()?;

    let path = args
        .output
        .unwrap_or_else(|| PathBuf::from(document.default_file_name()));
    let body = serde_json::to_string_pretty(&document)?;
    fs::write(&path, body)?;

    println!(
        "Exported {} days and {} categories to {}",
        document.data.len(),
        document.categories.len(),
        path.display()
    );
    Ok(())
}

pub(crate) fn run_import(args: ImportArgs) -> Result<(), AppError> {
    let service = service_for(args.data_dir)?;
    let bytes = fs::read(&args.file)?;
    let summary = service.import_backup_slice(&bytes)?;

    println!(
        "Imported {} days and {} categories from {}",
        summary.days,
        summary.categories,
        args.file.display()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use kpi_tracker::tracker::{DayData, Task, TaskStatus, TrackerStore};
    use tempfile::TempDir;

    fn seeded_dir() -> (TempDir, NaiveDate) {
        let dir = TempDir::new().expect("temp dir");
        let service = TrackerService::new(Arc::new(JsonFileStore::new(dir.path().to_path_buf())));

        let date = NaiveDate::from_ymd_opt(2026, 8, 21).expect("valid date");
        let mut day = DayData::empty(date);
        let mut task = Task::new("Write report");
        task.status = TaskStatus::Done;
        day.tasks = vec![task];
        service.save_day(day).expect("seed day");
        service.categories().expect("seed categories");

        (dir, date)
    }

    #[test]
    fn export_then_import_moves_data_between_directories() {
        let (source_dir, date) = seeded_dir();
        let target_dir = TempDir::new().expect("temp dir");
        let document_path = target_dir.path().join("backup.json");

        run_export(ExportArgs {
            output: Some(document_path.clone()),
            data_dir: Some(source_dir.path().to_path_buf()),
        })
        .expect("export");

        run_import(ImportArgs {
            file: document_path,
            data_dir: Some(target_dir.path().to_path_buf()),
        })
        .expect("import");

        let restored = JsonFileStore::new(target_dir.path().to_path_buf());
        let days = restored.load_days().expect("load days");
        assert_eq!(days.len(), 1);
        assert_eq!(days[&date].tasks[0].name, "Write report");
        assert_eq!(
            restored
                .load_categories()
                .expect("load categories")
                .map(|categories| categories.len()),
            Some(5)
        );
    }

    #[test]
    fn import_rejects_documents_that_are_not_backups() {
        let dir = TempDir::new().expect("temp dir");
        let bogus = dir.path().join("not-a-backup.json");
        fs::write(&bogus, br#"{ "days": [] }"#).expect("write file");

        let result = run_import(ImportArgs {
            file: bogus,
            data_dir: Some(dir.path().to_path_buf()),
        });
        assert!(result.is_err());
    }
}
