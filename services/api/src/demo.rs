use crate::infra::{parse_date, parse_range, InMemoryTrackerStore};
use chrono::{Duration, Local, NaiveDate};
use clap::Args;
use kpi_tracker::compute_kpi;
use kpi_tracker::error::AppError;
use kpi_tracker::tracker::{
    Category, Dashboard, DayData, RangeSelector, SubTask, Task, TaskStatus, TrackerService,
    WeightLevel,
};
use std::sync::Arc;

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Final tracked date of the seeded week (YYYY-MM-DD). Defaults to today.
    #[arg(long, value_parser = parse_date)]
    pub(crate) end_date: Option<NaiveDate>,
    /// Dashboard range to render: 7, 30, or all
    #[arg(long, value_parser = parse_range, default_value = "7")]
    pub(crate) range: RangeSelector,
    /// Include the per-day task listing in the output
    #[arg(long)]
    pub(crate) list_tasks: bool,
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let DemoArgs {
        end_date,
        range,
        list_tasks,
    } = args;

    let end_date = end_date.unwrap_or_else(|| Local::now().date_naive());
    let start_date = end_date - Duration::days(6);

    let service = TrackerService::new(Arc::new(InMemoryTrackerStore::default()));
    let categories = service.categories()?;
    let category_id = |name: &str| {
        categories
            .iter()
            .find(|category| category.name == name)
            .map(|category| category.id.clone())
    };
    let work = category_id("Work");
    let sports = category_id("Sports");
    let growth = category_id("Personal Growth");

    println!("KPI tracker demo");
    println!("Tracking window: {start_date} -> {end_date}");

    println!("\nDaily log");
    for offset in 0..7 {
        let date = start_date + Duration::days(offset);
        let day = seeded_day(date, offset as usize, &work, &sports, &growth);
        let saved = service.save_day(day)?;
        println!(
            "- {}: KPI {:.2} / target {} | {} tasks | {:.2} spent",
            saved.date,
            saved.actual_kpi,
            saved.target_kpi,
            saved.tasks.len(),
            saved.expense
        );
    }

    let next_day = end_date + Duration::days(1);
    let carried = service.carry_over(next_day)?;
    println!("\nCarry-over into {next_day}");
    println!(
        "- {} tasks replanned, day opens at KPI {:.2}",
        carried.tasks.len(),
        carried.actual_kpi
    );
    let mut if_finished = carried.tasks.clone();
    for task in &mut if_finished {
        task.status = TaskStatus::Done;
        for sub in &mut task.sub_tasks {
            sub.status = TaskStatus::Done;
        }
    }
    println!(
        "- Finishing every carried task would score {:.2}",
        compute_kpi(&if_finished)
    );

    let dashboard = service.dashboard(range)?;
    render_dashboard(&dashboard, &categories);

    if list_tasks {
        println!("\nTask breakdown");
        for day in service.all_days()?.values() {
            println!("{}", day.date);
            for task in &day.tasks {
                if task.sub_tasks.is_empty() {
                    println!(
                        "  - [{}] {} ({}, {}m planned / {}m logged)",
                        task.status.label(),
                        task.name,
                        task.weight_level.label(),
                        task.time_estimated,
                        task.time_actual
                    );
                } else {
                    println!("  - {} ({} sub-tasks)", task.name, task.sub_tasks.len());
                    for sub in &task.sub_tasks {
                        println!(
                            "    - [{}] {} ({}, {}m planned / {}m logged)",
                            sub.status.label(),
                            sub.name,
                            sub.weight_level.label(),
                            sub.time_estimated,
                            sub.time_actual
                        );
                    }
                }
            }
        }
    }

    Ok(())
}

/// One deterministic day of the seeded week. Statuses vary with the offset so
/// the dashboard has hits, partial days, and a miss to show.
fn seeded_day(
    date: NaiveDate,
    offset: usize,
    work: &Option<String>,
    sports: &Option<String>,
    growth: &Option<String>,
) -> DayData {
    let mut day = DayData::empty(date);
    day.expense = 12.0 + offset as f64 * 3.0;

    let mut planning = SubTask::new("Plan the day");
    planning.status = TaskStatus::Done;
    planning.time_estimated = 30;
    planning.time_actual = 30;

    let mut focus = SubTask::new("Focus block");
    focus.weight_level = WeightLevel::High;
    focus.status = match offset {
        2 => TaskStatus::Neutral,
        5 => TaskStatus::NotDone,
        _ => TaskStatus::Done,
    };
    focus.time_estimated = 90;
    focus.time_actual = if focus.status == TaskStatus::Done { 75 } else { 20 };

    let mut deep_work = Task::new("Deep work");
    deep_work.weight_level = WeightLevel::VeryHigh;
    deep_work.category_id = work.clone();
    deep_work.sub_tasks = vec![planning, focus];

    let mut workout = Task::new("Workout");
    workout.category_id = sports.clone();
    workout.status = if offset % 2 == 0 {
        TaskStatus::Done
    } else {
        TaskStatus::Neutral
    };
    workout.time_estimated = 45;
    workout.time_actual = if workout.status == TaskStatus::Done { 40 } else { 0 };

    let mut reading = Task::new("Read 20 pages");
    reading.weight_level = WeightLevel::Low;
    reading.category_id = growth.clone();
    reading.status = if offset % 3 == 0 {
        TaskStatus::Neutral
    } else {
        TaskStatus::Done
    };
    reading.time_estimated = 30;
    reading.time_actual = 20;

    day.tasks = vec![deep_work, workout, reading];
    day
}

fn render_dashboard(dashboard: &Dashboard, categories: &[Category]) {
    println!("\nDashboard ({})", dashboard.range.label());
    let summary = &dashboard.summary;
    println!(
        "- {} days tracked | average KPI {:.2} | success rate {:.0}%",
        summary.days_tracked, summary.average_kpi, summary.success_rate
    );
    println!(
        "- Expense total {:.2} | {:.1}h planned | {:.1}h logged",
        summary.total_expense, summary.total_estimated_hours, summary.total_actual_hours
    );

    println!("\nTrend");
    for point in &dashboard.trend {
        println!(
            "- {}: KPI {:.2} / target {} | completion {:.0}% | {:.1}h planned, {:.1}h logged",
            point.date,
            point.actual_kpi,
            point.target_kpi,
            point.completion_rate,
            point.time_estimated_hours,
            point.time_actual_hours
        );
    }

    if dashboard.categories.is_empty() {
        println!("\nCategory performance: no tagged tasks in range");
    } else {
        println!(
            "\nCategory performance ({} of {} categories active)",
            dashboard.categories.len(),
            categories.len()
        );
        for entry in &dashboard.categories {
            println!(
                "- {}: {:.1}% across {} entries",
                entry.name, entry.performance, entry.volume
            );
        }
    }
}
