use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{delete, get, post},
    Router,
};
use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::json;

use super::dashboard::RangeSelector;
use super::domain::{Category, DayData, Task};
use super::scoring::compute_kpi;
use super::service::{TrackerError, TrackerService};
use super::store::TrackerStore;

/// Router builder exposing the tracker operations over HTTP. The date in a
/// path is authoritative: a day payload saved under `/days/:date` is stored
/// for that date regardless of its own `date` field.
pub fn tracker_router<S>(service: Arc<TrackerService<S>>) -> Router
where
    S: TrackerStore + 'static,
{
    Router::new()
        .route("/api/v1/days", get(all_days_handler::<S>))
        .route(
            "/api/v1/days/:date",
            get(day_handler::<S>).put(save_day_handler::<S>),
        )
        .route(
            "/api/v1/days/:date/carry-over",
            post(carry_over_handler::<S>),
        )
        .route(
            "/api/v1/categories",
            get(categories_handler::<S>).put(save_categories_handler::<S>),
        )
        .route("/api/v1/dashboard", get(dashboard_handler::<S>))
        .route("/api/v1/kpi/preview", post(preview_handler))
        .route(
            "/api/v1/backup",
            get(export_handler::<S>).post(import_handler::<S>),
        )
        .route("/api/v1/data", delete(clear_handler::<S>))
        .with_state(service)
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct DashboardQuery {
    #[serde(default)]
    pub(crate) range: RangeSelector,
}

pub(crate) async fn all_days_handler<S>(
    State(service): State<Arc<TrackerService<S>>>,
) -> Response
where
    S: TrackerStore + 'static,
{
    match service.all_days() {
        Ok(days) => (StatusCode::OK, axum::Json(days)).into_response(),
        Err(err) => internal_error(&err),
    }
}

pub(crate) async fn day_handler<S>(
    State(service): State<Arc<TrackerService<S>>>,
    Path(date): Path<String>,
) -> Response
where
    S: TrackerStore + 'static,
{
    let date = match parse_date_param(&date) {
        Ok(date) => date,
        Err(response) => return response,
    };

    match service.day(date) {
        Ok(day) => (StatusCode::OK, axum::Json(day)).into_response(),
        Err(err) => internal_error(&err),
    }
}

pub(crate) async fn save_day_handler<S>(
    State(service): State<Arc<TrackerService<S>>>,
    Path(date): Path<String>,
    axum::Json(mut day): axum::Json<DayData>,
) -> Response
where
    S: TrackerStore + 'static,
{
    let date = match parse_date_param(&date) {
        Ok(date) => date,
        Err(response) => return response,
    };
    day.date = date;

    match service.save_day(day) {
        Ok(saved) => (StatusCode::OK, axum::Json(saved)).into_response(),
        Err(err) => internal_error(&err),
    }
}

pub(crate) async fn carry_over_handler<S>(
    State(service): State<Arc<TrackerService<S>>>,
    Path(date): Path<String>,
) -> Response
where
    S: TrackerStore + 'static,
{
    let date = match parse_date_param(&date) {
        Ok(date) => date,
        Err(response) => return response,
    };

    match service.carry_over(date) {
        Ok(day) => (StatusCode::OK, axum::Json(day)).into_response(),
        Err(err @ TrackerError::NothingToCarryOver { .. }) => {
            let payload = json!({ "error": err.to_string() });
            (StatusCode::CONFLICT, axum::Json(payload)).into_response()
        }
        Err(err) => internal_error(&err),
    }
}

pub(crate) async fn categories_handler<S>(
    State(service): State<Arc<TrackerService<S>>>,
) -> Response
where
    S: TrackerStore + 'static,
{
    match service.categories() {
        Ok(categories) => (StatusCode::OK, axum::Json(categories)).into_response(),
        Err(err) => internal_error(&err),
    }
}

pub(crate) async fn save_categories_handler<S>(
    State(service): State<Arc<TrackerService<S>>>,
    axum::Json(categories): axum::Json<Vec<Category>>,
) -> Response
where
    S: TrackerStore + 'static,
{
    match service.save_categories(categories) {
        Ok(saved) => (StatusCode::OK, axum::Json(saved)).into_response(),
        Err(err) => internal_error(&err),
    }
}

pub(crate) async fn dashboard_handler<S>(
    State(service): State<Arc<TrackerService<S>>>,
    Query(query): Query<DashboardQuery>,
) -> Response
where
    S: TrackerStore + 'static,
{
    match service.dashboard(query.range) {
        Ok(dashboard) => (StatusCode::OK, axum::Json(dashboard)).into_response(),
        Err(err) => internal_error(&err),
    }
}

/// Pure scoring entry point for editors: score a candidate task list
/// without touching storage.
pub(crate) async fn preview_handler(axum::Json(tasks): axum::Json<Vec<Task>>) -> Response {
    let kpi = compute_kpi(&tasks);
    (StatusCode::OK, axum::Json(json!({ "kpi": kpi }))).into_response()
}

pub(crate) async fn export_handler<S>(
    State(service): State<Arc<TrackerService<S>>>,
) -> Response
where
    S: TrackerStore + 'static,
{
    match service.export_backup() {
        Ok(document) => (StatusCode::OK, axum::Json(document)).into_response(),
        Err(err) => internal_error(&err),
    }
}

pub(crate) async fn import_handler<S>(
    State(service): State<Arc<TrackerService<S>>>,
    axum::Json(value): axum::Json<serde_json::Value>,
) -> Response
where
    S: TrackerStore + 'static,
{
    match service.import_backup(value) {
        Ok(summary) => (StatusCode::OK, axum::Json(summary)).into_response(),
        Err(err @ TrackerError::Backup(_)) => {
            let payload = json!({ "error": err.to_string() });
            (StatusCode::UNPROCESSABLE_ENTITY, axum::Json(payload)).into_response()
        }
        Err(err) => internal_error(&err),
    }
}

pub(crate) async fn clear_handler<S>(
    State(service): State<Arc<TrackerService<S>>>,
) -> Response
where
    S: TrackerStore + 'static,
{
    match service.clear_all() {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(err) => internal_error(&err),
    }
}

fn parse_date_param(raw: &str) -> Result<NaiveDate, Response> {
    match NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d") {
        Ok(date) => Ok(date),
        Err(_) => {
            let payload = json!({ "error": format!("'{raw}' is not a YYYY-MM-DD date") });
            Err((StatusCode::BAD_REQUEST, axum::Json(payload)).into_response())
        }
    }
}

fn internal_error(err: &TrackerError) -> Response {
    let payload = json!({ "error": err.to_string() });
    (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
}
