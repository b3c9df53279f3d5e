use axum::{extract::State, response::Json, routing::get, Router};
use chrono::Local;

use crate::api::errors::ApiError;
use crate::api::state::AppState;
use crate::auth::AuthenticatedUser;
use crate::models::{ScheduleItem, Stats, WeekSchedule};

pub fn schedule_routes() -> Router<AppState> {
    Router::new()
        .route("/schedule", get(get_schedule))
        .route("/schedule/week", get(get_week_schedule))
        .route("/stats", get(get_stats))
}

/// Up to ten events from today on
#[tracing::instrument(skip(state))]
pub async fn get_schedule(
    user: AuthenticatedUser,
    State(state): State<AppState>,
) -> Result<Json<Vec<ScheduleItem>>, ApiError> {
    let today = Local::now().date_naive();

    let schedule = state
        .event_service
        .upcoming_events(user.id(), today)
        .await
        .map_err(|e| ApiError::persistence("Failed to retrieve schedule", e))?;

    Ok(Json(schedule))
}

/// This week's events keyed by date
#[tracing::instrument(skip(state))]
pub async fn get_week_schedule(
    user: AuthenticatedUser,
    State(state): State<AppState>,
) -> Result<Json<WeekSchedule>, ApiError> {
    let today = Local::now().date_naive();

    let schedule = state
        .event_service
        .week_schedule(user.id(), today)
        .await
        .map_err(|e| ApiError::persistence("Failed to retrieve week schedule", e))?;

    Ok(Json(schedule))
}

#[tracing::instrument(skip(state))]
pub async fn get_stats(
    user: AuthenticatedUser,
    State(state): State<AppState>,
) -> Result<Json<Stats>, ApiError> {
    let stats = state
        .stats_service
        .user_stats(user.id())
        .await
        .map_err(|e| ApiError::persistence("Failed to retrieve statistics", e))?;

    Ok(Json(stats))
}
