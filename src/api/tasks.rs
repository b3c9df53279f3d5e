use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
    routing::{get, put},
    Router,
};
use axum_extra::extract::WithRejection;

use crate::api::errors::ApiError;
use crate::api::state::AppState;
use crate::api::MessageResponse;
use crate::auth::AuthenticatedUser;
use crate::models::{CreateTaskRequest, Task, ToggleTaskRequest, UpdateTaskRequest};

const TASK_NOT_FOUND: &str = "Task not found or access denied";

pub fn tasks_routes() -> Router<AppState> {
    Router::new()
        .route("/tasks", get(get_tasks).post(create_task))
        .route("/tasks/:task_id", put(update_task).delete(delete_task))
        .route("/tasks/:task_id/toggle", put(toggle_task))
}

#[tracing::instrument(skip(state))]
pub async fn get_tasks(
    user: AuthenticatedUser,
    State(state): State<AppState>,
) -> Result<Json<Vec<Task>>, ApiError> {
    let tasks = state
        .task_service
        .list_tasks(user.id())
        .await
        .map_err(|e| ApiError::persistence("Failed to retrieve tasks", e))?;

    Ok(Json(tasks))
}

#[tracing::instrument(skip(state, request))]
pub async fn create_task(
    user: AuthenticatedUser,
    State(state): State<AppState>,
    WithRejection(Json(request), _): WithRejection<Json<CreateTaskRequest>, ApiError>,
) -> Result<(StatusCode, Json<Task>), ApiError> {
    request
        .validate()
        .map_err(|e| ApiError::bad_request(e.to_string()))?;

    let task = state
        .task_service
        .create_task(user.id(), &request)
        .await
        .map_err(|e| ApiError::persistence("Failed to create task", e))?;

    Ok((StatusCode::CREATED, Json(task)))
}

#[tracing::instrument(skip(state, request))]
pub async fn update_task(
    user: AuthenticatedUser,
    WithRejection(Path(task_id), _): WithRejection<Path<i32>, ApiError>,
    State(state): State<AppState>,
    WithRejection(Json(request), _): WithRejection<Json<UpdateTaskRequest>, ApiError>,
) -> Result<Json<Task>, ApiError> {
    request
        .validate()
        .map_err(|e| ApiError::bad_request(e.to_string()))?;

    let task = state
        .task_service
        .update_task(user.id(), task_id, &request)
        .await
        .map_err(|e| ApiError::persistence("Failed to update task", e))?
        .ok_or_else(|| ApiError::not_found(TASK_NOT_FOUND))?;

    Ok(Json(task))
}

/// Flip only the completion flag
#[tracing::instrument(skip(state, request))]
pub async fn toggle_task(
    user: AuthenticatedUser,
    WithRejection(Path(task_id), _): WithRejection<Path<i32>, ApiError>,
    State(state): State<AppState>,
    WithRejection(Json(request), _): WithRejection<Json<ToggleTaskRequest>, ApiError>,
) -> Result<Json<Task>, ApiError> {
    let task = state
        .task_service
        .set_completion(user.id(), task_id, request.is_completed)
        .await
        .map_err(|e| ApiError::persistence("Failed to update task status", e))?
        .ok_or_else(|| ApiError::not_found(TASK_NOT_FOUND))?;

    Ok(Json(task))
}

#[tracing::instrument(skip(state))]
pub async fn delete_task(
    user: AuthenticatedUser,
    WithRejection(Path(task_id), _): WithRejection<Path<i32>, ApiError>,
    State(state): State<AppState>,
) -> Result<Json<MessageResponse>, ApiError> {
    let deleted = state
        .task_service
        .delete_task(user.id(), task_id)
        .await
        .map_err(|e| ApiError::persistence("Failed to delete task", e))?;

    if !deleted {
        return Err(ApiError::not_found(TASK_NOT_FOUND));
    }

    Ok(Json(MessageResponse::new("Task deleted")))
}
