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
use crate::models::{Event, EventRequest};

const EVENT_NOT_FOUND: &str = "Event not found or access denied";

pub fn events_routes() -> Router<AppState> {
    Router::new()
        .route("/events", get(get_events).post(create_event))
        .route("/events/:event_id", put(update_event).delete(delete_event))
}

/// Get all events for the calling user
#[tracing::instrument(skip(state))]
pub async fn get_events(
    user: AuthenticatedUser,
    State(state): State<AppState>,
) -> Result<Json<Vec<Event>>, ApiError> {
    let events = state
        .event_service
        .list_events(user.id())
        .await
        .map_err(|e| ApiError::persistence("Failed to retrieve events", e))?;

    Ok(Json(events))
}

/// Create a new event
#[tracing::instrument(skip(state, request))]
pub async fn create_event(
    user: AuthenticatedUser,
    State(state): State<AppState>,
    WithRejection(Json(request), _): WithRejection<Json<EventRequest>, ApiError>,
) -> Result<(StatusCode, Json<Event>), ApiError> {
    request
        .validate()
        .map_err(|e| ApiError::bad_request(e.to_string()))?;

    let event = state
        .event_service
        .create_event(user.id(), &request)
        .await
        .map_err(|e| ApiError::persistence("Failed to create event", e))?;

    Ok((StatusCode::CREATED, Json(event)))
}

/// Replace an existing event
#[tracing::instrument(skip(state, request))]
pub async fn update_event(
    user: AuthenticatedUser,
    WithRejection(Path(event_id), _): WithRejection<Path<i32>, ApiError>,
    State(state): State<AppState>,
    WithRejection(Json(request), _): WithRejection<Json<EventRequest>, ApiError>,
) -> Result<Json<MessageResponse>, ApiError> {
    request
        .validate()
        .map_err(|e| ApiError::bad_request(e.to_string()))?;

    let updated = state
        .event_service
        .update_event(user.id(), event_id, &request)
        .await
        .map_err(|e| ApiError::persistence("Failed to update event", e))?;

    if !updated {
        return Err(ApiError::not_found(EVENT_NOT_FOUND));
    }

    Ok(Json(MessageResponse::new("Event updated")))
}

/// Delete an event
#[tracing::instrument(skip(state))]
pub async fn delete_event(
    user: AuthenticatedUser,
    WithRejection(Path(event_id), _): WithRejection<Path<i32>, ApiError>,
    State(state): State<AppState>,
) -> Result<Json<MessageResponse>, ApiError> {
    let deleted = state
        .event_service
        .delete_event(user.id(), event_id)
        .await
        .map_err(|e| ApiError::persistence("Failed to delete event", e))?;

    if !deleted {
        return Err(ApiError::not_found(EVENT_NOT_FOUND));
    }

    Ok(Json(MessageResponse::new("Event deleted")))
}
