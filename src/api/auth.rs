use axum::{
    extract::State,
    http::StatusCode,
    response::Json,
    routing::{get, post},
    Router,
};
use axum_extra::extract::WithRejection;

use crate::api::errors::ApiError;
use crate::api::state::AppState;
use crate::auth::{Caller, CheckAuthResponse, LoginRequest, RegisterRequest};
use crate::models::User;

/// Authentication routes
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/check-auth", get(check_auth))
}

/// Register a new user
#[tracing::instrument(skip(state, request))]
async fn register(
    State(state): State<AppState>,
    WithRejection(Json(request), _): WithRejection<Json<RegisterRequest>, ApiError>,
) -> Result<(StatusCode, Json<User>), ApiError> {
    let user = state.auth_service.register(request).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

/// Login user
#[tracing::instrument(skip(state, request))]
async fn login(
    State(state): State<AppState>,
    WithRejection(Json(request), _): WithRejection<Json<LoginRequest>, ApiError>,
) -> Result<Json<User>, ApiError> {
    let user = state.auth_service.authenticate(request).await?;
    Ok(Json(user))
}

/// Echo the identity the request claims; never rejects.
async fn check_auth(Caller(user_id): Caller) -> Json<CheckAuthResponse> {
    Json(CheckAuthResponse {
        status: "authenticated",
        user_id,
    })
}
