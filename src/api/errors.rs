use axum::{
    extract::rejection::{JsonRejection, PathRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::auth::AuthError;

/// Every failure a handler can report. Each maps to one status code and a
/// `{"error": "<message>"}` body.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),
    #[error("Unauthorized access")]
    Unauthorized,
    #[error("{0}")]
    Conflict(String),
    #[error("Invalid email or password")]
    InvalidCredentials,
    /// Absent rows and rows owned by someone else are indistinguishable.
    #[error("{0}")]
    NotFoundOrForbidden(String),
    /// Carries the client-facing message only; the cause is logged.
    #[error("{0}")]
    Persistence(String),
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        ApiError::BadRequest(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        ApiError::NotFoundOrForbidden(message.into())
    }

    /// Log the underlying store failure and hide it behind `message`.
    pub fn persistence(message: impl Into<String>, cause: impl std::fmt::Display) -> Self {
        let message = message.into();
        tracing::error!("{}: {}", message, cause);
        ApiError::Persistence(message)
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized => StatusCode::UNAUTHORIZED,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::InvalidCredentials => StatusCode::UNAUTHORIZED,
            ApiError::NotFoundOrForbidden(_) => StatusCode::NOT_FOUND,
            ApiError::Persistence(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(json!({ "error": self.to_string() }));
        (self.status_code(), body).into_response()
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::InvalidCredentials => ApiError::InvalidCredentials,
            AuthError::EmailAlreadyExists => ApiError::Conflict(err.to_string()),
            AuthError::Validation(message) => ApiError::BadRequest(message),
            AuthError::Database(e) => ApiError::persistence("Database error", e),
            AuthError::PasswordHashing(e) => ApiError::persistence("Failed to process password", e),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        tracing::debug!("Rejected request body: {}", rejection.body_text());
        ApiError::BadRequest("Invalid data format".to_string())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        tracing::debug!("Rejected path parameter: {}", rejection.body_text());
        ApiError::BadRequest("Invalid identifier".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::password::PasswordError;

    async fn body_json(error: ApiError) -> (StatusCode, serde_json::Value) {
        let response = error.into_response();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(ApiError::bad_request("x").status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(ApiError::Unauthorized.status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(ApiError::Conflict("x".into()).status_code(), StatusCode::CONFLICT);
        assert_eq!(ApiError::InvalidCredentials.status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(ApiError::not_found("x").status_code(), StatusCode::NOT_FOUND);
        assert_eq!(
            ApiError::Persistence("x".into()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_auth_error_mapping() {
        assert!(matches!(
            ApiError::from(AuthError::EmailAlreadyExists),
            ApiError::Conflict(_)
        ));
        assert!(matches!(
            ApiError::from(AuthError::InvalidCredentials),
            ApiError::InvalidCredentials
        ));
        assert!(matches!(
            ApiError::from(AuthError::Validation("Name cannot be empty".into())),
            ApiError::BadRequest(ref m) if m == "Name cannot be empty"
        ));
        assert!(matches!(
            ApiError::from(AuthError::Database(sqlx::Error::PoolTimedOut)),
            ApiError::Persistence(_)
        ));
        assert!(matches!(
            ApiError::from(AuthError::PasswordHashing(PasswordError::HashingFailed(
                bcrypt::BcryptError::CostNotAllowed(2)
            ))),
            ApiError::Persistence(_)
        ));
    }

    #[tokio::test]
    async fn test_error_body_shape() {
        let (status, body) = body_json(ApiError::not_found("Event not found or access denied")).await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, json!({ "error": "Event not found or access denied" }));
    }

    #[tokio::test]
    async fn test_persistence_hides_cause() {
        let error = ApiError::persistence("Failed to load events", "relation \"events\" does not exist");
        let (_, body) = body_json(error).await;

        assert_eq!(body, json!({ "error": "Failed to load events" }));
    }
}
