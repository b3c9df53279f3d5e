use axum::{extract::State, http::StatusCode, response::Json, routing::get, Router};
use serde_json::{json, Value};

use crate::api::state::AppState;
use crate::config::seeding::{DEMO_EMAIL, DEMO_PASSWORD};

/// Informational endpoints under `/api`
pub fn info_routes() -> Router<AppState> {
    Router::new()
        .route("/status", get(status))
        .route("/test", get(test))
        .route("/demo", get(demo))
}

pub async fn health_check(State(state): State<AppState>) -> (StatusCode, Json<Value>) {
    let timestamp = chrono::Utc::now().to_rfc3339();

    match sqlx::query("SELECT 1").execute(&state.db).await {
        Ok(_) => (
            StatusCode::OK,
            Json(json!({
                "status": "healthy",
                "service": "student-planner",
                "version": env!("CARGO_PKG_VERSION"),
                "database": "ok",
                "timestamp": timestamp
            })),
        ),
        Err(e) => {
            tracing::warn!("Health check could not reach the database: {}", e);
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({
                    "status": "degraded",
                    "service": "student-planner",
                    "version": env!("CARGO_PKG_VERSION"),
                    "database": "unavailable",
                    "timestamp": timestamp
                })),
            )
        }
    }
}

async fn status() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

async fn test() -> Json<Value> {
    Json(json!({ "message": "Server is working!" }))
}

async fn demo() -> Json<Value> {
    Json(json!({
        "message": "Demo mode",
        "instructions": "Register or log in to get started",
        "test_account": {
            "email": DEMO_EMAIL,
            "password": DEMO_PASSWORD
        }
    }))
}
