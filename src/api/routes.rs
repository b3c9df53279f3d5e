use anyhow::Context;
use axum::{
    extract::Request,
    http::{header, HeaderName, HeaderValue, Method, StatusCode},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use super::auth::auth_routes;
use super::events::events_routes;
use super::health::{health_check, info_routes};
use super::schedule::schedule_routes;
use super::state::AppState;
use super::tasks::tasks_routes;
use crate::auth::identity::USER_ID_HEADER;
use crate::config::AppConfig;

pub fn create_routes(state: AppState, config: &AppConfig) -> anyhow::Result<Router> {
    let api = Router::new()
        .merge(auth_routes())
        .merge(events_routes())
        .merge(tasks_routes())
        .merge(schedule_routes())
        .merge(info_routes());

    let router = Router::new()
        .route("/health", get(health_check))
        .nest("/api", api)
        .with_state(state)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors_layer(&config.cors_origin)?)
                .layer(middleware::from_fn(preflight_ok)),
        );

    Ok(router)
}

/// CORS for the single configured frontend origin
pub fn cors_layer(origin: &str) -> anyhow::Result<CorsLayer> {
    let origin = HeaderValue::from_str(origin)
        .with_context(|| format!("Invalid CORS origin: {}", origin))?;

    Ok(CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
            HeaderName::from_static(USER_ID_HEADER),
        ])
        .allow_credentials(true))
}

/// Any OPTIONS request is answered with an empty 200.
async fn preflight_ok(request: Request, next: Next) -> Response {
    if request.method() == Method::OPTIONS {
        return StatusCode::OK.into_response();
    }

    next.run(request).await
}
