// API routes and handlers

pub mod auth;
pub mod errors;
pub mod events;
pub mod health;
pub mod routes;
pub mod schedule;
pub mod state;
pub mod tasks;

use serde::{Deserialize, Serialize};

pub use errors::ApiError;
pub use routes::create_routes;
pub use state::AppState;

/// Body of mutations that have nothing else to return
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
