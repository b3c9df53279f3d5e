use sqlx::PgPool;

use crate::auth::AuthService;
use crate::services::{EventService, StatsService, TaskService};

/// Shared handler state. Every service holds a clone of the same pool.
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub auth_service: AuthService,
    pub event_service: EventService,
    pub task_service: TaskService,
    pub stats_service: StatsService,
}

impl AppState {
    pub fn new(db: PgPool, bcrypt_cost: u32) -> Self {
        Self {
            auth_service: AuthService::new(db.clone(), bcrypt_cost),
            event_service: EventService::new(db.clone()),
            task_service: TaskService::new(db.clone()),
            stats_service: StatsService::new(db.clone()),
            db,
        }
    }
}
