use anyhow::Result;
use chrono::{Duration, Local, NaiveTime};
use sqlx::PgPool;

use crate::auth::{AuthService, RegisterRequest};
use crate::models::{CreateTaskRequest, EventRequest};
use crate::services::{week_bounds, EventService, TaskService};

pub const DEMO_EMAIL: &str = "test@example.com";
pub const DEMO_PASSWORD: &str = "test123";
pub const DEMO_NAME: &str = "Demo Student";

/// Creates the demo account advertised by `/api/demo`, with a week of sample
/// events and a few tasks.
pub struct DatabaseSeeder {
    pool: PgPool,
    bcrypt_cost: u32,
}

impl DatabaseSeeder {
    pub fn new(pool: PgPool, bcrypt_cost: u32) -> Self {
        Self { pool, bcrypt_cost }
    }

    /// Returns the demo user's id, or `None` when it already existed.
    pub async fn seed_all(&self) -> Result<Option<i32>> {
        tracing::info!("Starting database seeding...");

        let auth_service = AuthService::new(self.pool.clone(), self.bcrypt_cost);
        if auth_service.get_user_by_email(DEMO_EMAIL).await?.is_some() {
            tracing::info!("Demo user already present, skipping seeding");
            return Ok(None);
        }

        let user = auth_service
            .register(RegisterRequest {
                email: DEMO_EMAIL.to_string(),
                password: DEMO_PASSWORD.to_string(),
                name: DEMO_NAME.to_string(),
            })
            .await?;

        self.seed_events(user.id).await?;
        self.seed_tasks(user.id).await?;

        tracing::info!(user_id = user.id, "Database seeding completed!");
        Ok(Some(user.id))
    }

    async fn seed_events(&self, user_id: i32) -> Result<()> {
        let event_service = EventService::new(self.pool.clone());
        let (monday, _) = week_bounds(Local::now().date_naive());

        let samples = [
            ("Calculus lecture", "lecture", "Mathematics", "Room 204", 0, (9, 0), 1.5),
            ("Physics lab", "lab", "Physics", "Lab B", 1, (13, 30), 2.0),
            ("Study group", "study", "Mathematics", "Library", 3, (16, 0), 0.5),
        ];

        for (title, event_type, subject, location, day, (hour, minute), duration) in samples {
            let request = EventRequest {
                title: title.to_string(),
                description: String::new(),
                event_type: event_type.to_string(),
                subject: subject.to_string(),
                location: location.to_string(),
                event_date: monday + Duration::days(day),
                start_time: NaiveTime::from_hms_opt(hour, minute, 0).unwrap_or_default(),
                duration_hours: duration,
            };
            event_service.create_event(user_id, &request).await?;
        }

        tracing::info!("Created demo events");
        Ok(())
    }

    async fn seed_tasks(&self, user_id: i32) -> Result<()> {
        let task_service = TaskService::new(self.pool.clone());
        let today = Local::now().date_naive();

        let samples = [
            ("Finish problem set 3", "high", Some(today + Duration::days(2))),
            ("Read chapter 5", "medium", Some(today + Duration::days(5))),
            ("Buy lab notebook", "low", None),
        ];

        for (title, priority, due_date) in samples {
            let request = CreateTaskRequest {
                title: title.to_string(),
                description: String::new(),
                priority: Some(priority.to_string()),
                due_date,
            };
            task_service.create_task(user_id, &request).await?;
        }

        tracing::info!("Created demo tasks");
        Ok(())
    }
}
