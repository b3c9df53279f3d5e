use anyhow::Result;
use sqlx::PgPool;

use crate::models::Stats;

#[derive(Debug, Clone)]
pub struct StatsService {
    db: PgPool,
}

impl StatsService {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// All four counters or an error; partial results are never returned.
    pub async fn user_stats(&self, user_id: i32) -> Result<Stats> {
        let total_events = self
            .count("SELECT COUNT(*) FROM events WHERE user_id = $1", user_id)
            .await?;
        let total_tasks = self
            .count("SELECT COUNT(*) FROM tasks WHERE user_id = $1", user_id)
            .await?;
        let completed_tasks = self
            .count(
                "SELECT COUNT(*) FROM tasks WHERE user_id = $1 AND is_completed = TRUE",
                user_id,
            )
            .await?;

        let study_hours: f64 = sqlx::query_scalar(
            "SELECT COALESCE(SUM(duration_hours), 0)::float8 FROM events WHERE user_id = $1",
        )
        .bind(user_id)
        .fetch_one(&self.db)
        .await?;

        Ok(Stats {
            total_events,
            total_tasks,
            completed_tasks,
            study_hours,
        })
    }

    async fn count(&self, query: &str, user_id: i32) -> Result<i64> {
        let count: i64 = sqlx::query_scalar(query)
            .bind(user_id)
            .fetch_one(&self.db)
            .await?;

        Ok(count)
    }
}
