use anyhow::{anyhow, Result};
use chrono::{Datelike, Duration, NaiveDate};
use sqlx::PgPool;

use crate::models::{group_by_date, Event, EventRequest, ScheduleItem, WeekSchedule, UPCOMING_LIMIT};
use crate::services::collect_rows;

const EVENT_COLUMNS: &str = "id, user_id, title, description, event_type, subject, location, \
     event_date, start_time, duration_hours::float8 AS duration_hours, created_at";

const SCHEDULE_COLUMNS: &str = "id, title, event_type, subject, location, \
     event_date, start_time, duration_hours::float8 AS duration_hours";

/// Monday and Sunday of the ISO week containing `today`. Sunday belongs to
/// the week that started six days earlier.
pub fn week_bounds(today: NaiveDate) -> (NaiveDate, NaiveDate) {
    let days_since_monday = i64::from(today.weekday().num_days_from_monday());
    let monday = today - Duration::days(days_since_monday);
    (monday, monday + Duration::days(6))
}

/// Calendar events. Every query is filtered by the owning user.
#[derive(Debug, Clone)]
pub struct EventService {
    db: PgPool,
}

impl EventService {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    pub async fn list_events(&self, user_id: i32) -> Result<Vec<Event>> {
        let query = format!(
            "SELECT {} FROM events WHERE user_id = $1 ORDER BY event_date, start_time",
            EVENT_COLUMNS
        );

        let rows = sqlx::query(&query).bind(user_id).fetch(&self.db);
        collect_rows(rows, "event").await
    }

    pub async fn get_event(&self, user_id: i32, event_id: i32) -> Result<Option<Event>> {
        let query = format!(
            "SELECT {} FROM events WHERE id = $1 AND user_id = $2",
            EVENT_COLUMNS
        );

        let event = sqlx::query_as::<_, Event>(&query)
            .bind(event_id)
            .bind(user_id)
            .fetch_optional(&self.db)
            .await?;

        Ok(event)
    }

    /// Insert and read back the stored row.
    pub async fn create_event(&self, user_id: i32, request: &EventRequest) -> Result<Event> {
        let event_id: i32 = sqlx::query_scalar(
            r#"
            INSERT INTO events (
                user_id, title, description, event_type, subject,
                location, event_date, start_time, duration_hours
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9::numeric)
            RETURNING id
            "#,
        )
        .bind(user_id)
        .bind(request.title.trim())
        .bind(&request.description)
        .bind(request.event_type.trim())
        .bind(&request.subject)
        .bind(&request.location)
        .bind(request.event_date)
        .bind(request.start_time)
        .bind(request.rounded_duration())
        .fetch_one(&self.db)
        .await?;

        self.get_event(user_id, event_id)
            .await?
            .ok_or_else(|| anyhow!("event {} was created but could not be read back", event_id))
    }

    /// Replace every mutable field. Returns false when no row matched both
    /// the id and the owner.
    pub async fn update_event(&self, user_id: i32, event_id: i32, request: &EventRequest) -> Result<bool> {
        let result = sqlx::query(
            r#"
            UPDATE events
            SET title = $1, description = $2, event_type = $3, subject = $4,
                location = $5, event_date = $6, start_time = $7, duration_hours = $8::numeric
            WHERE id = $9 AND user_id = $10
            "#,
        )
        .bind(request.title.trim())
        .bind(&request.description)
        .bind(request.event_type.trim())
        .bind(&request.subject)
        .bind(&request.location)
        .bind(request.event_date)
        .bind(request.start_time)
        .bind(request.rounded_duration())
        .bind(event_id)
        .bind(user_id)
        .execute(&self.db)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    pub async fn delete_event(&self, user_id: i32, event_id: i32) -> Result<bool> {
        let result = sqlx::query("DELETE FROM events WHERE id = $1 AND user_id = $2")
            .bind(event_id)
            .bind(user_id)
            .execute(&self.db)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// The next events from `today` on, capped at ten.
    pub async fn upcoming_events(&self, user_id: i32, today: NaiveDate) -> Result<Vec<ScheduleItem>> {
        let query = format!(
            "SELECT {} FROM events
             WHERE user_id = $1 AND event_date >= $2
             ORDER BY event_date, start_time
             LIMIT $3",
            SCHEDULE_COLUMNS
        );

        let rows = sqlx::query(&query)
            .bind(user_id)
            .bind(today)
            .bind(UPCOMING_LIMIT)
            .fetch(&self.db);
        collect_rows(rows, "schedule item").await
    }

    /// Events of the current Monday-Sunday week grouped by date.
    pub async fn week_schedule(&self, user_id: i32, today: NaiveDate) -> Result<WeekSchedule> {
        let (monday, sunday) = week_bounds(today);
        let query = format!(
            "SELECT {} FROM events
             WHERE user_id = $1 AND event_date BETWEEN $2 AND $3
             ORDER BY event_date, start_time",
            SCHEDULE_COLUMNS
        );

        let rows = sqlx::query(&query)
            .bind(user_id)
            .bind(monday)
            .bind(sunday)
            .fetch(&self.db);
        let items = collect_rows(rows, "schedule item").await?;

        Ok(group_by_date(items))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn test_week_bounds_midweek() {
        // Wednesday
        assert_eq!(week_bounds(date("2024-10-16")), (date("2024-10-14"), date("2024-10-20")));
    }

    #[test]
    fn test_week_bounds_monday_and_sunday() {
        assert_eq!(week_bounds(date("2024-10-14")), (date("2024-10-14"), date("2024-10-20")));
        // Sunday closes the week, it does not open the next one
        assert_eq!(week_bounds(date("2024-10-20")), (date("2024-10-14"), date("2024-10-20")));
    }

    #[test]
    fn test_week_bounds_across_month_and_year() {
        assert_eq!(week_bounds(date("2024-10-31")), (date("2024-10-28"), date("2024-11-03")));
        assert_eq!(week_bounds(date("2025-01-01")), (date("2024-12-30"), date("2025-01-05")));
    }

    #[test]
    fn test_preceding_sunday_is_outside_the_week() {
        let (monday, sunday) = week_bounds(date("2024-10-16"));
        let preceding_sunday = date("2024-10-13");

        assert!(preceding_sunday < monday);
        assert!(!(monday..=sunday).contains(&preceding_sunday));
    }
}
