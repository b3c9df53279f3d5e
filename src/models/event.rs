use anyhow::{anyhow, Result};
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use sqlx::FromRow;
use std::collections::BTreeMap;

use super::formats;

/// Largest value a `DECIMAL(3,1)` column holds.
pub const MAX_DURATION_HOURS: f64 = 99.9;

pub const DEFAULT_EVENT_TYPE: &str = "lecture";

/// Number of items returned by the upcoming schedule.
pub const UPCOMING_LIMIT: i64 = 10;

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Event {
    pub id: i32,
    pub user_id: i32,
    pub title: String,
    pub description: String,
    pub event_type: String,
    pub subject: String,
    pub location: String,
    pub event_date: NaiveDate,
    pub start_time: NaiveTime,
    pub duration_hours: f64,
    pub created_at: DateTime<Utc>,
}

/// Reduced projection used by the schedule views.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct ScheduleItem {
    pub id: i32,
    pub title: String,
    pub event_type: String,
    pub subject: String,
    pub location: String,
    pub event_date: NaiveDate,
    pub start_time: NaiveTime,
    pub duration_hours: f64,
}

/// Week view keyed by `YYYY-MM-DD`; days without events are absent.
pub type WeekSchedule = BTreeMap<String, Vec<ScheduleItem>>;

/// Body of `POST /events` and `PUT /events/{id}`. An update replaces every
/// mutable field, so both share one shape.
#[derive(Debug, Clone, Deserialize)]
pub struct EventRequest {
    pub title: String,
    #[serde(default, deserialize_with = "formats::nullable_string")]
    pub description: String,
    #[serde(default = "default_event_type", deserialize_with = "event_type_or_default")]
    pub event_type: String,
    #[serde(default, deserialize_with = "formats::nullable_string")]
    pub subject: String,
    #[serde(default, deserialize_with = "formats::nullable_string")]
    pub location: String,
    pub event_date: NaiveDate,
    #[serde(deserialize_with = "formats::clock_time")]
    pub start_time: NaiveTime,
    pub duration_hours: f64,
}

fn default_event_type() -> String {
    DEFAULT_EVENT_TYPE.to_string()
}

/// Blank, null or missing event types fall back to [`DEFAULT_EVENT_TYPE`].
pub fn resolve_event_type(event_type: Option<&str>) -> String {
    match event_type.map(str::trim) {
        Some(t) if !t.is_empty() => t.to_string(),
        _ => default_event_type(),
    }
}

fn event_type_or_default<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(resolve_event_type(raw.as_deref()))
}

impl EventRequest {
    pub fn validate(&self) -> Result<()> {
        if self.title.trim().is_empty() {
            return Err(anyhow!("Event title is required"));
        }

        if self.title.chars().count() > 255 {
            return Err(anyhow!("Event title cannot be longer than 255 characters"));
        }

        if self.event_type.trim().is_empty() {
            return Err(anyhow!("Event type cannot be empty"));
        }

        if self.event_type.chars().count() > 50 {
            return Err(anyhow!("Event type cannot be longer than 50 characters"));
        }

        if self.subject.chars().count() > 100 {
            return Err(anyhow!("Subject cannot be longer than 100 characters"));
        }

        if self.location.chars().count() > 255 {
            return Err(anyhow!("Location cannot be longer than 255 characters"));
        }

        if !self.duration_hours.is_finite()
            || !(0.0..=MAX_DURATION_HOURS).contains(&self.duration_hours)
        {
            return Err(anyhow!(
                "Duration must be between 0 and {} hours",
                MAX_DURATION_HOURS
            ));
        }

        Ok(())
    }

    /// Duration rounded to the one decimal place the store keeps.
    pub fn rounded_duration(&self) -> f64 {
        (self.duration_hours * 10.0).round() / 10.0
    }
}

/// Groups schedule items by their date, preserving the incoming order inside
/// each day.
pub fn group_by_date(items: Vec<ScheduleItem>) -> WeekSchedule {
    let mut schedule = WeekSchedule::new();
    for item in items {
        schedule
            .entry(item.event_date.format(formats::DATE_FORMAT).to_string())
            .or_default()
            .push(item);
    }
    schedule
}
