use anyhow::{anyhow, Result};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::formats;

pub const DEFAULT_PRIORITY: &str = "medium";

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Task {
    pub id: i32,
    pub user_id: i32,
    pub title: String,
    pub description: String,
    /// Free-form label; lists sort it lexically.
    pub priority: String,
    pub is_completed: bool,
    pub due_date: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateTaskRequest {
    pub title: String,
    #[serde(default, deserialize_with = "formats::nullable_string")]
    pub description: String,
    #[serde(default)]
    pub priority: Option<String>,
    #[serde(default, deserialize_with = "formats::optional_date")]
    pub due_date: Option<NaiveDate>,
}

/// Full replacement of a task's mutable fields.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateTaskRequest {
    pub title: String,
    #[serde(default, deserialize_with = "formats::nullable_string")]
    pub description: String,
    #[serde(default)]
    pub priority: Option<String>,
    #[serde(default)]
    pub is_completed: bool,
    #[serde(default, deserialize_with = "formats::optional_date")]
    pub due_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ToggleTaskRequest {
    pub is_completed: bool,
}

/// Blank or missing priorities fall back to [`DEFAULT_PRIORITY`].
pub fn resolve_priority(priority: Option<&str>) -> String {
    match priority.map(str::trim) {
        Some(p) if !p.is_empty() => p.to_string(),
        _ => DEFAULT_PRIORITY.to_string(),
    }
}

fn validate_task_fields(title: &str, priority: &str) -> Result<()> {
    if title.trim().is_empty() {
        return Err(anyhow!("Task title is required"));
    }

    if title.chars().count() > 255 {
        return Err(anyhow!("Task title cannot be longer than 255 characters"));
    }

    if priority.chars().count() > 20 {
        return Err(anyhow!("Priority cannot be longer than 20 characters"));
    }

    Ok(())
}

impl CreateTaskRequest {
    pub fn priority(&self) -> String {
        resolve_priority(self.priority.as_deref())
    }

    pub fn validate(&self) -> Result<()> {
        validate_task_fields(&self.title, &self.priority())
    }
}

impl UpdateTaskRequest {
    pub fn priority(&self) -> String {
        resolve_priority(self.priority.as_deref())
    }

    pub fn validate(&self) -> Result<()> {
        validate_task_fields(&self.title, &self.priority())
    }
}
