use anyhow::{anyhow, Result};
use sqlx::PgPool;

use crate::models::{CreateTaskRequest, Task, UpdateTaskRequest};
use crate::services::collect_rows;

const TASK_COLUMNS: &str =
    "id, user_id, title, description, priority, is_completed, due_date, created_at";

/// To-do items. Every query is filtered by the owning user.
#[derive(Debug, Clone)]
pub struct TaskService {
    db: PgPool,
}

impl TaskService {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Ordered by due date, then by the priority label as plain text.
    pub async fn list_tasks(&self, user_id: i32) -> Result<Vec<Task>> {
        let query = format!(
            "SELECT {} FROM tasks WHERE user_id = $1 ORDER BY due_date, priority",
            TASK_COLUMNS
        );

        let rows = sqlx::query(&query).bind(user_id).fetch(&self.db);
        collect_rows(rows, "task").await
    }

    pub async fn get_task(&self, user_id: i32, task_id: i32) -> Result<Option<Task>> {
        let query = format!("SELECT {} FROM tasks WHERE id = $1 AND user_id = $2", TASK_COLUMNS);

        let task = sqlx::query_as::<_, Task>(&query)
            .bind(task_id)
            .bind(user_id)
            .fetch_optional(&self.db)
            .await?;

        Ok(task)
    }

    pub async fn create_task(&self, user_id: i32, request: &CreateTaskRequest) -> Result<Task> {
        let task_id: i32 = sqlx::query_scalar(
            r#"
            INSERT INTO tasks (user_id, title, description, priority, due_date)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id
            "#,
        )
        .bind(user_id)
        .bind(request.title.trim())
        .bind(&request.description)
        .bind(request.priority())
        .bind(request.due_date)
        .fetch_one(&self.db)
        .await?;

        self.get_task(user_id, task_id)
            .await?
            .ok_or_else(|| anyhow!("task {} was created but could not be read back", task_id))
    }

    /// Replace every mutable field and return the stored row, or `None` when
    /// the task is missing or owned by someone else.
    pub async fn update_task(
        &self,
        user_id: i32,
        task_id: i32,
        request: &UpdateTaskRequest,
    ) -> Result<Option<Task>> {
        let result = sqlx::query(
            r#"
            UPDATE tasks
            SET title = $1, description = $2, priority = $3, is_completed = $4, due_date = $5
            WHERE id = $6 AND user_id = $7
            "#,
        )
        .bind(request.title.trim())
        .bind(&request.description)
        .bind(request.priority())
        .bind(request.is_completed)
        .bind(request.due_date)
        .bind(task_id)
        .bind(user_id)
        .execute(&self.db)
        .await?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }

        self.get_task(user_id, task_id).await
    }

    pub async fn set_completion(
        &self,
        user_id: i32,
        task_id: i32,
        is_completed: bool,
    ) -> Result<Option<Task>> {
        let result = sqlx::query("UPDATE tasks SET is_completed = $1 WHERE id = $2 AND user_id = $3")
            .bind(is_completed)
            .bind(task_id)
            .bind(user_id)
            .execute(&self.db)
            .await?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }

        self.get_task(user_id, task_id).await
    }

    pub async fn delete_task(&self, user_id: i32, task_id: i32) -> Result<bool> {
        let result = sqlx::query("DELETE FROM tasks WHERE id = $1 AND user_id = $2")
            .bind(task_id)
            .bind(user_id)
            .execute(&self.db)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
