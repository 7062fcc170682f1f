//! Task repository implementation.

use async_trait::async_trait;
use sqlx::PgPool;

use taskhub_core::error::{AppError, ErrorKind};
use taskhub_core::result::AppResult;
use taskhub_core::types::{TaskId, UserId};
use taskhub_entity::task::{CreateTask, Task, UpdateTask};

use crate::store::TaskStore;

/// Repository for task CRUD scoped by owner.
#[derive(Debug, Clone)]
pub struct TaskRepository {
    pool: PgPool,
}

impl TaskRepository {
    /// Create a new task repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TaskStore for TaskRepository {
    async fn list_for_owner(&self, owner: UserId) -> AppResult<Vec<Task>> {
        sqlx::query_as::<_, Task>(
            "SELECT * FROM tasks WHERE owner_id = $1 ORDER BY created_at ASC, id ASC",
        )
        .bind(owner)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list tasks", e))
    }

    async fn find_for_owner(&self, id: TaskId, owner: UserId) -> AppResult<Option<Task>> {
        sqlx::query_as::<_, Task>("SELECT * FROM tasks WHERE id = $1 AND owner_id = $2")
            .bind(id)
            .bind(owner)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find task", e))
    }

    async fn create(&self, data: &CreateTask) -> AppResult<Task> {
        sqlx::query_as::<_, Task>(
            "INSERT INTO tasks (owner_id, title, description, completed) \
             VALUES ($1, $2, $3, $4) \
             RETURNING *",
        )
        .bind(data.owner_id)
        .bind(&data.title)
        .bind(&data.description)
        .bind(data.completed)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create task", e))
    }

    async fn update_for_owner(
        &self,
        id: TaskId,
        owner: UserId,
        data: &UpdateTask,
    ) -> AppResult<Option<Task>> {
        sqlx::query_as::<_, Task>(
            "UPDATE tasks SET title = $3, description = $4, completed = $5 \
             WHERE id = $1 AND owner_id = $2 \
             RETURNING *",
        )
        .bind(id)
        .bind(owner)
        .bind(&data.title)
        .bind(&data.description)
        .bind(data.completed)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to update task", e))
    }

    async fn delete_for_owner(&self, id: TaskId, owner: UserId) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM tasks WHERE id = $1 AND owner_id = $2")
            .bind(id)
            .bind(owner)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to delete task", e))?;
        Ok(result.rows_affected() > 0)
    }
}
