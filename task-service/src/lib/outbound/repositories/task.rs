use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::task::errors::TaskError;
use crate::domain::task::models::Task;
use crate::domain::task::models::TaskDescription;
use crate::domain::task::models::TaskId;
use crate::domain::task::models::TaskStatus;
use crate::domain::task::models::TaskTitle;
use crate::domain::task::ports::TaskRepository;
use crate::domain::user::models::UserId;

pub struct PostgresTaskRepository {
    pool: PgPool,
}

impl PostgresTaskRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct TaskRow {
    id: Uuid,
    title: String,
    description: Option<String>,
    status: String,
    owner_id: Uuid,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<TaskRow> for Task {
    type Error = TaskError;

    fn try_from(row: TaskRow) -> Result<Self, TaskError> {
        let status = row
            .status
            .parse::<TaskStatus>()
            .map_err(|e| TaskError::DatabaseError(format!("Corrupt status column: {}", e)))?;

        Ok(Task {
            id: TaskId(row.id),
            title: TaskTitle::new(row.title)?,
            description: row.description.map(TaskDescription::new).transpose()?,
            status,
            owner_id: UserId(row.owner_id),
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

const SELECT_TASK: &str =
    "SELECT id, title, description, status, owner_id, created_at, updated_at FROM tasks";

#[async_trait]
impl TaskRepository for PostgresTaskRepository {
    async fn create(&self, task: Task) -> Result<Task, TaskError> {
        sqlx::query(
            r#"
            INSERT INTO tasks (id, title, description, status, owner_id, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(task.id.0)
        .bind(task.title.as_str())
        .bind(task.description.as_ref().map(|d| d.as_str()))
        .bind(task.status.to_string())
        .bind(task.owner_id.0)
        .bind(task.created_at)
        .bind(task.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            // The service checked the owner, but it may have been deleted in
            // between; the foreign key is the authoritative guard
            if let Some(db_err) = e.as_database_error() {
                if db_err.is_foreign_key_violation() {
                    return TaskError::OwnerNotFound(task.owner_id.to_string());
                }
            }
            TaskError::DatabaseError(e.to_string())
        })?;

        Ok(task)
    }

    async fn find_by_id(&self, id: &TaskId) -> Result<Option<Task>, TaskError> {
        let row = sqlx::query_as::<_, TaskRow>(&format!("{} WHERE id = $1", SELECT_TASK))
            .bind(id.0)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| TaskError::DatabaseError(e.to_string()))?;

        row.map(Task::try_from).transpose()
    }

    async fn find_by_owner(
        &self,
        owner_id: &UserId,
        status: Option<TaskStatus>,
    ) -> Result<Vec<Task>, TaskError> {
        let rows = match status {
            Some(status) => {
                sqlx::query_as::<_, TaskRow>(&format!(
                    "{} WHERE owner_id = $1 AND status = $2 ORDER BY created_at DESC",
                    SELECT_TASK
                ))
                .bind(owner_id.0)
                .bind(status.to_string())
                .fetch_all(&self.pool)
                .await
            }
            None => {
                sqlx::query_as::<_, TaskRow>(&format!(
                    "{} WHERE owner_id = $1 ORDER BY created_at DESC",
                    SELECT_TASK
                ))
                .bind(owner_id.0)
                .fetch_all(&self.pool)
                .await
            }
        }
        .map_err(|e| TaskError::DatabaseError(e.to_string()))?;

        rows.into_iter().map(Task::try_from).collect()
    }

    async fn list_all(&self) -> Result<Vec<Task>, TaskError> {
        let rows =
            sqlx::query_as::<_, TaskRow>(&format!("{} ORDER BY created_at DESC", SELECT_TASK))
                .fetch_all(&self.pool)
                .await
                .map_err(|e| TaskError::DatabaseError(e.to_string()))?;

        rows.into_iter().map(Task::try_from).collect()
    }

    async fn update(&self, task: Task) -> Result<Task, TaskError> {
        let result = sqlx::query(
            r#"
            UPDATE tasks
            SET title = $2, description = $3, status = $4, updated_at = $5
            WHERE id = $1
            "#,
        )
        .bind(task.id.0)
        .bind(task.title.as_str())
        .bind(task.description.as_ref().map(|d| d.as_str()))
        .bind(task.status.to_string())
        .bind(task.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| TaskError::DatabaseError(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(TaskError::NotFound(task.id.to_string()));
        }

        Ok(task)
    }

    async fn delete(&self, id: &TaskId) -> Result<(), TaskError> {
        let result = sqlx::query("DELETE FROM tasks WHERE id = $1")
            .bind(id.0)
            .execute(&self.pool)
            .await
            .map_err(|e| TaskError::DatabaseError(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(TaskError::NotFound(id.to_string()));
        }

        Ok(())
    }
}
