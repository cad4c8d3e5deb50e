use async_trait::async_trait;

use crate::domain::task::errors::TaskError;
use crate::domain::task::models::CreateTaskCommand;
use crate::domain::task::models::Task;
use crate::domain::task::models::TaskId;
use crate::domain::task::models::TaskStatus;
use crate::domain::task::models::UpdateTaskCommand;
use crate::domain::user::models::UserId;

/// Port for task domain service operations.
#[async_trait]
pub trait TaskServicePort: Send + Sync + 'static {
    /// Create a new task owned by the given user.
    ///
    /// Status defaults to `Todo` when the command leaves it unset.
    ///
    /// # Errors
    /// * `OwnerNotFound` - The owning user does not exist
    /// * `DatabaseError` - Database operation failed
    async fn create_task(
        &self,
        owner_id: &UserId,
        command: CreateTaskCommand,
    ) -> Result<Task, TaskError>;

    /// Retrieve every task in the store.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn list_all_tasks(&self) -> Result<Vec<Task>, TaskError>;

    /// Retrieve tasks owned by one user, optionally filtered by status.
    ///
    /// # Errors
    /// * `OwnerNotFound` - The owning user does not exist
    /// * `DatabaseError` - Database operation failed
    async fn list_tasks_by_owner(
        &self,
        owner_id: &UserId,
        status: Option<TaskStatus>,
    ) -> Result<Vec<Task>, TaskError>;

    /// Retrieve task by unique identifier.
    ///
    /// # Errors
    /// * `NotFound` - Task does not exist
    /// * `DatabaseError` - Database operation failed
    async fn get_task(&self, id: &TaskId) -> Result<Task, TaskError>;

    /// Resolve the owning user of a task.
    ///
    /// Used by the boundary to feed the authorization policy for operations
    /// addressed by task id. A missing task surfaces here, before any
    /// ownership decision is made.
    ///
    /// # Errors
    /// * `NotFound` - Task does not exist
    /// * `DatabaseError` - Database operation failed
    async fn get_task_owner(&self, id: &TaskId) -> Result<UserId, TaskError>;

    /// Update existing task with optional fields.
    ///
    /// # Errors
    /// * `NotFound` - Task does not exist
    /// * `DatabaseError` - Database operation failed
    async fn update_task(&self, id: &TaskId, command: UpdateTaskCommand)
        -> Result<Task, TaskError>;

    /// Delete existing task.
    ///
    /// # Errors
    /// * `NotFound` - Task does not exist
    /// * `DatabaseError` - Database operation failed
    async fn delete_task(&self, id: &TaskId) -> Result<(), TaskError>;
}

/// Persistence operations for the task aggregate.
#[async_trait]
pub trait TaskRepository: Send + Sync + 'static {
    /// Persist new task to storage.
    ///
    /// # Errors
    /// * `OwnerNotFound` - The owner reference is no longer valid
    /// * `DatabaseError` - Database operation failed
    async fn create(&self, task: Task) -> Result<Task, TaskError>;

    /// Retrieve task by identifier (None if not found).
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn find_by_id(&self, id: &TaskId) -> Result<Option<Task>, TaskError>;

    /// Retrieve tasks owned by one user, optionally filtered by status.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn find_by_owner(
        &self,
        owner_id: &UserId,
        status: Option<TaskStatus>,
    ) -> Result<Vec<Task>, TaskError>;

    /// Retrieve all tasks from storage.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn list_all(&self) -> Result<Vec<Task>, TaskError>;

    /// Update existing task in storage.
    ///
    /// # Errors
    /// * `NotFound` - Task does not exist
    /// * `DatabaseError` - Database operation failed
    async fn update(&self, task: Task) -> Result<Task, TaskError>;

    /// Remove task from storage.
    ///
    /// # Errors
    /// * `NotFound` - Task does not exist
    /// * `DatabaseError` - Database operation failed
    async fn delete(&self, id: &TaskId) -> Result<(), TaskError>;
}
