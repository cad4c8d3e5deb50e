use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;

use crate::domain::task::errors::TaskError;
use crate::domain::task::models::CreateTaskCommand;
use crate::domain::task::models::Task;
use crate::domain::task::models::TaskId;
use crate::domain::task::models::TaskStatus;
use crate::domain::task::models::UpdateTaskCommand;
use crate::domain::task::ports::TaskRepository;
use crate::domain::task::ports::TaskServicePort;
use crate::domain::user::models::UserId;
use crate::user::ports::UserRepository;

/// Domain service implementation for task operations.
///
/// Consults the user repository only to validate owner references; the
/// caller's own identity arrives pre-verified from the boundary.
pub struct TaskService<TR, UR>
where
    TR: TaskRepository,
    UR: UserRepository,
{
    repository: Arc<TR>,
    user_repository: Arc<UR>,
}

impl<TR, UR> TaskService<TR, UR>
where
    TR: TaskRepository,
    UR: UserRepository,
{
    /// Create a new task service with injected repositories.
    pub fn new(repository: Arc<TR>, user_repository: Arc<UR>) -> Self {
        Self {
            repository,
            user_repository,
        }
    }

    async fn ensure_owner_exists(&self, owner_id: &UserId) -> Result<(), TaskError> {
        let owner = self
            .user_repository
            .find_by_id(owner_id)
            .await
            .map_err(|e| TaskError::DatabaseError(e.to_string()))?;

        match owner {
            Some(_) => Ok(()),
            None => Err(TaskError::OwnerNotFound(owner_id.to_string())),
        }
    }
}

#[async_trait]
impl<TR, UR> TaskServicePort for TaskService<TR, UR>
where
    TR: TaskRepository,
    UR: UserRepository,
{
    async fn create_task(
        &self,
        owner_id: &UserId,
        command: CreateTaskCommand,
    ) -> Result<Task, TaskError> {
        self.ensure_owner_exists(owner_id).await?;

        let now = Utc::now();
        let task = Task {
            id: TaskId::new(),
            title: command.title,
            description: command.description,
            status: command.status.unwrap_or(TaskStatus::Todo),
            owner_id: *owner_id,
            created_at: now,
            updated_at: now,
        };

        let created_task = self.repository.create(task).await?;

        tracing::info!(task_id = %created_task.id, owner_id = %owner_id, "Task created");

        Ok(created_task)
    }

    async fn list_all_tasks(&self) -> Result<Vec<Task>, TaskError> {
        self.repository.list_all().await
    }

    async fn list_tasks_by_owner(
        &self,
        owner_id: &UserId,
        status: Option<TaskStatus>,
    ) -> Result<Vec<Task>, TaskError> {
        self.ensure_owner_exists(owner_id).await?;

        self.repository.find_by_owner(owner_id, status).await
    }

    async fn get_task(&self, id: &TaskId) -> Result<Task, TaskError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(TaskError::NotFound(id.to_string()))
    }

    async fn get_task_owner(&self, id: &TaskId) -> Result<UserId, TaskError> {
        self.get_task(id).await.map(|task| task.owner_id)
    }

    async fn update_task(
        &self,
        id: &TaskId,
        command: UpdateTaskCommand,
    ) -> Result<Task, TaskError> {
        let mut task = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or(TaskError::NotFound(id.to_string()))?;

        if let Some(new_title) = command.title {
            task.title = new_title;
        }

        if let Some(new_description) = command.description {
            task.description = Some(new_description);
        }

        if let Some(new_status) = command.status {
            task.status = new_status;
        }

        task.updated_at = Utc::now();

        let updated_task = self.repository.update(task).await?;

        tracing::info!(task_id = %updated_task.id, status = %updated_task.status, "Task updated");

        Ok(updated_task)
    }

    async fn delete_task(&self, id: &TaskId) -> Result<(), TaskError> {
        self.repository.delete(id).await?;

        tracing::info!(task_id = %id, "Task deleted");

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use auth::Role;
    use mockall::mock;
    use mockall::predicate::*;

    use super::*;
    use crate::domain::task::models::TaskDescription;
    use crate::domain::task::models::TaskTitle;
    use crate::domain::user::errors::UserError;
    use crate::domain::user::models::EmailAddress;
    use crate::domain::user::models::User;
    use crate::domain::user::models::Username;

    mock! {
        pub TestTaskRepository {}

        #[async_trait]
        impl TaskRepository for TestTaskRepository {
            async fn create(&self, task: Task) -> Result<Task, TaskError>;
            async fn find_by_id(&self, id: &TaskId) -> Result<Option<Task>, TaskError>;
            async fn find_by_owner(&self, owner_id: &UserId, status: Option<TaskStatus>) -> Result<Vec<Task>, TaskError>;
            async fn list_all(&self) -> Result<Vec<Task>, TaskError>;
            async fn update(&self, task: Task) -> Result<Task, TaskError>;
            async fn delete(&self, id: &TaskId) -> Result<(), TaskError>;
        }
    }

    mock! {
        pub TestUserRepository {}

        #[async_trait]
        impl UserRepository for TestUserRepository {
            async fn create(&self, user: User) -> Result<User, UserError>;
            async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserError>;
            async fn find_by_username(&self, username: &Username) -> Result<Option<User>, UserError>;
            async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserError>;
            async fn list_all(&self) -> Result<Vec<User>, UserError>;
            async fn update(&self, user: User) -> Result<User, UserError>;
            async fn delete(&self, id: &UserId) -> Result<(), UserError>;
        }
    }

    fn owner() -> User {
        let now = Utc::now();
        User {
            id: UserId::new(),
            username: Username::new("owner".to_string()).unwrap(),
            email: EmailAddress::new("owner@example.com".to_string()).unwrap(),
            password_hash: "$argon2id$test_hash".to_string(),
            role: Role::Regular,
            created_at: now,
            updated_at: now,
        }
    }

    fn existing_task(owner_id: UserId) -> Task {
        let now = Utc::now();
        Task {
            id: TaskId::new(),
            title: TaskTitle::new("Write report".to_string()).unwrap(),
            description: Some(TaskDescription::new("Quarterly numbers".to_string()).unwrap()),
            status: TaskStatus::InProgress,
            owner_id,
            created_at: now,
            updated_at: now,
        }
    }

    fn user_repo_with_owner(user: User) -> MockTestUserRepository {
        let mut user_repository = MockTestUserRepository::new();
        let user_id = user.id;
        user_repository
            .expect_find_by_id()
            .withf(move |id| *id == user_id)
            .returning(move |_| Ok(Some(user.clone())));
        user_repository
    }

    #[tokio::test]
    async fn test_create_task_defaults_to_todo() {
        let user = owner();
        let owner_id = user.id;
        let user_repository = user_repo_with_owner(user);

        let mut repository = MockTestTaskRepository::new();
        repository
            .expect_create()
            .withf(move |task| {
                task.title.as_str() == "Write report"
                    && task.status == TaskStatus::Todo
                    && task.owner_id == owner_id
            })
            .times(1)
            .returning(|task| Ok(task));

        let service = TaskService::new(Arc::new(repository), Arc::new(user_repository));

        let command = CreateTaskCommand {
            title: TaskTitle::new("Write report".to_string()).unwrap(),
            description: None,
            status: None,
        };

        let task = service.create_task(&owner_id, command).await.unwrap();
        assert_eq!(task.status, TaskStatus::Todo);
        assert_eq!(task.owner_id, owner_id);
    }

    #[tokio::test]
    async fn test_create_task_keeps_explicit_status() {
        let user = owner();
        let owner_id = user.id;
        let user_repository = user_repo_with_owner(user);

        let mut repository = MockTestTaskRepository::new();
        repository
            .expect_create()
            .withf(|task| task.status == TaskStatus::Done)
            .times(1)
            .returning(|task| Ok(task));

        let service = TaskService::new(Arc::new(repository), Arc::new(user_repository));

        let command = CreateTaskCommand {
            title: TaskTitle::new("Ship it".to_string()).unwrap(),
            description: None,
            status: Some(TaskStatus::Done),
        };

        let task = service.create_task(&owner_id, command).await.unwrap();
        assert_eq!(task.status, TaskStatus::Done);
    }

    #[tokio::test]
    async fn test_create_task_unknown_owner() {
        let mut user_repository = MockTestUserRepository::new();
        user_repository
            .expect_find_by_id()
            .times(1)
            .returning(|_| Ok(None));

        let mut repository = MockTestTaskRepository::new();
        repository.expect_create().times(0);

        let service = TaskService::new(Arc::new(repository), Arc::new(user_repository));

        let command = CreateTaskCommand {
            title: TaskTitle::new("Orphan".to_string()).unwrap(),
            description: None,
            status: None,
        };

        let result = service.create_task(&UserId::new(), command).await;
        assert!(matches!(result.unwrap_err(), TaskError::OwnerNotFound(_)));
    }

    #[tokio::test]
    async fn test_list_tasks_by_owner_passes_status_filter() {
        let user = owner();
        let owner_id = user.id;
        let user_repository = user_repo_with_owner(user);

        let mut repository = MockTestTaskRepository::new();
        repository
            .expect_find_by_owner()
            .withf(move |id, status| *id == owner_id && *status == Some(TaskStatus::Done))
            .times(1)
            .returning(|_, _| Ok(vec![]));

        let service = TaskService::new(Arc::new(repository), Arc::new(user_repository));

        let tasks = service
            .list_tasks_by_owner(&owner_id, Some(TaskStatus::Done))
            .await
            .unwrap();
        assert!(tasks.is_empty());
    }

    #[tokio::test]
    async fn test_list_tasks_by_unknown_owner() {
        let mut user_repository = MockTestUserRepository::new();
        user_repository
            .expect_find_by_id()
            .times(1)
            .returning(|_| Ok(None));

        let repository = MockTestTaskRepository::new();

        let service = TaskService::new(Arc::new(repository), Arc::new(user_repository));

        let result = service.list_tasks_by_owner(&UserId::new(), None).await;
        assert!(matches!(result.unwrap_err(), TaskError::OwnerNotFound(_)));
    }

    #[tokio::test]
    async fn test_get_task_owner_resolves() {
        let owner_id = UserId::new();
        let task = existing_task(owner_id);
        let task_id = task.id;

        let mut repository = MockTestTaskRepository::new();
        let returned = task.clone();
        repository
            .expect_find_by_id()
            .withf(move |id| *id == task_id)
            .times(1)
            .returning(move |_| Ok(Some(returned.clone())));

        let user_repository = MockTestUserRepository::new();

        let service = TaskService::new(Arc::new(repository), Arc::new(user_repository));

        let resolved = service.get_task_owner(&task_id).await.unwrap();
        assert_eq!(resolved, owner_id);
    }

    #[tokio::test]
    async fn test_get_task_owner_not_found() {
        let mut repository = MockTestTaskRepository::new();
        repository
            .expect_find_by_id()
            .times(1)
            .returning(|_| Ok(None));

        let user_repository = MockTestUserRepository::new();

        let service = TaskService::new(Arc::new(repository), Arc::new(user_repository));

        let result = service.get_task_owner(&TaskId::new()).await;
        assert!(matches!(result.unwrap_err(), TaskError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_update_task_partial_fields() {
        let owner_id = UserId::new();
        let task = existing_task(owner_id);
        let task_id = task.id;
        let prior_description = task.description.clone();

        let mut repository = MockTestTaskRepository::new();
        let returned = task.clone();
        repository
            .expect_find_by_id()
            .times(1)
            .returning(move |_| Ok(Some(returned.clone())));

        let expected_description = prior_description.clone();
        repository
            .expect_update()
            .withf(move |task| {
                task.title.as_str() == "Write final report"
                    && task.description == expected_description
                    && task.status == TaskStatus::InProgress
            })
            .times(1)
            .returning(|task| Ok(task));

        let user_repository = MockTestUserRepository::new();

        let service = TaskService::new(Arc::new(repository), Arc::new(user_repository));

        let command = UpdateTaskCommand {
            title: Some(TaskTitle::new("Write final report".to_string()).unwrap()),
            description: None,
            status: None,
        };

        let updated = service.update_task(&task_id, command).await.unwrap();
        assert_eq!(updated.title.as_str(), "Write final report");
        assert_eq!(updated.description, prior_description);
    }

    #[tokio::test]
    async fn test_update_task_not_found() {
        let mut repository = MockTestTaskRepository::new();
        repository
            .expect_find_by_id()
            .times(1)
            .returning(|_| Ok(None));
        repository.expect_update().times(0);

        let user_repository = MockTestUserRepository::new();

        let service = TaskService::new(Arc::new(repository), Arc::new(user_repository));

        let command = UpdateTaskCommand {
            title: None,
            description: None,
            status: Some(TaskStatus::Done),
        };

        let result = service.update_task(&TaskId::new(), command).await;
        assert!(matches!(result.unwrap_err(), TaskError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_delete_task_success() {
        let task_id = TaskId::new();

        let mut repository = MockTestTaskRepository::new();
        repository
            .expect_delete()
            .withf(move |id| *id == task_id)
            .times(1)
            .returning(|_| Ok(()));

        let user_repository = MockTestUserRepository::new();

        let service = TaskService::new(Arc::new(repository), Arc::new(user_repository));

        assert!(service.delete_task(&task_id).await.is_ok());
    }

    #[tokio::test]
    async fn test_delete_task_not_found() {
        let task_id = TaskId::new();

        let mut repository = MockTestTaskRepository::new();
        repository
            .expect_delete()
            .times(1)
            .returning(move |_| Err(TaskError::NotFound(task_id.to_string())));

        let user_repository = MockTestUserRepository::new();

        let service = TaskService::new(Arc::new(repository), Arc::new(user_repository));

        let result = service.delete_task(&task_id).await;
        assert!(matches!(result.unwrap_err(), TaskError::NotFound(_)));
    }
}
