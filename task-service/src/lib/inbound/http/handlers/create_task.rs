use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use axum::Json;
use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

use super::ApiError;
use super::ApiSuccess;
use crate::domain::authz::CallerIdentity;
use crate::domain::task::errors::TaskDescriptionError;
use crate::domain::task::errors::TaskTitleError;
use crate::domain::task::models::CreateTaskCommand;
use crate::domain::task::models::Task;
use crate::domain::task::models::TaskDescription;
use crate::domain::task::models::TaskStatus;
use crate::domain::task::models::TaskTitle;
use crate::domain::task::ports::TaskServicePort;
use crate::domain::user::models::UserId;
use crate::inbound::http::router::AppState;
use crate::user::errors::UserError;

pub async fn create_task(
    State(state): State<AppState>,
    Extension(caller): Extension<CallerIdentity>,
    Path(user_id): Path<String>,
    Json(body): Json<CreateTaskRequest>,
) -> Result<ApiSuccess<TaskData>, ApiError> {
    let owner_id = UserId::from_string(&user_id).map_err(UserError::from)?;

    if !caller.can_access(&owner_id) {
        return Err(ApiError::Forbidden(
            "You can only create tasks for yourself".to_string(),
        ));
    }

    state
        .task_service
        .create_task(&owner_id, body.try_into_command()?)
        .await
        .map_err(ApiError::from)
        .map(|ref task| ApiSuccess::new(StatusCode::CREATED, task.into()))
}

/// HTTP request body for creating a task (raw JSON)
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CreateTaskRequest {
    title: String,
    description: Option<String>,
    status: Option<TaskStatus>,
}

#[derive(Debug, Clone, Error)]
enum ParseCreateTaskRequestError {
    #[error("Invalid title: {0}")]
    Title(#[from] TaskTitleError),

    #[error("Invalid description: {0}")]
    Description(#[from] TaskDescriptionError),
}

impl CreateTaskRequest {
    fn try_into_command(self) -> Result<CreateTaskCommand, ParseCreateTaskRequestError> {
        let title = TaskTitle::new(self.title)?;
        let description = self.description.map(TaskDescription::new).transpose()?;
        Ok(CreateTaskCommand::new(title, description, self.status))
    }
}

impl From<ParseCreateTaskRequestError> for ApiError {
    fn from(err: ParseCreateTaskRequestError) -> Self {
        ApiError::UnprocessableEntity(err.to_string())
    }
}

/// Task projection returned by the task endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaskData {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    pub status: TaskStatus,
    pub owner_id: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&Task> for TaskData {
    fn from(task: &Task) -> Self {
        Self {
            id: task.id.to_string(),
            title: task.title.as_str().to_string(),
            description: task
                .description
                .as_ref()
                .map(|description| description.as_str().to_string()),
            status: task.status,
            owner_id: task.owner_id.to_string(),
            created_at: task.created_at,
            updated_at: task.updated_at,
        }
    }
}
