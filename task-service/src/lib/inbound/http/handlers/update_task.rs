use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use axum::Json;
use serde::Deserialize;
use thiserror::Error;

use super::ApiError;
use super::ApiSuccess;
use super::TaskData;
use crate::domain::authz::CallerIdentity;
use crate::domain::task::errors::TaskDescriptionError;
use crate::domain::task::errors::TaskTitleError;
use crate::domain::task::models::TaskDescription;
use crate::domain::task::models::TaskId;
use crate::domain::task::models::TaskStatus;
use crate::domain::task::models::TaskTitle;
use crate::domain::task::models::UpdateTaskCommand;
use crate::domain::task::ports::TaskServicePort;
use crate::inbound::http::router::AppState;

/// HTTP request body for updating a task (raw JSON)
#[derive(Debug, Deserialize)]
pub struct UpdateTaskRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub status: Option<TaskStatus>,
}

#[derive(Debug, Clone, Error)]
enum ParseUpdateTaskRequestError {
    #[error("Invalid title: {0}")]
    Title(#[from] TaskTitleError),

    #[error("Invalid description: {0}")]
    Description(#[from] TaskDescriptionError),
}

impl UpdateTaskRequest {
    fn try_into_command(self) -> Result<UpdateTaskCommand, ParseUpdateTaskRequestError> {
        let title = self.title.map(TaskTitle::new).transpose()?;
        let description = self.description.map(TaskDescription::new).transpose()?;

        Ok(UpdateTaskCommand {
            title,
            description,
            status: self.status,
        })
    }
}

impl From<ParseUpdateTaskRequestError> for ApiError {
    fn from(err: ParseUpdateTaskRequestError) -> Self {
        ApiError::UnprocessableEntity(err.to_string())
    }
}

pub async fn update_task(
    State(state): State<AppState>,
    Extension(caller): Extension<CallerIdentity>,
    Path(task_id): Path<String>,
    Json(body): Json<UpdateTaskRequest>,
) -> Result<ApiSuccess<TaskData>, ApiError> {
    let task_id = TaskId::from_string(&task_id).map_err(|e| ApiError::BadRequest(e.to_string()))?;

    // Owner resolution first: missing task is 404, foreign task is 403
    let owner_id = state
        .task_service
        .get_task_owner(&task_id)
        .await
        .map_err(ApiError::from)?;

    if !caller.can_access(&owner_id) {
        return Err(ApiError::Forbidden(
            "You can only update your own tasks".to_string(),
        ));
    }

    let command = body.try_into_command()?;

    state
        .task_service
        .update_task(&task_id, command)
        .await
        .map_err(ApiError::from)
        .map(|ref task| ApiSuccess::new(StatusCode::OK, task.into()))
}
