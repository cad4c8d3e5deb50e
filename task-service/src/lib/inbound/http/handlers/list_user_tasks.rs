use axum::extract::Path;
use axum::extract::Query;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use serde::Deserialize;

use super::ApiError;
use super::ApiSuccess;
use super::TaskData;
use crate::domain::authz::CallerIdentity;
use crate::domain::task::models::TaskStatus;
use crate::domain::task::ports::TaskServicePort;
use crate::domain::user::models::UserId;
use crate::inbound::http::router::AppState;
use crate::user::errors::UserError;

#[derive(Debug, Deserialize)]
pub struct ListUserTasksQuery {
    status: Option<String>,
}

pub async fn list_user_tasks(
    State(state): State<AppState>,
    Extension(caller): Extension<CallerIdentity>,
    Path(user_id): Path<String>,
    Query(query): Query<ListUserTasksQuery>,
) -> Result<ApiSuccess<Vec<TaskData>>, ApiError> {
    let owner_id = UserId::from_string(&user_id).map_err(UserError::from)?;

    if !caller.can_access(&owner_id) {
        return Err(ApiError::Forbidden(
            "You can only view your own tasks".to_string(),
        ));
    }

    let status = query
        .status
        .map(|status| status.parse::<TaskStatus>())
        .transpose()
        .map_err(|e| ApiError::UnprocessableEntity(e.to_string()))?;

    state
        .task_service
        .list_tasks_by_owner(&owner_id, status)
        .await
        .map_err(ApiError::from)
        .map(|tasks| {
            ApiSuccess::new(
                StatusCode::OK,
                tasks.iter().map(TaskData::from).collect(),
            )
        })
}
