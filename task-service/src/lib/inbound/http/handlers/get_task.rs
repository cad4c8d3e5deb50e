use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;

use super::ApiError;
use super::ApiSuccess;
use super::TaskData;
use crate::domain::authz::CallerIdentity;
use crate::domain::task::models::TaskId;
use crate::domain::task::ports::TaskServicePort;
use crate::inbound::http::router::AppState;

pub async fn get_task(
    State(state): State<AppState>,
    Extension(caller): Extension<CallerIdentity>,
    Path(task_id): Path<String>,
) -> Result<ApiSuccess<TaskData>, ApiError> {
    let task_id = TaskId::from_string(&task_id).map_err(|e| ApiError::BadRequest(e.to_string()))?;

    // Resolve the owner first: a missing task is a 404 no matter who asks.
    // An existing task someone else owns answers 403 (this deliberately
    // reveals existence; see the design notes)
    let owner_id = state
        .task_service
        .get_task_owner(&task_id)
        .await
        .map_err(ApiError::from)?;

    if !caller.can_access(&owner_id) {
        return Err(ApiError::Forbidden(
            "You can only view your own tasks".to_string(),
        ));
    }

    state
        .task_service
        .get_task(&task_id)
        .await
        .map_err(ApiError::from)
        .map(|ref task| ApiSuccess::new(StatusCode::OK, task.into()))
}
