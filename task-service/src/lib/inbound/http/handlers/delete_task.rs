use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;

use super::ApiError;
use super::ApiSuccess;
use crate::domain::authz::CallerIdentity;
use crate::domain::task::models::TaskId;
use crate::domain::task::ports::TaskServicePort;
use crate::inbound::http::router::AppState;

pub async fn delete_task(
    State(state): State<AppState>,
    Extension(caller): Extension<CallerIdentity>,
    Path(task_id): Path<String>,
) -> Result<ApiSuccess<()>, ApiError> {
    let task_id = TaskId::from_string(&task_id).map_err(|e| ApiError::BadRequest(e.to_string()))?;

    let owner_id = state
        .task_service
        .get_task_owner(&task_id)
        .await
        .map_err(ApiError::from)?;

    if !caller.can_access(&owner_id) {
        return Err(ApiError::Forbidden(
            "You can only delete your own tasks".to_string(),
        ));
    }

    state
        .task_service
        .delete_task(&task_id)
        .await
        .map_err(ApiError::from)
        .map(|_| ApiSuccess::new(StatusCode::NO_CONTENT, ()))
}
