use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;

use super::ApiError;
use super::ApiSuccess;
use super::TaskData;
use crate::domain::authz::CallerIdentity;
use crate::domain::task::ports::TaskServicePort;
use crate::inbound::http::router::AppState;

pub async fn list_all_tasks(
    State(state): State<AppState>,
    Extension(caller): Extension<CallerIdentity>,
) -> Result<ApiSuccess<Vec<TaskData>>, ApiError> {
    if !caller.is_admin() {
        return Err(ApiError::Forbidden(
            "Only admins can list all tasks".to_string(),
        ));
    }

    state
        .task_service
        .list_all_tasks()
        .await
        .map_err(ApiError::from)
        .map(|tasks| {
            ApiSuccess::new(
                StatusCode::OK,
                tasks.iter().map(TaskData::from).collect(),
            )
        })
}
