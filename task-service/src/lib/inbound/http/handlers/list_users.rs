use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;

use super::ApiError;
use super::ApiSuccess;
use super::UserData;
use crate::domain::authz::CallerIdentity;
use crate::domain::user::ports::UserServicePort;
use crate::inbound::http::router::AppState;

pub async fn list_users(
    State(state): State<AppState>,
    Extension(caller): Extension<CallerIdentity>,
) -> Result<ApiSuccess<Vec<UserData>>, ApiError> {
    if !caller.is_admin() {
        return Err(ApiError::Forbidden(
            "Only admins can list all users".to_string(),
        ));
    }

    state
        .user_service
        .list_users()
        .await
        .map_err(ApiError::from)
        .map(|users| {
            ApiSuccess::new(
                StatusCode::OK,
                users.iter().map(UserData::from).collect(),
            )
        })
}
