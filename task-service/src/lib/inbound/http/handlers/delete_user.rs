use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;

use crate::domain::authz::CallerIdentity;
use crate::domain::user::models::UserId;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::router::AppState;
use crate::user::errors::UserError;
use crate::user::ports::UserServicePort;

/// Admin-gated; removes the user and every task they own.
pub async fn delete_user(
    State(state): State<AppState>,
    Extension(caller): Extension<CallerIdentity>,
    Path(user_id): Path<String>,
) -> Result<ApiSuccess<()>, ApiError> {
    if !caller.is_admin() {
        return Err(ApiError::Forbidden(
            "Only admins can delete users".to_string(),
        ));
    }

    let user_id = UserId::from_string(&user_id).map_err(UserError::from)?;

    state
        .user_service
        .delete_user(&user_id)
        .await
        .map_err(ApiError::from)
        .map(|_| ApiSuccess::new(StatusCode::NO_CONTENT, ()))
}
