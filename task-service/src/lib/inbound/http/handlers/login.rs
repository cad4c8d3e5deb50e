use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use super::register::AuthResponseData;
use super::ApiError;
use super::ApiSuccess;
use crate::domain::auth::models::LoginCommand;
use crate::domain::auth::ports::AuthServicePort;
use crate::domain::user::models::Username;
use crate::inbound::http::router::AppState;

pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginRequestBody>,
) -> Result<ApiSuccess<AuthResponseData>, ApiError> {
    // A syntactically invalid username cannot match any account; answer
    // exactly as a failed lookup would
    let username = Username::new(body.username)
        .map_err(|_| ApiError::Unauthorized("Invalid username or password".to_string()))?;

    state
        .auth_service
        .login(LoginCommand::new(username, body.password))
        .await
        .map_err(ApiError::from)
        .map(|session| {
            ApiSuccess::new(
                StatusCode::OK,
                AuthResponseData::new(session, "Login successful!"),
            )
        })
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoginRequestBody {
    username: String,
    password: String,
}
