use thiserror::Error;

use crate::user::errors::UserError;

/// Error for registration and login operations.
///
/// Unknown username and wrong password deliberately collapse into the single
/// `InvalidCredentials` variant so a caller cannot probe which part failed.
#[derive(Debug, Clone, Error)]
pub enum AuthError {
    #[error("Invalid username or password")]
    InvalidCredentials,

    #[error("Username already exists: {0}")]
    UsernameAlreadyExists(String),

    #[error("Email already exists: {0}")]
    EmailAlreadyExists(String),

    #[error("Token issuance failed: {0}")]
    TokenIssuance(String),

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Unknown error: {0}")]
    Unknown(String),
}

impl From<UserError> for AuthError {
    fn from(err: UserError) -> Self {
        match err {
            // Store-level constraint violations surface as the same duplicate
            // errors the up-front checks produce
            UserError::UsernameAlreadyExists(username) => {
                AuthError::UsernameAlreadyExists(username)
            }
            UserError::EmailAlreadyExists(email) => AuthError::EmailAlreadyExists(email),
            UserError::DatabaseError(msg) => AuthError::DatabaseError(msg),
            other => AuthError::Unknown(other.to_string()),
        }
    }
}
