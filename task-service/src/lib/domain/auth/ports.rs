use async_trait::async_trait;

use crate::domain::auth::errors::AuthError;
use crate::domain::auth::models::AuthenticatedSession;
use crate::domain::auth::models::LoginCommand;
use crate::domain::auth::models::RegisterCommand;

/// Port for the authentication flows.
#[async_trait]
pub trait AuthServicePort: Send + Sync + 'static {
    /// Register a new regular user and issue their first token.
    ///
    /// # Errors
    /// * `UsernameAlreadyExists` - Username is already taken
    /// * `EmailAlreadyExists` - Email is already registered
    /// * `TokenIssuance` - Signing the token failed
    /// * `DatabaseError` - Database operation failed
    async fn register(&self, command: RegisterCommand) -> Result<AuthenticatedSession, AuthError>;

    /// Verify credentials and issue a token for the user's current role.
    ///
    /// # Errors
    /// * `InvalidCredentials` - Unknown username or wrong password
    ///   (indistinguishable by design)
    /// * `TokenIssuance` - Signing the token failed
    /// * `DatabaseError` - Database operation failed
    async fn login(&self, command: LoginCommand) -> Result<AuthenticatedSession, AuthError>;
}
