use std::sync::Arc;

use async_trait::async_trait;
use auth::Authenticator;
use auth::Role;
use chrono::Utc;

use crate::domain::auth::errors::AuthError;
use crate::domain::auth::models::AuthenticatedSession;
use crate::domain::auth::models::LoginCommand;
use crate::domain::auth::models::RegisterCommand;
use crate::domain::auth::ports::AuthServicePort;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::user::ports::UserRepository;

/// Registration and login flows over the user repository.
///
/// Password verification and token issuance are delegated to the auth
/// library; this service owns the store lookups around them.
pub struct AuthService<UR>
where
    UR: UserRepository,
{
    repository: Arc<UR>,
    authenticator: Arc<Authenticator>,
}

impl<UR> AuthService<UR>
where
    UR: UserRepository,
{
    /// Create a new auth service with injected dependencies.
    pub fn new(repository: Arc<UR>, authenticator: Arc<Authenticator>) -> Self {
        Self {
            repository,
            authenticator,
        }
    }
}

#[async_trait]
impl<UR> AuthServicePort for AuthService<UR>
where
    UR: UserRepository,
{
    async fn register(&self, command: RegisterCommand) -> Result<AuthenticatedSession, AuthError> {
        if self
            .repository
            .find_by_username(&command.username)
            .await?
            .is_some()
        {
            return Err(AuthError::UsernameAlreadyExists(command.username.to_string()));
        }

        if self
            .repository
            .find_by_email(command.email.as_str())
            .await?
            .is_some()
        {
            return Err(AuthError::EmailAlreadyExists(
                command.email.as_str().to_string(),
            ));
        }

        let password_hash = self
            .authenticator
            .hash_password(&command.password)
            .map_err(|e| AuthError::Unknown(format!("Password hashing failed: {}", e)))?;

        // Self-registration never grants a privileged role; admin accounts
        // are created only through the admin-gated user-creation path.
        let now = Utc::now();
        let user = User {
            id: UserId::new(),
            username: command.username,
            email: command.email,
            password_hash,
            role: Role::Regular,
            created_at: now,
            updated_at: now,
        };

        let user = self.repository.create(user).await?;

        let access_token = self
            .authenticator
            .issue_token(&user.id.to_string(), user.username.as_str(), user.role)
            .map_err(|e| AuthError::TokenIssuance(e.to_string()))?;

        tracing::info!(user_id = %user.id, "User registered");

        Ok(AuthenticatedSession { user, access_token })
    }

    async fn login(&self, command: LoginCommand) -> Result<AuthenticatedSession, AuthError> {
        let user = self.repository.find_by_username(&command.username).await?;

        let Some(user) = user else {
            // Burn a hash so an unknown username costs the same as a wrong
            // password; both failures must be indistinguishable
            let _ = self.authenticator.hash_password(&command.password);
            tracing::warn!(username = %command.username, "Login rejected");
            return Err(AuthError::InvalidCredentials);
        };

        let session = self
            .authenticator
            .authenticate(
                &command.password,
                &user.password_hash,
                &user.id.to_string(),
                user.username.as_str(),
                user.role,
            )
            .map_err(|e| match e {
                auth::AuthenticationError::InvalidCredentials => {
                    tracing::warn!(username = %command.username, "Login rejected");
                    AuthError::InvalidCredentials
                }
                auth::AuthenticationError::Password(err) => {
                    AuthError::Unknown(format!("Password verification failed: {}", err))
                }
                auth::AuthenticationError::Token(err) => AuthError::TokenIssuance(err.to_string()),
            })?;

        tracing::info!(user_id = %user.id, "User logged in");

        Ok(AuthenticatedSession {
            user,
            access_token: session.access_token,
        })
    }
}
