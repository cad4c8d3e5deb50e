use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::User;
use crate::domain::user::models::Username;

/// Command to self-register a new account.
///
/// Deliberately has no role field: self-registration always produces a
/// regular user. Privileged accounts are created through the admin-gated
/// user-creation path.
#[derive(Debug)]
pub struct RegisterCommand {
    pub username: Username,
    pub email: EmailAddress,
    pub password: String,
}

impl RegisterCommand {
    pub fn new(username: Username, email: EmailAddress, password: String) -> Self {
        Self {
            username,
            email,
            password,
        }
    }
}

/// Command to log an existing user in.
#[derive(Debug)]
pub struct LoginCommand {
    pub username: Username,
    pub password: String,
}

impl LoginCommand {
    pub fn new(username: Username, password: String) -> Self {
        Self { username, password }
    }
}

/// A logged-in (or freshly registered) user together with their token.
#[derive(Debug)]
pub struct AuthenticatedSession {
    pub user: User,
    pub access_token: String,
}
