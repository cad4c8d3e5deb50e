use crate::password::PasswordError;
use crate::password::PasswordHasher;
use crate::role::Role;
use crate::token::AccessClaims;
use crate::token::TokenError;
use crate::token::TokenService;

/// Authentication coordinator combining password verification and token
/// issuance.
///
/// The caller is responsible for looking the user up; this type only decides
/// whether a candidate password matches a stored hash and, if so, mints a
/// token for the user's current role.
pub struct Authenticator {
    password_hasher: PasswordHasher,
    token_service: TokenService,
}

/// Result of successful authentication.
pub struct AuthSession {
    /// Signed access token
    pub access_token: String,
}

/// Authentication operation errors.
#[derive(Debug, thiserror::Error)]
pub enum AuthenticationError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Password error: {0}")]
    Password(#[from] PasswordError),

    #[error("Token error: {0}")]
    Token(#[from] TokenError),
}

impl Authenticator {
    /// Create a new authenticator.
    ///
    /// # Arguments
    /// * `secret` - Secret key for token signing
    /// * `token_ttl_hours` - Hours until issued tokens expire
    pub fn new(secret: &[u8], token_ttl_hours: i64) -> Self {
        Self {
            password_hasher: PasswordHasher::new(),
            token_service: TokenService::new(secret, token_ttl_hours),
        }
    }

    /// Hash a password for storage.
    ///
    /// # Errors
    /// * `PasswordError` - Hashing operation failed
    pub fn hash_password(&self, password: &str) -> Result<String, PasswordError> {
        self.password_hasher.hash(password)
    }

    /// Verify a candidate password against a stored hash without issuing a
    /// token. Used to keep login timing uniform when no user was found.
    ///
    /// # Errors
    /// * `PasswordError` - The stored hash could not be parsed
    pub fn verify_password(&self, password: &str, stored_hash: &str) -> Result<bool, PasswordError> {
        self.password_hasher.verify(password, stored_hash)
    }

    /// Verify credentials and issue an access token.
    ///
    /// # Arguments
    /// * `password` - Plaintext password to verify
    /// * `stored_hash` - Stored password hash
    /// * `user_id` - Unique user identifier
    /// * `username` - Username at issue time
    /// * `role` - Role at issue time
    ///
    /// # Returns
    /// AuthSession with the access token
    ///
    /// # Errors
    /// * `InvalidCredentials` - Password does not match
    /// * `Password` - Password verification failed
    /// * `Token` - Token issuance failed
    pub fn authenticate(
        &self,
        password: &str,
        stored_hash: &str,
        user_id: &str,
        username: &str,
        role: Role,
    ) -> Result<AuthSession, AuthenticationError> {
        let is_valid = self.password_hasher.verify(password, stored_hash)?;

        if !is_valid {
            return Err(AuthenticationError::InvalidCredentials);
        }

        let access_token = self.token_service.issue(user_id, username, role)?;

        Ok(AuthSession { access_token })
    }

    /// Issue an access token without password verification.
    ///
    /// Used when authentication has already happened by other means, e.g.
    /// right after registration.
    ///
    /// # Errors
    /// * `TokenError` - Token issuance failed
    pub fn issue_token(
        &self,
        user_id: &str,
        username: &str,
        role: Role,
    ) -> Result<String, TokenError> {
        self.token_service.issue(user_id, username, role)
    }

    /// Verify an access token and extract its claims.
    ///
    /// # Errors
    /// * `TokenError` - Token is expired, tampered, or malformed
    pub fn verify_token(&self, token: &str) -> Result<AccessClaims, TokenError> {
        self.token_service.verify(token)
    }
}
