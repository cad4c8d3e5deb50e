//! Authentication infrastructure library
//!
//! Provides the credential and token primitives for the task manager:
//! - Password hashing (Argon2id)
//! - Signed access-token issuance and verification (JWT, HS256)
//! - A closed role type carried in token claims
//! - Authentication coordination (verify password, then issue token)
//!
//! The service defines its own repository ports and adapts these
//! implementations; nothing in here touches persistence or HTTP.
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let hash = hasher.hash("my_password").unwrap();
//! assert!(hasher.verify("my_password", &hash).unwrap());
//! ```
//!
//! ## Access Tokens
//! ```
//! use auth::{Role, TokenService};
//!
//! let tokens = TokenService::new(b"secret_key_at_least_32_bytes_long!", 24);
//! let token = tokens.issue("user123", "alice", Role::Regular).unwrap();
//! let claims = tokens.verify(&token).unwrap();
//! assert_eq!(claims.sub, "user123");
//! assert_eq!(claims.role, Role::Regular);
//! ```
//!
//! ## Complete Authentication Flow
//! ```
//! use auth::{Authenticator, Role};
//!
//! let auth = Authenticator::new(b"secret_key_at_least_32_bytes_long!", 24);
//!
//! // Register: hash password
//! let hash = auth.hash_password("password123").unwrap();
//!
//! // Login: verify and generate token
//! let session = auth
//!     .authenticate("password123", &hash, "user123", "alice", Role::Regular)
//!     .unwrap();
//!
//! // Validate token
//! let claims = auth.verify_token(&session.access_token).unwrap();
//! assert_eq!(claims.username, "alice");
//! ```

pub mod authenticator;
pub mod password;
pub mod role;
pub mod token;

// Re-export commonly used items
pub use authenticator::AuthSession;
pub use authenticator::AuthenticationError;
pub use authenticator::Authenticator;
pub use password::PasswordError;
pub use password::PasswordHasher;
pub use role::Role;
pub use role::RoleParseError;
pub use token::AccessClaims;
pub use token::TokenError;
pub use token::TokenService;
