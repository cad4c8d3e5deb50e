use chrono::Duration;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

use crate::role::Role;

/// Claims encoded in an access token.
///
/// The token is the only thing the server trusts about a caller: identity and
/// role are read from here after signature verification, never re-queried by
/// name mid-request.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AccessClaims {
    /// Subject: the user's unique identifier
    pub sub: String,

    /// Username at issue time (display only, not an authority)
    pub username: String,

    /// Role at issue time; stale until expiry if the user is demoted
    pub role: Role,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

impl AccessClaims {
    /// Create claims for a user with expiry relative to now.
    ///
    /// # Arguments
    /// * `user_id` - Unique user identifier
    /// * `username` - Username at issue time
    /// * `role` - Role at issue time
    /// * `ttl` - Time until the token expires
    pub fn new(user_id: impl ToString, username: impl ToString, role: Role, ttl: Duration) -> Self {
        let now = Utc::now();

        Self {
            sub: user_id.to_string(),
            username: username.to_string(),
            role,
            iat: now.timestamp(),
            exp: (now + ttl).timestamp(),
        }
    }

    /// Check whether the claims are expired at the given timestamp.
    pub fn is_expired(&self, current_timestamp: i64) -> bool {
        self.exp < current_timestamp
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_sets_expiry_relative_to_issue_time() {
        let claims = AccessClaims::new("user123", "alice", Role::Regular, Duration::hours(24));

        assert_eq!(claims.sub, "user123");
        assert_eq!(claims.username, "alice");
        assert_eq!(claims.role, Role::Regular);
        assert_eq!(claims.exp - claims.iat, 24 * 60 * 60);
    }

    #[test]
    fn test_is_expired() {
        let mut claims = AccessClaims::new("user123", "alice", Role::Admin, Duration::hours(1));
        claims.iat = 0;
        claims.exp = 1000;

        assert!(!claims.is_expired(999));
        assert!(!claims.is_expired(1000)); // exactly at expiration
        assert!(claims.is_expired(1001));
    }
}
