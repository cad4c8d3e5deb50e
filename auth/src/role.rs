use std::fmt;
use std::str::FromStr;

use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

/// Role carried in access-token claims and on user records.
///
/// Closed set: authorization code matches exhaustively on this enum, so a new
/// role cannot be introduced without the compiler pointing at every decision
/// site.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    Regular,
    Admin,
}

/// Error for role parsing failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RoleParseError {
    #[error("Unknown role: {0}")]
    Unknown(String),
}

impl Role {
    /// Whether this role grants unconditional access.
    pub fn is_admin(&self) -> bool {
        matches!(self, Role::Admin)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Regular => write!(f, "REGULAR"),
            Role::Admin => write!(f, "ADMIN"),
        }
    }
}

impl FromStr for Role {
    type Err = RoleParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "REGULAR" => Ok(Role::Regular),
            "ADMIN" => Ok(Role::Admin),
            other => Err(RoleParseError::Unknown(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_round_trips_through_from_str() {
        for role in [Role::Regular, Role::Admin] {
            assert_eq!(role.to_string().parse::<Role>(), Ok(role));
        }
    }

    #[test]
    fn test_unknown_role_is_rejected() {
        let result = "SUPERUSER".parse::<Role>();
        assert_eq!(result, Err(RoleParseError::Unknown("SUPERUSER".to_string())));
    }

    #[test]
    fn test_is_admin() {
        assert!(Role::Admin.is_admin());
        assert!(!Role::Regular.is_admin());
    }
}
