use thiserror::Error;

/// Error type for token operations.
///
/// The sub-cause is kept for logging; the HTTP boundary collapses all
/// verification failures to a single unauthorized response.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TokenError {
    #[error("Token is expired")]
    Expired,

    #[error("Token signature is invalid")]
    BadSignature,

    #[error("Token is malformed: {0}")]
    Malformed(String),

    #[error("Failed to sign token: {0}")]
    Signing(String),
}
