use chrono::Duration;
use jsonwebtoken::decode;
use jsonwebtoken::encode;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::Algorithm;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;
use jsonwebtoken::Validation;

use super::claims::AccessClaims;
use super::errors::TokenError;
use crate::role::Role;

/// Issues and verifies signed, stateless access tokens.
///
/// Uses HS256 (HMAC with SHA-256). The key material is loaded once at startup
/// and immutable afterwards; issuing and verifying are pure over the inputs.
///
/// # Security Notes
/// - The secret should be at least 256 bits (32 bytes) for HS256
/// - Store secrets in environment variables or secure vaults, never in code
/// - There is no revocation: a deleted or demoted user keeps a previously
///   issued token's access until it expires
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    algorithm: Algorithm,
    ttl: Duration,
}

impl TokenService {
    /// Create a new token service.
    ///
    /// # Arguments
    /// * `secret` - Secret key for signing tokens
    /// * `ttl_hours` - Hours until issued tokens expire
    pub fn new(secret: &[u8], ttl_hours: i64) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            algorithm: Algorithm::HS256,
            ttl: Duration::hours(ttl_hours),
        }
    }

    /// Issue a signed token for a user.
    ///
    /// # Arguments
    /// * `user_id` - Unique user identifier (becomes the `sub` claim)
    /// * `username` - Username at issue time
    /// * `role` - Role at issue time
    ///
    /// # Returns
    /// JWT token string
    ///
    /// # Errors
    /// * `Signing` - Signing failed (key misconfiguration)
    pub fn issue(&self, user_id: &str, username: &str, role: Role) -> Result<String, TokenError> {
        let claims = AccessClaims::new(user_id, username, role, self.ttl);
        self.issue_claims(&claims)
    }

    /// Sign prepared claims into a token.
    ///
    /// # Errors
    /// * `Signing` - Signing failed (key misconfiguration)
    pub fn issue_claims(&self, claims: &AccessClaims) -> Result<String, TokenError> {
        let header = Header::new(self.algorithm);

        encode(&header, claims, &self.encoding_key)
            .map_err(|e| TokenError::Signing(e.to_string()))
    }

    /// Verify a token and extract its claims.
    ///
    /// The signature is validated before any claim is trusted; expiry is
    /// checked against the system clock with no leeway.
    ///
    /// # Arguments
    /// * `token` - JWT token string
    ///
    /// # Returns
    /// Verified claims
    ///
    /// # Errors
    /// * `Expired` - The token's `exp` is in the past
    /// * `BadSignature` - Signature does not match
    /// * `Malformed` - Token structure or claims cannot be decoded
    pub fn verify(&self, token: &str) -> Result<AccessClaims, TokenError> {
        let mut validation = Validation::new(self.algorithm);
        validation.leeway = 0;

        let token_data = decode::<AccessClaims>(token, &self.decoding_key, &validation).map_err(
            |e| match e.kind() {
                ErrorKind::ExpiredSignature => TokenError::Expired,
                ErrorKind::InvalidSignature => TokenError::BadSignature,
                _ => TokenError::Malformed(e.to_string()),
            },
        )?;

        Ok(token_data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &[u8] = b"test_secret_key_at_least_32_bytes!";

    #[test]
    fn test_issue_and_verify_round_trip() {
        let tokens = TokenService::new(SECRET, 24);

        let token = tokens
            .issue("user123", "alice", Role::Admin)
            .expect("Failed to issue token");
        assert!(!token.is_empty());

        let claims = tokens.verify(&token).expect("Failed to verify token");
        assert_eq!(claims.sub, "user123");
        assert_eq!(claims.username, "alice");
        assert_eq!(claims.role, Role::Admin);
        assert_eq!(claims.exp - claims.iat, 24 * 60 * 60);
    }

    #[test]
    fn test_verify_expired_token() {
        // TTL in the past: exp < iat < now
        let tokens = TokenService::new(SECRET, -1);

        let token = tokens
            .issue("user123", "alice", Role::Regular)
            .expect("Failed to issue token");

        let result = tokens.verify(&token);
        assert_eq!(result, Err(TokenError::Expired));
    }

    #[test]
    fn test_verify_with_wrong_secret() {
        let issuer = TokenService::new(SECRET, 24);
        let verifier = TokenService::new(b"other_secret_key_at_least_32_byte!", 24);

        let token = issuer
            .issue("user123", "alice", Role::Regular)
            .expect("Failed to issue token");

        let result = verifier.verify(&token);
        assert_eq!(result, Err(TokenError::BadSignature));
    }

    #[test]
    fn test_verify_garbage_token() {
        let tokens = TokenService::new(SECRET, 24);

        let result = tokens.verify("not.a.token");
        assert!(matches!(result, Err(TokenError::Malformed(_))));
    }

    #[test]
    fn test_tampered_payload_is_rejected() {
        let tokens = TokenService::new(SECRET, 24);

        let token = tokens
            .issue("user123", "alice", Role::Regular)
            .expect("Failed to issue token");

        // Swap the payload segment for one from a different token
        let other = tokens
            .issue("user456", "mallory", Role::Admin)
            .expect("Failed to issue token");
        let mut parts: Vec<&str> = token.split('.').collect();
        let other_parts: Vec<&str> = other.split('.').collect();
        parts[1] = other_parts[1];
        let tampered = parts.join(".");

        assert!(tokens.verify(&tampered).is_err());
    }
}
