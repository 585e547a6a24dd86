//! JWT token issuance and validation.
//!
//! HS256 bearer tokens carrying the subject identity, email and role.
//! Expiry is enforced by the `jsonwebtoken` validation (leeway defaults).

use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Claims carried by every access token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject: user UUID
    pub sub: String,
    pub email: String,
    /// Role code ("user" | "admin")
    pub role: String,
    pub iat: i64,
    pub exp: i64,
}

#[derive(Debug, Error)]
pub enum JwtError {
    #[error("Token has expired")]
    Expired,

    #[error("Invalid token: {0}")]
    Invalid(String),

    #[error("Token issuance failed: {0}")]
    Issuance(String),
}

/// Manages JWT token creation and validation.
#[derive(Clone)]
pub struct JwtManager {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    ttl_secs: i64,
}

impl JwtManager {
    /// Create a new `JwtManager` with the given secret.
    pub fn new(secret: &[u8], ttl_secs: i64) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            ttl_secs,
        }
    }

    /// Issue an access token for the given user.
    pub fn issue(&self, user_id: Uuid, email: &str, role: &str) -> Result<String, JwtError> {
        let now = chrono::Utc::now().timestamp();
        let claims = Claims {
            sub: user_id.to_string(),
            email: email.to_string(),
            role: role.to_string(),
            iat: now,
            exp: now + self.ttl_secs,
        };

        jsonwebtoken::encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| JwtError::Issuance(e.to_string()))
    }

    /// Validate a token and return its claims.
    pub fn validate(&self, token: &str) -> Result<Claims, JwtError> {
        let data = jsonwebtoken::decode::<Claims>(token, &self.decoding_key, &Validation::default())
            .map_err(|e| match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => JwtError::Expired,
                _ => JwtError::Invalid(e.to_string()),
            })?;
        Ok(data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &[u8] = b"test-secret-at-least-32-bytes-long!!";

    #[test]
    fn test_issue_and_validate_roundtrip() {
        let manager = JwtManager::new(SECRET, 3600);
        let user_id = Uuid::new_v4();

        let token = manager.issue(user_id, "user@example.com", "user").unwrap();
        let claims = manager.validate(&token).unwrap();

        assert_eq!(claims.sub, user_id.to_string());
        assert_eq!(claims.email, "user@example.com");
        assert_eq!(claims.role, "user");
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let manager = JwtManager::new(SECRET, 3600);
        let other = JwtManager::new(b"a-completely-different-secret-key!!!", 3600);

        let token = manager.issue(Uuid::new_v4(), "user@example.com", "user").unwrap();
        assert!(matches!(other.validate(&token), Err(JwtError::Invalid(_))));
    }

    #[test]
    fn test_garbage_token_rejected() {
        let manager = JwtManager::new(SECRET, 3600);
        assert!(matches!(
            manager.validate("not.a.token"),
            Err(JwtError::Invalid(_))
        ));
    }
}
