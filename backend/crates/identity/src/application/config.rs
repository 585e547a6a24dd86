//! Application Configuration

use std::time::Duration;

/// Identity application configuration
#[derive(Debug, Clone)]
pub struct IdentityConfig {
    /// HS256 signing secret for bearer tokens
    pub jwt_secret: Vec<u8>,
    /// Access token lifetime
    pub jwt_ttl: Duration,
    /// Optional pepper mixed into password hashing
    pub pepper: Option<Vec<u8>>,
}

impl IdentityConfig {
    pub fn new(jwt_secret: Vec<u8>) -> Self {
        Self {
            jwt_secret,
            jwt_ttl: Duration::from_secs(24 * 3600),
            pepper: None,
        }
    }

    /// Config with a random secret (for development and tests)
    pub fn with_random_secret() -> Self {
        Self::new(platform::crypto::random_bytes(32))
    }

    pub fn jwt_ttl_secs(&self) -> i64 {
        self.jwt_ttl.as_secs() as i64
    }

    pub fn pepper_bytes(&self) -> Option<&[u8]> {
        self.pepper.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_ttl_is_one_day() {
        let config = IdentityConfig::with_random_secret();
        assert_eq!(config.jwt_ttl_secs(), 86_400);
        assert!(config.pepper_bytes().is_none());
    }

    #[test]
    fn test_random_secrets_differ() {
        let a = IdentityConfig::with_random_secret();
        let b = IdentityConfig::with_random_secret();
        assert_ne!(a.jwt_secret, b.jwt_secret);
    }
}
