//! Password Hashing and Verification
//!
//! NIST SP 800-63B compliant password handling with:
//! - Argon2id hashing (memory-hard, recommended by OWASP)
//! - Zeroization of sensitive data
//! - Optional pepper support

use argon2::{
    Algorithm, Argon2, Params, PasswordHash, PasswordHasher, PasswordVerifier, Version,
    password_hash::SaltString,
};
use rand::rngs::OsRng;
use thiserror::Error;
use unicode_normalization::UnicodeNormalization;
use zeroize::{Zeroize, ZeroizeOnDrop};

// ============================================================================
// Constants (NIST SP 800-63B compliant)
// ============================================================================

/// Minimum password length (NIST: SHALL be at least 8)
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Maximum password length (NIST: SHOULD permit at least 64)
pub const MAX_PASSWORD_LENGTH: usize = 128;

// ============================================================================
// Error Types
// ============================================================================

/// Password policy violation errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PasswordPolicyError {
    /// Password is too short
    #[error("Password must be at least {min} characters (got {actual})")]
    TooShort { min: usize, actual: usize },

    /// Password is too long
    #[error("Password must be at most {max} characters (got {actual})")]
    TooLong { max: usize, actual: usize },

    /// Password contains only whitespace
    #[error("Password cannot be empty or contain only whitespace")]
    EmptyOrWhitespace,

    /// Password contains invalid characters (control characters)
    #[error("Password contains invalid control characters")]
    InvalidCharacter,
}

/// Password hashing/verification errors
#[derive(Debug, Error)]
pub enum PasswordHashError {
    /// Hashing operation failed
    #[error("Password hashing failed: {0}")]
    HashingFailed(String),

    /// Invalid hash format
    #[error("Invalid password hash format")]
    InvalidHashFormat,
}

// ============================================================================
// Clear Text Password (Zeroized on drop)
// ============================================================================

/// Clear text password with automatic memory zeroization.
///
/// Validates NIST SP 800-63B requirements on construction; Unicode is
/// normalized using NFKC before validation. Does not implement `Clone` and
/// redacts `Debug` output.
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct ClearTextPassword(String);

impl ClearTextPassword {
    pub fn new(raw: String) -> Result<Self, PasswordPolicyError> {
        // NIST: Unicode NFKC normalization before processing
        let normalized: String = raw.nfkc().collect();

        if normalized.trim().is_empty() {
            return Err(PasswordPolicyError::EmptyOrWhitespace);
        }

        if normalized.chars().any(|c| c.is_control()) {
            return Err(PasswordPolicyError::InvalidCharacter);
        }

        let len = normalized.chars().count();
        if len < MIN_PASSWORD_LENGTH {
            return Err(PasswordPolicyError::TooShort {
                min: MIN_PASSWORD_LENGTH,
                actual: len,
            });
        }
        if len > MAX_PASSWORD_LENGTH {
            return Err(PasswordPolicyError::TooLong {
                max: MAX_PASSWORD_LENGTH,
                actual: len,
            });
        }

        Ok(Self(normalized))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for ClearTextPassword {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("ClearTextPassword(REDACTED)")
    }
}

// ============================================================================
// Hashing / Verification
// ============================================================================

fn argon2(pepper: Option<&[u8]>) -> Result<Argon2<'_>, PasswordHashError> {
    match pepper {
        Some(secret) => {
            Argon2::new_with_secret(secret, Algorithm::Argon2id, Version::V0x13, Params::default())
                .map_err(|e| PasswordHashError::HashingFailed(e.to_string()))
        }
        None => Ok(Argon2::default()),
    }
}

/// Hash a password with Argon2id, producing a PHC-format string.
pub fn hash_password(
    password: &ClearTextPassword,
    pepper: Option<&[u8]>,
) -> Result<String, PasswordHashError> {
    let salt = SaltString::generate(&mut OsRng);
    let hasher = argon2(pepper)?;

    let hash = hasher
        .hash_password(password.as_str().as_bytes(), &salt)
        .map_err(|e| PasswordHashError::HashingFailed(e.to_string()))?;

    Ok(hash.to_string())
}

/// Verify a password against a stored PHC-format hash.
pub fn verify_password(
    password: &ClearTextPassword,
    stored_hash: &str,
    pepper: Option<&[u8]>,
) -> Result<bool, PasswordHashError> {
    let parsed =
        PasswordHash::new(stored_hash).map_err(|_| PasswordHashError::InvalidHashFormat)?;
    let verifier = argon2(pepper)?;

    Ok(verifier
        .verify_password(password.as_str().as_bytes(), &parsed)
        .is_ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_policy_rejects_short_and_empty() {
        assert!(matches!(
            ClearTextPassword::new("short".to_string()),
            Err(PasswordPolicyError::TooShort { .. })
        ));
        assert!(matches!(
            ClearTextPassword::new("        ".to_string()),
            Err(PasswordPolicyError::EmptyOrWhitespace)
        ));
        assert!(matches!(
            ClearTextPassword::new("pass\u{0000}word".to_string()),
            Err(PasswordPolicyError::InvalidCharacter)
        ));
    }

    #[test]
    fn test_policy_accepts_reasonable_password() {
        assert!(ClearTextPassword::new("correct horse battery staple".to_string()).is_ok());
    }

    #[test]
    fn test_hash_verify_roundtrip() {
        let password = ClearTextPassword::new("my_secure_password".to_string()).unwrap();
        let hash = hash_password(&password, None).unwrap();
        assert!(hash.starts_with("$argon2id$"));
        assert!(verify_password(&password, &hash, None).unwrap());

        let wrong = ClearTextPassword::new("another_password".to_string()).unwrap();
        assert!(!verify_password(&wrong, &hash, None).unwrap());
    }

    #[test]
    fn test_pepper_changes_verification() {
        let password = ClearTextPassword::new("my_secure_password".to_string()).unwrap();
        let pepper = b"0123456789abcdef0123456789abcdef";
        let hash = hash_password(&password, Some(pepper)).unwrap();

        assert!(verify_password(&password, &hash, Some(pepper)).unwrap());
        assert!(!verify_password(&password, &hash, None).unwrap());
    }

    #[test]
    fn test_invalid_hash_format() {
        let password = ClearTextPassword::new("my_secure_password".to_string()).unwrap();
        assert!(matches!(
            verify_password(&password, "not-a-phc-hash", None),
            Err(PasswordHashError::InvalidHashFormat)
        ));
    }
}
