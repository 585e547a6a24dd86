//! Email Value Object
//!
//! Canonical (trimmed, lowercased) email address. All lookups go through
//! the canonical form, so `Alice@Example.com` and `alice@example.com`
//! resolve to the same account.

use std::fmt;
use thiserror::Error;

/// Maximum stored email length
pub const MAX_EMAIL_LENGTH: usize = 255;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EmailError {
    #[error("Email must not be empty")]
    Empty,

    #[error("Email is not a valid address")]
    InvalidFormat,

    #[error("Email must be at most {MAX_EMAIL_LENGTH} characters")]
    TooLong,
}

/// Validated, canonicalized email address.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Email(String);

impl Email {
    pub fn new(raw: &str) -> Result<Self, EmailError> {
        let canonical = raw.trim().to_lowercase();

        if canonical.is_empty() {
            return Err(EmailError::Empty);
        }
        if canonical.len() > MAX_EMAIL_LENGTH {
            return Err(EmailError::TooLong);
        }

        // local@domain with a dotted, non-edge domain
        let Some((local, domain)) = canonical.split_once('@') else {
            return Err(EmailError::InvalidFormat);
        };
        if local.is_empty()
            || domain.is_empty()
            || !domain.contains('.')
            || domain.starts_with('.')
            || domain.ends_with('.')
            || canonical.contains(char::is_whitespace)
        {
            return Err(EmailError::InvalidFormat);
        }

        Ok(Self(canonical))
    }

    /// Rehydrate from a trusted database value without re-validation.
    pub fn from_db(value: String) -> Self {
        Self(value)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_emails() {
        assert!(Email::new("user@example.com").is_ok());
        assert!(Email::new("first.last+tag@sub.example.co").is_ok());
    }

    #[test]
    fn test_canonicalization() {
        let email = Email::new("  Alice@Example.COM ").unwrap();
        assert_eq!(email.as_str(), "alice@example.com");
    }

    #[test]
    fn test_invalid_emails() {
        assert_eq!(Email::new(""), Err(EmailError::Empty));
        assert_eq!(Email::new("no-at-sign"), Err(EmailError::InvalidFormat));
        assert_eq!(Email::new("@example.com"), Err(EmailError::InvalidFormat));
        assert_eq!(Email::new("user@"), Err(EmailError::InvalidFormat));
        assert_eq!(Email::new("user@nodot"), Err(EmailError::InvalidFormat));
        assert_eq!(Email::new("user@.example.com"), Err(EmailError::InvalidFormat));
        assert_eq!(Email::new("us er@example.com"), Err(EmailError::InvalidFormat));
    }
}
