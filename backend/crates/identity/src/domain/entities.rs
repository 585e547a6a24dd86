//! Domain Entities
//!
//! The user account entity. Sensitive token state (password reset, email
//! verification) lives here with explicit expiry timestamps; the opaque
//! token values are generated by the application layer.

use chrono::{DateTime, Duration, Utc};
use kernel::context::Role;
use kernel::id::UserId;

use crate::domain::value_object::Email;

/// Validity window for password-reset tokens
pub const RESET_TOKEN_TTL_HOURS: i64 = 1;

/// Validity window for email-verification tokens
pub const VERIFICATION_TOKEN_TTL_HOURS: i64 = 24;

/// User entity
#[derive(Debug, Clone)]
pub struct User {
    pub user_id: UserId,
    pub email: Email,
    /// Argon2id PHC-format hash
    pub password_hash: String,
    pub first_name: String,
    pub last_name: String,
    pub phone: Option<String>,
    pub role: Role,
    /// Public avatar URL
    pub avatar: Option<String>,
    pub is_active: bool,
    pub email_verified: bool,
    pub email_verification_token: Option<String>,
    pub email_verification_expires: Option<DateTime<Utc>>,
    pub password_reset_token: Option<String>,
    pub password_reset_expires: Option<DateTime<Utc>>,
    pub last_login_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Create a new active, unverified user
    pub fn new(
        email: Email,
        password_hash: String,
        first_name: String,
        last_name: String,
        phone: Option<String>,
        role: Role,
    ) -> Self {
        let now = Utc::now();
        Self {
            user_id: UserId::new(),
            email,
            password_hash,
            first_name,
            last_name,
            phone,
            role,
            avatar: None,
            is_active: true,
            email_verified: false,
            email_verification_token: None,
            email_verification_expires: None,
            password_reset_token: None,
            password_reset_expires: None,
            last_login_at: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// Check if user can login
    pub fn can_login(&self) -> bool {
        self.is_active
    }

    /// Record successful login
    pub fn record_login(&mut self) {
        let now = Utc::now();
        self.last_login_at = Some(now);
        self.updated_at = now;
    }

    /// Arm a password-reset token valid for one hour
    pub fn set_password_reset_token(&mut self, token: String) {
        let now = Utc::now();
        self.password_reset_token = Some(token);
        self.password_reset_expires = Some(now + Duration::hours(RESET_TOKEN_TTL_HOURS));
        self.updated_at = now;
    }

    /// True while the armed reset token has not expired
    pub fn reset_token_valid(&self, now: DateTime<Utc>) -> bool {
        matches!(self.password_reset_expires, Some(expires) if expires > now)
    }

    /// Replace the password and clear reset-token state
    pub fn apply_password_reset(&mut self, password_hash: String) {
        self.password_hash = password_hash;
        self.password_reset_token = None;
        self.password_reset_expires = None;
        self.updated_at = Utc::now();
    }

    /// Arm an email-verification token valid for 24 hours
    pub fn set_verification_token(&mut self, token: String) {
        let now = Utc::now();
        self.email_verification_token = Some(token);
        self.email_verification_expires = Some(now + Duration::hours(VERIFICATION_TOKEN_TTL_HOURS));
        self.updated_at = now;
    }

    /// True while the armed verification token has not expired
    pub fn verification_token_valid(&self, now: DateTime<Utc>) -> bool {
        matches!(self.email_verification_expires, Some(expires) if expires > now)
    }

    /// Mark the email verified and clear verification-token state
    pub fn mark_email_verified(&mut self) {
        self.email_verified = true;
        self.email_verification_token = None;
        self.email_verification_expires = None;
        self.updated_at = Utc::now();
    }

    pub fn set_password(&mut self, password_hash: String) {
        self.password_hash = password_hash;
        self.updated_at = Utc::now();
    }

    pub fn set_active(&mut self, active: bool) {
        self.is_active = active;
        self.updated_at = Utc::now();
    }

    pub fn set_role(&mut self, role: Role) {
        self.role = role;
        self.updated_at = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_user() -> User {
        User::new(
            Email::new("user@example.com").unwrap(),
            "$argon2id$fake".to_string(),
            "John".to_string(),
            "Doe".to_string(),
            None,
            Role::User,
        )
    }

    #[test]
    fn test_new_user_defaults() {
        let user = sample_user();
        assert!(user.is_active);
        assert!(!user.email_verified);
        assert!(user.can_login());
        assert_eq!(user.full_name(), "John Doe");
    }

    #[test]
    fn test_reset_token_lifecycle() {
        let mut user = sample_user();
        assert!(!user.reset_token_valid(Utc::now()));

        user.set_password_reset_token("token".to_string());
        assert!(user.reset_token_valid(Utc::now()));
        assert!(!user.reset_token_valid(Utc::now() + Duration::hours(2)));

        user.apply_password_reset("$argon2id$new".to_string());
        assert!(user.password_reset_token.is_none());
        assert!(user.password_reset_expires.is_none());
        assert_eq!(user.password_hash, "$argon2id$new");
    }

    #[test]
    fn test_verification_token_lifecycle() {
        let mut user = sample_user();
        user.set_verification_token("token".to_string());
        assert!(user.verification_token_valid(Utc::now()));
        assert!(!user.verification_token_valid(Utc::now() + Duration::hours(25)));

        user.mark_email_verified();
        assert!(user.email_verified);
        assert!(user.email_verification_token.is_none());
    }

    #[test]
    fn test_deactivated_user_cannot_login() {
        let mut user = sample_user();
        user.set_active(false);
        assert!(!user.can_login());
    }
}
