//! API DTOs (Data Transfer Objects)
//!
//! Request DTOs expose `validate()` with ordered field checks; all field
//! violations come back together as one 422.

use chrono::{DateTime, Utc};
use kernel::context::Role;
use kernel::error::app_error::AppResult;
use kernel::validate::Validator;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::entities::User;

// ============================================================================
// Auth
// ============================================================================

/// Login request
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

impl LoginRequest {
    pub fn validate(&self) -> AppResult<()> {
        let mut v = Validator::new();
        v.require_email(&self.email, "email")
            .require_non_empty(&self.password, "password");
        v.finish()
    }
}

/// Register request
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    pub phone: Option<String>,
}

impl RegisterRequest {
    pub fn validate(&self) -> AppResult<()> {
        let mut v = Validator::new();
        v.require_email(&self.email, "email")
            .require_min_len(&self.password, 8, "password")
            .require_non_empty(&self.first_name, "firstName")
            .require_non_empty(&self.last_name, "lastName");
        v.finish()
    }
}

/// Login / register response
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    pub user: UserResponse,
    pub access_token: String,
}

/// Forgot-password / resend-verification request
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForgotPasswordRequest {
    pub email: String,
}

impl ForgotPasswordRequest {
    pub fn validate(&self) -> AppResult<()> {
        let mut v = Validator::new();
        v.require_email(&self.email, "email");
        v.finish()
    }
}

/// Verify-reset-token request
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifyResetTokenRequest {
    pub token: String,
}

impl VerifyResetTokenRequest {
    pub fn validate(&self) -> AppResult<()> {
        let mut v = Validator::new();
        v.require_non_empty(&self.token, "token");
        v.finish()
    }
}

/// Verify-reset-token response
#[derive(Debug, Clone, Serialize)]
pub struct VerifyResetTokenResponse {
    pub valid: bool,
}

/// Reset-password request
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResetPasswordRequest {
    pub token: String,
    pub new_password: String,
}

impl ResetPasswordRequest {
    pub fn validate(&self) -> AppResult<()> {
        let mut v = Validator::new();
        v.require_non_empty(&self.token, "token")
            .require_min_len(&self.new_password, 8, "newPassword");
        v.finish()
    }
}

/// Verify-email request
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifyEmailRequest {
    pub token: String,
}

impl VerifyEmailRequest {
    pub fn validate(&self) -> AppResult<()> {
        let mut v = Validator::new();
        v.require_non_empty(&self.token, "token");
        v.finish()
    }
}

// ============================================================================
// Users
// ============================================================================

/// Admin create-user request
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserRequest {
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    pub phone: Option<String>,
    pub role: Option<Role>,
    pub avatar: Option<String>,
}

impl CreateUserRequest {
    pub fn validate(&self) -> AppResult<()> {
        let mut v = Validator::new();
        v.require_email(&self.email, "email")
            .require_min_len(&self.password, 8, "password")
            .require_non_empty(&self.first_name, "firstName")
            .require_non_empty(&self.last_name, "lastName");
        v.finish()
    }
}

/// Admin update-user request
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserRequest {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub phone: Option<String>,
    pub role: Option<Role>,
    pub avatar: Option<String>,
    pub is_active: Option<bool>,
}

/// Self-service profile update request
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfileRequest {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub phone: Option<String>,
    pub avatar: Option<String>,
}

/// Change-password request
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangePasswordRequest {
    pub current_password: String,
    pub new_password: String,
}

impl ChangePasswordRequest {
    pub fn validate(&self) -> AppResult<()> {
        let mut v = Validator::new();
        v.require_non_empty(&self.current_password, "currentPassword")
            .require_min_len(&self.new_password, 8, "newPassword");
        v.finish()
    }
}

/// Public user representation (no credential or token state)
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: Uuid,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub phone: Option<String>,
    pub role: Role,
    pub avatar: Option<String>,
    pub is_active: bool,
    pub email_verified: bool,
    pub last_login_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl UserResponse {
    pub fn from_entity(user: &User) -> Self {
        Self {
            id: *user.user_id.as_uuid(),
            email: user.email.as_str().to_string(),
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            phone: user.phone.clone(),
            role: user.role,
            avatar: user.avatar.clone(),
            is_active: user.is_active,
            email_verified: user.email_verified,
            last_login_at: user.last_login_at,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_request_validation_order() {
        let req = RegisterRequest {
            email: "bad".to_string(),
            password: "short".to_string(),
            first_name: "".to_string(),
            last_name: "Doe".to_string(),
            phone: None,
        };
        let err = req.validate().unwrap_err();
        assert_eq!(err.status_code(), 422);
        let description = err.description().to_string();
        assert!(description.contains("email"));
        assert!(description.contains("password"));
        assert!(description.contains("firstName"));
    }

    #[test]
    fn test_user_response_hides_secrets() {
        let json = serde_json::to_string(&UserResponse {
            id: Uuid::nil(),
            email: "user@example.com".to_string(),
            first_name: "John".to_string(),
            last_name: "Doe".to_string(),
            phone: None,
            role: Role::User,
            avatar: None,
            is_active: true,
            email_verified: false,
            last_login_at: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        })
        .unwrap();
        assert!(json.contains(r#""firstName":"John""#));
        assert!(!json.contains("password"));
        assert!(!json.contains("token"));
    }
}
