//! Identity Error Types
//!
//! Identity-specific error variants that integrate with the unified
//! `kernel::error::AppError` system and the API error envelope.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

/// Identity-specific result type alias
pub type IdentityResult<T> = Result<T, IdentityError>;

/// Identity-specific error variants
#[derive(Debug, Error)]
pub enum IdentityError {
    /// Email already registered
    #[error("User with this email already exists")]
    EmailTaken,

    /// User not found
    #[error("User not found")]
    UserNotFound,

    /// Invalid credentials (unknown email or wrong password)
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// Account deactivated
    #[error("Account is deactivated")]
    AccountDisabled,

    /// Missing or invalid bearer token
    #[error("Unauthorized")]
    InvalidToken,

    /// Current password incorrect (change-password)
    #[error("Current password is incorrect")]
    WrongPassword,

    /// Password reset token unknown
    #[error("Invalid or expired reset token")]
    InvalidResetToken,

    /// Password reset token past its expiry
    #[error("Reset token has expired")]
    ResetTokenExpired,

    /// Email verification token unknown
    #[error("Invalid verification token")]
    InvalidVerificationToken,

    /// Email verification token past its expiry
    #[error("Verification token has expired")]
    VerificationTokenExpired,

    /// Email already verified
    #[error("Email already verified")]
    AlreadyVerified,

    /// Email failed canonical validation
    #[error("Invalid email address")]
    InvalidEmail,

    /// Password failed the policy checks
    #[error("Password validation failed: {0}")]
    PasswordPolicy(String),

    /// Email delivery failed
    #[error("Email delivery failed: {0}")]
    Mail(String),

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl IdentityError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            IdentityError::EmailTaken => StatusCode::CONFLICT,
            IdentityError::UserNotFound => StatusCode::NOT_FOUND,
            IdentityError::InvalidCredentials
            | IdentityError::AccountDisabled
            | IdentityError::InvalidToken => StatusCode::UNAUTHORIZED,
            IdentityError::WrongPassword
            | IdentityError::InvalidResetToken
            | IdentityError::ResetTokenExpired
            | IdentityError::InvalidVerificationToken
            | IdentityError::VerificationTokenExpired
            | IdentityError::AlreadyVerified => StatusCode::BAD_REQUEST,
            IdentityError::InvalidEmail | IdentityError::PasswordPolicy(_) => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            IdentityError::Mail(_)
            | IdentityError::Database(_)
            | IdentityError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            IdentityError::EmailTaken => ErrorKind::Conflict,
            IdentityError::UserNotFound => ErrorKind::NotFound,
            IdentityError::InvalidCredentials
            | IdentityError::AccountDisabled
            | IdentityError::InvalidToken => ErrorKind::Unauthorized,
            IdentityError::WrongPassword
            | IdentityError::InvalidResetToken
            | IdentityError::ResetTokenExpired
            | IdentityError::InvalidVerificationToken
            | IdentityError::VerificationTokenExpired
            | IdentityError::AlreadyVerified => ErrorKind::BadRequest,
            IdentityError::InvalidEmail | IdentityError::PasswordPolicy(_) => {
                ErrorKind::UnprocessableEntity
            }
            IdentityError::Mail(_)
            | IdentityError::Database(_)
            | IdentityError::Internal(_) => ErrorKind::InternalServerError,
        }
    }

    /// Machine-readable error code for the envelope
    pub fn error_code(&self) -> &'static str {
        match self {
            IdentityError::EmailTaken => "USER_001",
            IdentityError::UserNotFound => "USER_002",
            IdentityError::WrongPassword => "USER_003",
            IdentityError::InvalidCredentials => "AUTH_001",
            IdentityError::AccountDisabled => "AUTH_002",
            IdentityError::InvalidToken => "AUTH_003",
            IdentityError::InvalidResetToken => "AUTH_003",
            IdentityError::ResetTokenExpired => "AUTH_004",
            IdentityError::InvalidVerificationToken => "AUTH_005",
            IdentityError::VerificationTokenExpired => "AUTH_006",
            IdentityError::AlreadyVerified => "AUTH_007",
            IdentityError::InvalidEmail | IdentityError::PasswordPolicy(_) => "VALIDATION_001",
            IdentityError::Mail(_) => "MAIL_001",
            IdentityError::Database(_) | IdentityError::Internal(_) => "ERR_500",
        }
    }

    /// Longer description for the envelope
    pub fn error_description(&self) -> String {
        match self {
            IdentityError::EmailTaken => "A user with this email already exists".to_string(),
            IdentityError::UserNotFound => "User with the given ID does not exist".to_string(),
            IdentityError::InvalidCredentials => "Email or password is incorrect".to_string(),
            IdentityError::AccountDisabled => {
                "Your account has been deactivated. Please contact support.".to_string()
            }
            IdentityError::InvalidToken => {
                "You must be logged in with a valid token to access this resource".to_string()
            }
            IdentityError::WrongPassword => {
                "The current password provided is incorrect".to_string()
            }
            IdentityError::InvalidResetToken => {
                "The password reset token is invalid or has expired".to_string()
            }
            IdentityError::ResetTokenExpired => {
                "The password reset token has expired. Please request a new one.".to_string()
            }
            IdentityError::InvalidVerificationToken => {
                "The email verification token is invalid".to_string()
            }
            IdentityError::VerificationTokenExpired => {
                "The email verification token has expired. Please request a new one.".to_string()
            }
            IdentityError::AlreadyVerified => {
                "This email address has already been verified".to_string()
            }
            IdentityError::PasswordPolicy(msg) => msg.clone(),
            other => other.kind().default_description().to_string(),
        }
    }

    /// Convert to AppError
    pub fn to_app_error(&self) -> AppError {
        AppError::new(self.kind(), self.to_string())
            .with_code(self.error_code())
            .with_description(self.error_description())
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            IdentityError::Database(e) => {
                tracing::error!(error = %e, "Identity database error");
            }
            IdentityError::Internal(msg) => {
                tracing::error!(message = %msg, "Identity internal error");
            }
            IdentityError::Mail(msg) => {
                tracing::error!(message = %msg, "Email delivery error");
            }
            IdentityError::InvalidCredentials => {
                tracing::warn!("Invalid login attempt");
            }
            _ => {
                tracing::debug!(error = %self, "Identity error");
            }
        }
    }
}

impl IntoResponse for IdentityError {
    fn into_response(self) -> Response {
        self.log();
        self.to_app_error().into_response()
    }
}

impl From<platform::password::PasswordPolicyError> for IdentityError {
    fn from(err: platform::password::PasswordPolicyError) -> Self {
        IdentityError::PasswordPolicy(err.to_string())
    }
}

impl From<platform::password::PasswordHashError> for IdentityError {
    fn from(err: platform::password::PasswordHashError) -> Self {
        IdentityError::Internal(err.to_string())
    }
}

impl From<platform::mailer::MailerError> for IdentityError {
    fn from(err: platform::mailer::MailerError) -> Self {
        IdentityError::Mail(err.to_string())
    }
}

impl From<IdentityError> for AppError {
    fn from(err: IdentityError) -> Self {
        err.log();
        err.to_app_error()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes_match_taxonomy() {
        assert_eq!(IdentityError::EmailTaken.error_code(), "USER_001");
        assert_eq!(IdentityError::InvalidCredentials.error_code(), "AUTH_001");
        assert_eq!(IdentityError::AccountDisabled.error_code(), "AUTH_002");
        assert_eq!(IdentityError::AlreadyVerified.error_code(), "AUTH_007");
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(IdentityError::EmailTaken.status_code(), StatusCode::CONFLICT);
        assert_eq!(
            IdentityError::InvalidToken.status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            IdentityError::ResetTokenExpired.status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            IdentityError::PasswordPolicy("too short".into()).status_code(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
    }
}
