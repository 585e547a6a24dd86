//! Contact Error Types

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

/// Contact-specific result type alias
pub type ContactResult<T> = Result<T, ContactError>;

/// Contact-specific error variants
#[derive(Debug, Error)]
pub enum ContactError {
    /// Submission not found
    #[error("Contact submission not found")]
    SubmissionNotFound,

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ContactError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ContactError::SubmissionNotFound => StatusCode::NOT_FOUND,
            ContactError::Database(_) | ContactError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            ContactError::SubmissionNotFound => ErrorKind::NotFound,
            ContactError::Database(_) | ContactError::Internal(_) => ErrorKind::InternalServerError,
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            ContactError::SubmissionNotFound => "CONTACT_001",
            ContactError::Database(_) | ContactError::Internal(_) => "ERR_500",
        }
    }

    pub fn to_app_error(&self) -> AppError {
        let err = AppError::new(self.kind(), self.to_string()).with_code(self.error_code());
        match self {
            ContactError::SubmissionNotFound => {
                err.with_description("Contact submission with the given ID does not exist")
            }
            _ => err,
        }
    }

    fn log(&self) {
        match self {
            ContactError::Database(e) => {
                tracing::error!(error = %e, "Contact database error");
            }
            ContactError::Internal(msg) => {
                tracing::error!(message = %msg, "Contact internal error");
            }
            _ => {
                tracing::debug!(error = %self, "Contact error");
            }
        }
    }
}

impl IntoResponse for ContactError {
    fn into_response(self) -> Response {
        self.log();
        self.to_app_error().into_response()
    }
}

impl From<ContactError> for AppError {
    fn from(err: ContactError) -> Self {
        err.log();
        err.to_app_error()
    }
}
