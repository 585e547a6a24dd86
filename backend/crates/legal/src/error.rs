//! Legal Document Error Types

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

use crate::domain::entities::DocumentType;

/// Legal-specific result type alias
pub type LegalResult<T> = Result<T, LegalError>;

/// Legal-specific error variants
#[derive(Debug, Error)]
pub enum LegalError {
    /// A document of this type already exists
    #[error("A {0} document already exists. Use update instead.")]
    TypeExists(DocumentType),

    /// Document not found
    #[error("Legal document not found")]
    DocumentNotFound,

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl LegalError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            LegalError::TypeExists(_) => StatusCode::CONFLICT,
            LegalError::DocumentNotFound => StatusCode::NOT_FOUND,
            LegalError::Database(_) | LegalError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            LegalError::TypeExists(_) => ErrorKind::Conflict,
            LegalError::DocumentNotFound => ErrorKind::NotFound,
            LegalError::Database(_) | LegalError::Internal(_) => ErrorKind::InternalServerError,
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            LegalError::TypeExists(_) => "LEGAL_001",
            LegalError::DocumentNotFound => "LEGAL_002",
            LegalError::Database(_) | LegalError::Internal(_) => "ERR_500",
        }
    }

    pub fn to_app_error(&self) -> AppError {
        let err = AppError::new(self.kind(), self.to_string()).with_code(self.error_code());
        match self {
            LegalError::TypeExists(doc_type) => err.with_description(format!(
                "Only one {} document may exist; update the existing one",
                doc_type
            )),
            LegalError::DocumentNotFound => {
                err.with_description("Legal document with the given ID or type does not exist")
            }
            _ => err,
        }
    }

    fn log(&self) {
        match self {
            LegalError::Database(e) => {
                tracing::error!(error = %e, "Legal database error");
            }
            LegalError::Internal(msg) => {
                tracing::error!(message = %msg, "Legal internal error");
            }
            _ => {
                tracing::debug!(error = %self, "Legal error");
            }
        }
    }
}

impl IntoResponse for LegalError {
    fn into_response(self) -> Response {
        self.log();
        self.to_app_error().into_response()
    }
}

impl From<LegalError> for AppError {
    fn from(err: LegalError) -> Self {
        err.log();
        err.to_app_error()
    }
}
