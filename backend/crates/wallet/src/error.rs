//! Wallet Error Types

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

/// Wallet-specific result type alias
pub type WalletResult<T> = Result<T, WalletError>;

/// Wallet-specific error variants
#[derive(Debug, Error)]
pub enum WalletError {
    /// Wallet not found
    #[error("Wallet not found")]
    WalletNotFound,

    /// Balance too low for the requested debit
    #[error("Insufficient balance")]
    InsufficientBalance,

    /// Unknown currency code
    #[error("Unsupported crypto type: {0}")]
    UnsupportedCrypto(String),

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl WalletError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            WalletError::WalletNotFound => StatusCode::NOT_FOUND,
            WalletError::InsufficientBalance | WalletError::UnsupportedCrypto(_) => {
                StatusCode::BAD_REQUEST
            }
            WalletError::Database(_) | WalletError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            WalletError::WalletNotFound => ErrorKind::NotFound,
            WalletError::InsufficientBalance | WalletError::UnsupportedCrypto(_) => {
                ErrorKind::BadRequest
            }
            WalletError::Database(_) | WalletError::Internal(_) => ErrorKind::InternalServerError,
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            WalletError::WalletNotFound => "WALLET_001",
            WalletError::InsufficientBalance => "WALLET_002",
            WalletError::UnsupportedCrypto(_) => "WALLET_003",
            WalletError::Database(_) | WalletError::Internal(_) => "ERR_500",
        }
    }

    pub fn error_description(&self) -> String {
        match self {
            WalletError::WalletNotFound => "No wallet found for this crypto type".to_string(),
            WalletError::InsufficientBalance => {
                "Insufficient balance for this operation".to_string()
            }
            WalletError::UnsupportedCrypto(code) => {
                format!("'{}' is not a supported crypto type", code)
            }
            other => other.kind().default_description().to_string(),
        }
    }

    pub fn to_app_error(&self) -> AppError {
        AppError::new(self.kind(), self.to_string())
            .with_code(self.error_code())
            .with_description(self.error_description())
    }

    fn log(&self) {
        match self {
            WalletError::Database(e) => {
                tracing::error!(error = %e, "Wallet database error");
            }
            WalletError::Internal(msg) => {
                tracing::error!(message = %msg, "Wallet internal error");
            }
            _ => {
                tracing::debug!(error = %self, "Wallet error");
            }
        }
    }
}

impl IntoResponse for WalletError {
    fn into_response(self) -> Response {
        self.log();
        self.to_app_error().into_response()
    }
}

impl From<WalletError> for AppError {
    fn from(err: WalletError) -> Self {
        err.log();
        err.to_app_error()
    }
}
