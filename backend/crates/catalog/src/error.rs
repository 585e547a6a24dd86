//! Catalog Error Types

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

/// Catalog-specific result type alias
pub type CatalogResult<T> = Result<T, CatalogError>;

/// Catalog-specific error variants
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Machine not found
    #[error("Mining machine not found")]
    MachineNotFound,

    /// total_units cannot go below rented_units
    #[error("Cannot reduce total units below rented units")]
    UnitsBelowRented { rented: i32, requested: i32 },

    /// Machines with active rentals cannot be deleted
    #[error("Cannot delete machine with active rentals")]
    HasActiveRentals { rented: i32 },

    /// Upload content type not allowed
    #[error("Invalid file type: {0}")]
    InvalidFileType(String),

    /// Upload exceeds the size cap
    #[error("File too large")]
    FileTooLarge,

    /// Object storage rejected the operation
    #[error("Storage operation failed: {0}")]
    StorageFailed(String),

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl CatalogError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            CatalogError::MachineNotFound => StatusCode::NOT_FOUND,
            CatalogError::UnitsBelowRented { .. }
            | CatalogError::HasActiveRentals { .. }
            | CatalogError::InvalidFileType(_)
            | CatalogError::FileTooLarge => StatusCode::BAD_REQUEST,
            CatalogError::StorageFailed(_) => StatusCode::SERVICE_UNAVAILABLE,
            CatalogError::Database(_) | CatalogError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            CatalogError::MachineNotFound => ErrorKind::NotFound,
            CatalogError::UnitsBelowRented { .. }
            | CatalogError::HasActiveRentals { .. }
            | CatalogError::InvalidFileType(_)
            | CatalogError::FileTooLarge => ErrorKind::BadRequest,
            CatalogError::StorageFailed(_) => ErrorKind::ServiceUnavailable,
            CatalogError::Database(_) | CatalogError::Internal(_) => ErrorKind::InternalServerError,
        }
    }

    /// Machine-readable error code for the envelope
    pub fn error_code(&self) -> &'static str {
        match self {
            CatalogError::MachineNotFound => "MACHINE_001",
            CatalogError::UnitsBelowRented { .. } => "MACHINE_002",
            CatalogError::HasActiveRentals { .. } => "MACHINE_003",
            CatalogError::InvalidFileType(_) => "FILE_001",
            CatalogError::FileTooLarge => "FILE_002",
            CatalogError::StorageFailed(_) => "FILE_003",
            CatalogError::Database(_) | CatalogError::Internal(_) => "ERR_500",
        }
    }

    /// Longer description for the envelope
    pub fn error_description(&self) -> String {
        match self {
            CatalogError::MachineNotFound => {
                "Mining machine with the given ID does not exist".to_string()
            }
            CatalogError::UnitsBelowRented { rented, requested } => format!(
                "There are {} units currently rented. Cannot set total units to {}",
                rented, requested
            ),
            CatalogError::HasActiveRentals { rented } => format!(
                "There are {} units currently rented. Please wait for rentals to complete before deleting.",
                rented
            ),
            CatalogError::InvalidFileType(got) => format!(
                "Only image files are allowed ({}); got {}",
                platform::storage::ALLOWED_IMAGE_TYPES.join(", "),
                got
            ),
            CatalogError::FileTooLarge => format!(
                "File size must not exceed {}MB",
                platform::storage::MAX_IMAGE_BYTES / 1024 / 1024
            ),
            other => other.kind().default_description().to_string(),
        }
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            CatalogError::Database(e) => {
                tracing::error!(error = %e, "Catalog database error");
            }
            CatalogError::Internal(msg) => {
                tracing::error!(message = %msg, "Catalog internal error");
            }
            CatalogError::StorageFailed(msg) => {
                tracing::error!(message = %msg, "Catalog storage error");
            }
            _ => {
                tracing::debug!(error = %self, "Catalog error");
            }
        }
    }

    /// Convert to AppError
    pub fn to_app_error(&self) -> AppError {
        AppError::new(self.kind(), self.to_string())
            .with_code(self.error_code())
            .with_description(self.error_description())
    }
}

impl IntoResponse for CatalogError {
    fn into_response(self) -> Response {
        self.log();
        self.to_app_error().into_response()
    }
}

impl From<CatalogError> for AppError {
    fn from(err: CatalogError) -> Self {
        err.log();
        err.to_app_error()
    }
}

impl From<platform::storage::StorageError> for CatalogError {
    fn from(err: platform::storage::StorageError) -> Self {
        use platform::storage::StorageError;
        match err {
            StorageError::InvalidFileType(t) => CatalogError::InvalidFileType(t),
            StorageError::FileTooLarge(_) => CatalogError::FileTooLarge,
            StorageError::Upload(msg) | StorageError::Delete(msg) => {
                CatalogError::StorageFailed(msg)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(CatalogError::MachineNotFound.error_code(), "MACHINE_001");
        assert_eq!(
            CatalogError::UnitsBelowRented {
                rented: 3,
                requested: 2
            }
            .error_code(),
            "MACHINE_002"
        );
        assert_eq!(
            CatalogError::HasActiveRentals { rented: 1 }.error_code(),
            "MACHINE_003"
        );
    }

    #[test]
    fn test_descriptions_carry_counts() {
        let err = CatalogError::UnitsBelowRented {
            rented: 3,
            requested: 2,
        };
        assert!(err.error_description().contains("3 units"));
        assert!(err.error_description().contains("total units to 2"));
    }
}
