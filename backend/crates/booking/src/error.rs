//! Booking Error Types
//!
//! State-violation errors carry the exact guard that failed so the
//! envelope can tell the caller which transition was attempted illegally.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

/// Booking-specific result type alias
pub type BookingResult<T> = Result<T, BookingError>;

/// Booking-specific error variants
#[derive(Debug, Error)]
pub enum BookingError {
    /// Booking not found
    #[error("Booking not found")]
    BookingNotFound,

    /// Requester does not own the booking
    #[error("You do not have access to this booking")]
    AccessDenied,

    /// Referenced machine absent
    #[error("Machine not found")]
    MachineNotFound,

    /// Machine exists but is not bookable
    #[error("This machine is not available for booking")]
    MachineNotAvailable,

    /// Requested quantity exceeds available units
    #[error("Only {available} units available")]
    InsufficientUnits { available: i32 },

    /// send-payment-address from a non-PENDING state
    #[error("Payment address can only be sent for pending bookings")]
    NotPending,

    /// mark-payment-sent from a non-AWAITING_PAYMENT state
    #[error("Can only mark payment as sent when awaiting payment")]
    NotAwaitingPayment,

    /// approve from a non-PAYMENT_SENT state
    #[error("Can only approve bookings with payment sent")]
    NotPaymentSent,

    /// reject on an APPROVED or REJECTED booking
    #[error("Cannot reject an already processed booking")]
    AlreadyProcessed,

    /// cancel on an APPROVED booking
    #[error("Cannot cancel an approved booking")]
    CannotCancelApproved,

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl BookingError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            BookingError::BookingNotFound | BookingError::MachineNotFound => StatusCode::NOT_FOUND,
            BookingError::AccessDenied => StatusCode::FORBIDDEN,
            BookingError::MachineNotAvailable
            | BookingError::InsufficientUnits { .. }
            | BookingError::NotPending
            | BookingError::NotAwaitingPayment
            | BookingError::NotPaymentSent
            | BookingError::AlreadyProcessed
            | BookingError::CannotCancelApproved => StatusCode::BAD_REQUEST,
            BookingError::Database(_) | BookingError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            BookingError::BookingNotFound | BookingError::MachineNotFound => ErrorKind::NotFound,
            BookingError::AccessDenied => ErrorKind::Forbidden,
            BookingError::MachineNotAvailable
            | BookingError::InsufficientUnits { .. }
            | BookingError::NotPending
            | BookingError::NotAwaitingPayment
            | BookingError::NotPaymentSent
            | BookingError::AlreadyProcessed
            | BookingError::CannotCancelApproved => ErrorKind::BadRequest,
            BookingError::Database(_) | BookingError::Internal(_) => ErrorKind::InternalServerError,
        }
    }

    /// Machine-readable error code for the envelope
    pub fn error_code(&self) -> &'static str {
        match self {
            BookingError::BookingNotFound => "BOOKING_001",
            BookingError::AccessDenied => "BOOKING_002",
            BookingError::MachineNotAvailable => "BOOKING_003",
            BookingError::InsufficientUnits { .. } => "BOOKING_004",
            BookingError::NotPending => "BOOKING_005",
            BookingError::NotAwaitingPayment => "BOOKING_006",
            BookingError::NotPaymentSent => "BOOKING_007",
            BookingError::AlreadyProcessed => "BOOKING_008",
            BookingError::CannotCancelApproved => "BOOKING_009",
            BookingError::MachineNotFound => "MACHINE_001",
            BookingError::Database(_) | BookingError::Internal(_) => "ERR_500",
        }
    }

    /// Longer description for the envelope
    pub fn error_description(&self) -> String {
        match self {
            BookingError::BookingNotFound => {
                "Booking with the given ID does not exist".to_string()
            }
            BookingError::AccessDenied => {
                "This booking belongs to another user".to_string()
            }
            BookingError::MachineNotFound => {
                "Mining machine with the given ID does not exist".to_string()
            }
            BookingError::MachineNotAvailable => {
                "The machine is inactive and cannot accept bookings".to_string()
            }
            BookingError::InsufficientUnits { available } => format!(
                "Requested quantity exceeds the {} units currently available",
                available
            ),
            BookingError::NotPending
            | BookingError::NotAwaitingPayment
            | BookingError::NotPaymentSent
            | BookingError::AlreadyProcessed
            | BookingError::CannotCancelApproved => {
                "The booking is not in a state that allows this action".to_string()
            }
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
            BookingError::Database(e) => {
                tracing::error!(error = %e, "Booking database error");
            }
            BookingError::Internal(msg) => {
                tracing::error!(message = %msg, "Booking internal error");
            }
            BookingError::AccessDenied => {
                tracing::warn!("Booking access denied");
            }
            _ => {
                tracing::debug!(error = %self, "Booking error");
            }
        }
    }
}

impl IntoResponse for BookingError {
    fn into_response(self) -> Response {
        self.log();
        self.to_app_error().into_response()
    }
}

impl From<BookingError> for AppError {
    fn from(err: BookingError) -> Self {
        err.log();
        err.to_app_error()
    }
}

impl From<catalog::CatalogError> for BookingError {
    fn from(err: catalog::CatalogError) -> Self {
        match err {
            catalog::CatalogError::MachineNotFound => BookingError::MachineNotFound,
            catalog::CatalogError::Database(e) => BookingError::Database(e),
            other => BookingError::Internal(other.to_string()),
        }
    }
}
