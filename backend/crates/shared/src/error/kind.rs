//! Error Kind - Classification of errors
//!
//! Defines the [`ErrorKind`] enum that maps to HTTP status codes.

use serde::Serialize;

/// Error classification mapped onto HTTP status codes.
///
/// Every error surfaced by the API carries one of these kinds; the kind
/// decides the response status while the message/code/description travel
/// in the envelope body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[non_exhaustive]
pub enum ErrorKind {
    /// 400 - Bad Request: malformed request or state violation
    BadRequest,
    /// 401 - Unauthorized: missing or invalid credentials
    Unauthorized,
    /// 403 - Forbidden: caller lacks the required role
    Forbidden,
    /// 404 - Not Found: referenced entity absent
    NotFound,
    /// 409 - Conflict: duplicate unique key
    Conflict,
    /// 422 - Unprocessable Entity: input failed validation
    UnprocessableEntity,
    /// 429 - Too Many Requests
    TooManyRequests,
    /// 500 - Internal Server Error
    InternalServerError,
    /// 503 - Service Unavailable
    ServiceUnavailable,
}

impl ErrorKind {
    /// HTTP status code for this kind
    #[inline]
    pub const fn status_code(&self) -> u16 {
        match self {
            ErrorKind::BadRequest => 400,
            ErrorKind::Unauthorized => 401,
            ErrorKind::Forbidden => 403,
            ErrorKind::NotFound => 404,
            ErrorKind::Conflict => 409,
            ErrorKind::UnprocessableEntity => 422,
            ErrorKind::TooManyRequests => 429,
            ErrorKind::InternalServerError => 500,
            ErrorKind::ServiceUnavailable => 503,
        }
    }

    /// Standard reason phrase
    #[inline]
    pub const fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::BadRequest => "Bad Request",
            ErrorKind::Unauthorized => "Unauthorized",
            ErrorKind::Forbidden => "Forbidden",
            ErrorKind::NotFound => "Not Found",
            ErrorKind::Conflict => "Conflict",
            ErrorKind::UnprocessableEntity => "Unprocessable Entity",
            ErrorKind::TooManyRequests => "Too Many Requests",
            ErrorKind::InternalServerError => "Internal Server Error",
            ErrorKind::ServiceUnavailable => "Service Unavailable",
        }
    }

    /// Fallback machine-readable code when an error carries no specific one
    /// (mirrors the `ERR_<status>` convention of the HTTP error filter).
    #[inline]
    pub const fn default_code(&self) -> &'static str {
        match self {
            ErrorKind::BadRequest => "ERR_400",
            ErrorKind::Unauthorized => "ERR_401",
            ErrorKind::Forbidden => "ERR_403",
            ErrorKind::NotFound => "ERR_404",
            ErrorKind::Conflict => "ERR_409",
            ErrorKind::UnprocessableEntity => "ERR_422",
            ErrorKind::TooManyRequests => "ERR_429",
            ErrorKind::InternalServerError => "ERR_500",
            ErrorKind::ServiceUnavailable => "ERR_503",
        }
    }

    /// Default human description for the status class.
    pub const fn default_description(&self) -> &'static str {
        match self {
            ErrorKind::BadRequest => "Bad Request - The request was invalid or malformed",
            ErrorKind::Unauthorized => "Unauthorized - Authentication is required",
            ErrorKind::Forbidden => {
                "Forbidden - You do not have permission to access this resource"
            }
            ErrorKind::NotFound => "Not Found - The requested resource was not found",
            ErrorKind::Conflict => "Conflict - The request conflicts with existing data",
            ErrorKind::UnprocessableEntity => {
                "Unprocessable Entity - The request failed validation"
            }
            ErrorKind::TooManyRequests => "Too Many Requests - Please slow down",
            ErrorKind::InternalServerError => {
                "Internal Server Error - An unexpected error occurred"
            }
            ErrorKind::ServiceUnavailable => {
                "Service Unavailable - The service is temporarily unavailable"
            }
        }
    }

    /// 5xx errors should be logged server-side with full context.
    #[inline]
    pub const fn is_server_error(&self) -> bool {
        self.status_code() >= 500
    }

    /// 4xx errors
    #[inline]
    pub const fn is_client_error(&self) -> bool {
        let code = self.status_code();
        code >= 400 && code < 500
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(ErrorKind::BadRequest.status_code(), 400);
        assert_eq!(ErrorKind::Unauthorized.status_code(), 401);
        assert_eq!(ErrorKind::Forbidden.status_code(), 403);
        assert_eq!(ErrorKind::NotFound.status_code(), 404);
        assert_eq!(ErrorKind::Conflict.status_code(), 409);
        assert_eq!(ErrorKind::UnprocessableEntity.status_code(), 422);
        assert_eq!(ErrorKind::TooManyRequests.status_code(), 429);
        assert_eq!(ErrorKind::InternalServerError.status_code(), 500);
        assert_eq!(ErrorKind::ServiceUnavailable.status_code(), 503);
    }

    #[test]
    fn test_default_codes() {
        assert_eq!(ErrorKind::BadRequest.default_code(), "ERR_400");
        assert_eq!(ErrorKind::NotFound.default_code(), "ERR_404");
        assert_eq!(ErrorKind::InternalServerError.default_code(), "ERR_500");
    }

    #[test]
    fn test_is_server_error() {
        assert!(!ErrorKind::BadRequest.is_server_error());
        assert!(!ErrorKind::NotFound.is_server_error());
        assert!(ErrorKind::InternalServerError.is_server_error());
        assert!(ErrorKind::ServiceUnavailable.is_server_error());
    }

    #[test]
    fn test_is_client_error() {
        assert!(ErrorKind::BadRequest.is_client_error());
        assert!(ErrorKind::NotFound.is_client_error());
        assert!(!ErrorKind::InternalServerError.is_client_error());
    }
}
