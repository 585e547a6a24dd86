//! API Response Envelope
//!
//! Every endpoint answers with the same envelope:
//! `{ success, message, data?, errorCode?, errorDescription?, timestamp }`.

use chrono::Utc;
use serde::Serialize;

/// Uniform response envelope.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiResponse<T> {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_description: Option<String>,
    /// RFC 3339 timestamp of envelope creation
    pub timestamp: String,
}

impl<T> ApiResponse<T> {
    /// Successful envelope with payload.
    pub fn ok(message: impl Into<String>, data: T) -> Self {
        Self {
            success: true,
            message: message.into(),
            data: Some(data),
            error_code: None,
            error_description: None,
            timestamp: Utc::now().to_rfc3339(),
        }
    }

    /// Failure envelope. The status code travels on the HTTP layer.
    pub fn error(
        message: impl Into<String>,
        error_code: impl Into<String>,
        error_description: impl Into<String>,
    ) -> Self {
        Self {
            success: false,
            message: message.into(),
            data: None,
            error_code: Some(error_code.into()),
            error_description: Some(error_description.into()),
            timestamp: Utc::now().to_rfc3339(),
        }
    }
}

impl ApiResponse<()> {
    /// Successful envelope with no payload (`data` omitted).
    pub fn ok_empty(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
            data: None,
            error_code: None,
            error_description: None,
            timestamp: Utc::now().to_rfc3339(),
        }
    }
}

/// Paged collection payload for admin list endpoints.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Paged<T> {
    pub data: Vec<T>,
    pub total: u64,
    pub page: u32,
    pub limit: u32,
    pub total_pages: u32,
}

impl<T> Paged<T> {
    pub fn new(data: Vec<T>, total: u64, page: u32, limit: u32) -> Self {
        let total_pages = if limit == 0 {
            0
        } else {
            total.div_ceil(u64::from(limit)) as u32
        };
        Self {
            data,
            total,
            page,
            limit,
            total_pages,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ok_envelope() {
        let resp = ApiResponse::ok("Booking retrieved successfully", 42);
        assert!(resp.success);
        assert_eq!(resp.data, Some(42));
        assert!(resp.error_code.is_none());

        let json = serde_json::to_string(&resp).unwrap();
        assert!(json.contains(r#""success":true"#));
        assert!(json.contains(r#""timestamp""#));
        assert!(!json.contains("errorCode"));
    }

    #[test]
    fn test_error_envelope() {
        let resp = ApiResponse::<()>::error(
            "Booking not found",
            "BOOKING_001",
            "Booking with the given ID does not exist",
        );
        assert!(!resp.success);

        let json = serde_json::to_string(&resp).unwrap();
        assert!(json.contains(r#""errorCode":"BOOKING_001""#));
        assert!(json.contains(r#""errorDescription""#));
        assert!(!json.contains(r#""data""#));
    }

    #[test]
    fn test_paged_total_pages() {
        let paged = Paged::new(vec![1, 2, 3], 25, 1, 10);
        assert_eq!(paged.total_pages, 3);

        let exact = Paged::<i32>::new(vec![], 20, 1, 10);
        assert_eq!(exact.total_pages, 2);

        let empty = Paged::<i32>::new(vec![], 0, 1, 10);
        assert_eq!(empty.total_pages, 0);
    }
}
