//! Client identification utilities
//!
//! Common functions for identifying clients via HTTP headers, used for
//! audit metadata on public submissions.

use axum::http::{HeaderMap, header};
use std::net::IpAddr;

/// Extract the client IP from X-Forwarded-For, falling back to the
/// direct connection address.
pub fn extract_client_ip(headers: &HeaderMap, connection_ip: Option<IpAddr>) -> Option<IpAddr> {
    headers
        .get("x-forwarded-for")
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(',').next())
        .and_then(|first| first.trim().parse().ok())
        .or(connection_ip)
}

/// Extract the User-Agent string, truncated to a storable length.
pub fn extract_user_agent(headers: &HeaderMap) -> Option<String> {
    headers
        .get(header::USER_AGENT)
        .and_then(|value| value.to_str().ok())
        .map(|ua| ua.chars().take(255).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_forwarded_for_takes_first_hop() {
        let mut headers = HeaderMap::new();
        headers.insert(
            "x-forwarded-for",
            HeaderValue::from_static("203.0.113.7, 10.0.0.1"),
        );
        let ip = extract_client_ip(&headers, Some("127.0.0.1".parse().unwrap()));
        assert_eq!(ip, Some("203.0.113.7".parse().unwrap()));
    }

    #[test]
    fn test_falls_back_to_connection_ip() {
        let headers = HeaderMap::new();
        let fallback: IpAddr = "192.0.2.1".parse().unwrap();
        assert_eq!(extract_client_ip(&headers, Some(fallback)), Some(fallback));
        assert_eq!(extract_client_ip(&headers, None), None);
    }

    #[test]
    fn test_user_agent_truncated() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::USER_AGENT,
            HeaderValue::from_str(&"x".repeat(400)).unwrap(),
        );
        assert_eq!(extract_user_agent(&headers).unwrap().len(), 255);
    }
}
