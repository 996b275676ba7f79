//! Shared HTTP plumbing for upstream calls.

use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};

use crate::error::AssistError;

/// Build a reqwest client with the configured per-call timeout.
pub fn build_client(timeout: Duration) -> reqwest::Client {
    reqwest::Client::builder()
        .timeout(timeout)
        .build()
        .expect("Failed to build HTTP client")
}

/// Build default headers for a Bearer-token API.
pub fn bearer_headers(credential: &str) -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    if let Ok(val) = HeaderValue::from_str(&format!("Bearer {credential}")) {
        headers.insert(AUTHORIZATION, val);
    }
    headers
}

/// Map a non-2xx HTTP status to an error.
pub fn status_to_error(status: u16, body: &str) -> AssistError {
    match status {
        401 | 403 => AssistError::Authentication(body.to_string()),
        _ => AssistError::upstream(status, body),
    }
}

/// Map a transport-level failure, preserving the timeout distinction.
pub fn transport_error(err: reqwest::Error, timeout: Duration) -> AssistError {
    if err.is_timeout() {
        AssistError::Timeout(timeout.as_millis() as u64)
    } else {
        AssistError::Network(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bearer_headers_carry_auth_and_content_type() {
        let headers = bearer_headers("tok-1");
        assert_eq!(headers.get(AUTHORIZATION).unwrap(), "Bearer tok-1");
        assert_eq!(headers.get(CONTENT_TYPE).unwrap(), "application/json");
    }

    #[test]
    fn unauthorized_maps_to_authentication() {
        assert!(matches!(
            status_to_error(401, "denied"),
            AssistError::Authentication(_)
        ));
        assert!(matches!(
            status_to_error(500, "boom"),
            AssistError::Upstream { status: 500, .. }
        ));
    }
}
