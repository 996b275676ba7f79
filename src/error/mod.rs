//! Error types for assistlink.

use thiserror::Error;

/// Primary error type for all assistlink operations.
#[derive(Error, Debug)]
pub enum AssistError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Authentication error: {0}")]
    Authentication(String),

    #[error("Upstream request failed (status {status}): {message}")]
    Upstream { status: u16, message: String },

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Timeout after {0}ms")]
    Timeout(u64),

    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl AssistError {
    /// Create an upstream error from a status code and response body.
    pub fn upstream(status: u16, message: impl Into<String>) -> Self {
        Self::Upstream {
            status,
            message: message.into(),
        }
    }

    /// Whether this error originated in the upstream request path
    /// (network failures, non-2xx statuses, and timeouts all count).
    pub fn is_upstream(&self) -> bool {
        matches!(
            self,
            Self::Upstream { .. } | Self::Network(_) | Self::Timeout(_)
        )
    }

    /// Whether a caller could reasonably retry the failed operation.
    /// The crate itself never retries; search is idempotent, so callers
    /// may layer retries on top.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Network(_) | Self::Timeout(_) => true,
            Self::Upstream { status, .. } => matches!(status, 429 | 500..=599),
            _ => false,
        }
    }
}

/// Convenience result alias.
pub type Result<T> = std::result::Result<T, AssistError>;
