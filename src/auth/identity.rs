//! Ambient default-identity token source.
//!
//! When no per-session token is cached, credentials come from the
//! platform's default identity. On the target platform that is the
//! metadata server's service-account token endpoint; tests substitute
//! their own [`IdentityProvider`].

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use serde::Deserialize;
use tracing::debug;

use crate::error::{AssistError, Result};

const METADATA_TOKEN_URL: &str =
    "http://metadata.google.internal/computeMetadata/v1/instance/service-accounts/default/token";

/// A bearer token minted by an identity provider.
#[derive(Debug, Clone)]
pub struct AccessToken {
    pub token: String,
    pub expires_at: Option<DateTime<Utc>>,
}

impl AccessToken {
    /// Whether the token is still usable at the given instant.
    pub fn is_valid_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.map(|exp| exp > now).unwrap_or(true)
    }
}

/// Source of ambient default-identity tokens.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Mint a fresh token. Implementations must not serve a cached token;
    /// the resolver relies on every call producing a currently-valid one.
    async fn fetch_token(&self) -> Result<AccessToken>;
}

/// Identity provider backed by the instance metadata server.
pub struct MetadataIdentity {
    client: reqwest::Client,
    token_url: String,
}

impl Default for MetadataIdentity {
    fn default() -> Self {
        Self::new()
    }
}

impl MetadataIdentity {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
            token_url: METADATA_TOKEN_URL.to_string(),
        }
    }

    /// Override the token endpoint (tests point this at a mock server).
    pub fn with_token_url(mut self, url: impl Into<String>) -> Self {
        self.token_url = url.into();
        self
    }
}

#[derive(Deserialize)]
struct MetadataTokenResponse {
    access_token: String,
    expires_in: Option<i64>,
}

#[async_trait]
impl IdentityProvider for MetadataIdentity {
    async fn fetch_token(&self) -> Result<AccessToken> {
        debug!(url = %self.token_url, "fetching ambient identity token");

        let resp = self
            .client
            .get(&self.token_url)
            .header("Metadata-Flavor", "Google")
            .send()
            .await
            .map_err(|e| AssistError::Authentication(format!("metadata server unreachable: {e}")))?;

        let status = resp.status().as_u16();
        if status != 200 {
            let body = resp.text().await.unwrap_or_default();
            return Err(AssistError::Authentication(format!(
                "metadata server returned status {status}: {body}"
            )));
        }

        let payload: MetadataTokenResponse = resp
            .json()
            .await
            .map_err(|e| AssistError::Authentication(format!("bad metadata token payload: {e}")))?;

        Ok(AccessToken {
            token: payload.access_token,
            expires_at: payload.expires_in.map(|secs| Utc::now() + Duration::seconds(secs)),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_without_expiry_is_valid() {
        let token = AccessToken {
            token: "t".into(),
            expires_at: None,
        };
        assert!(token.is_valid_at(Utc::now()));
    }

    #[test]
    fn expired_token_is_invalid() {
        let token = AccessToken {
            token: "t".into(),
            expires_at: Some(Utc::now() - Duration::hours(1)),
        };
        assert!(!token.is_valid_at(Utc::now()));
    }
}
