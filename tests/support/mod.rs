//! Shared test doubles.

use std::sync::atomic::{AtomicUsize, Ordering};

use assistlink::auth::{AccessToken, IdentityProvider};
use assistlink::error::{AssistError, Result};
use async_trait::async_trait;

/// Identity double that counts fetches and returns a fixed outcome.
pub struct CountingIdentity {
    calls: AtomicUsize,
    token: Option<String>,
}

impl CountingIdentity {
    pub fn returning(token: &str) -> Self {
        Self {
            calls: AtomicUsize::new(0),
            token: Some(token.to_string()),
        }
    }

    pub fn failing() -> Self {
        Self {
            calls: AtomicUsize::new(0),
            token: None,
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl IdentityProvider for CountingIdentity {
    async fn fetch_token(&self) -> Result<AccessToken> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.token {
            Some(token) => Ok(AccessToken {
                token: token.clone(),
                expires_at: None,
            }),
            None => Err(AssistError::Authentication(
                "no ambient identity available".into(),
            )),
        }
    }
}
