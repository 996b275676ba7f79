//! Credential resolution for upstream calls.
//!
//! Resolution order mirrors the agent runtime's expectations:
//! 1. A per-session token cached under `temp:<auth_key>` in session state,
//!    returned verbatim with no network call.
//! 2. A freshly minted ambient default-identity token.
//!
//! An explicitly empty cached token counts as absent and falls through to
//! the ambient identity; the empty string is never used as a credential.

pub mod identity;

pub use identity::{AccessToken, IdentityProvider, MetadataIdentity};

use std::sync::Arc;

use tracing::debug;

use crate::error::{AssistError, Result};
use crate::session::SessionState;

/// Resolves a bearer credential for one call.
#[derive(Clone)]
pub struct CredentialResolver {
    identity: Arc<dyn IdentityProvider>,
}

impl CredentialResolver {
    pub fn new(identity: Arc<dyn IdentityProvider>) -> Self {
        Self { identity }
    }

    /// Resolver backed by the metadata server.
    pub fn ambient() -> Self {
        Self::new(Arc::new(MetadataIdentity::new()))
    }

    /// Resolve a bearer token for the session, given the namespaced
    /// session key (`temp:<auth_key>`).
    ///
    /// Never writes the resolved token back into the session; the session
    /// state is owned by the runtime and read-only here.
    pub async fn resolve(&self, session: &SessionState, session_key: &str) -> Result<String> {
        if let Some(cached) = session.get_str(session_key) {
            debug!(key = session_key, "using session-cached credential");
            return Ok(cached.to_string());
        }

        debug!(key = session_key, "no session credential, minting ambient token");
        let token = self.identity.fetch_token().await?;
        if token.token.is_empty() {
            return Err(AssistError::Authentication(
                "identity provider returned an empty token".into(),
            ));
        }
        Ok(token.token)
    }
}
