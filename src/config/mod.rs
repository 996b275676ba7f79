//! Explicit configuration for the search/answer integration.
//!
//! Constructed once at process start (in code or via [`Config::from_env`])
//! and passed by reference into each component constructor. No component
//! reads the environment after construction.

use std::time::Duration;

use crate::error::{AssistError, Result};

/// Default per-request timeout applied to upstream calls.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Target identifiers and knobs for the upstream search/answer service.
#[derive(Debug, Clone)]
pub struct Config {
    /// Model identifier the surrounding agent runs on. Carried for the
    /// runtime's benefit; the search tool itself never uses it.
    pub model: String,
    /// Cloud project that owns the data store and search app.
    pub project_id: String,
    /// Data-store location, also the regional endpoint prefix.
    pub location: String,
    /// Data-store identifier (single-answer and document-search endpoints).
    pub data_store_id: String,
    /// Search-app (engine) identifier (streaming assist endpoint).
    pub engine_id: String,
    /// Name of the auth object whose per-session token may be cached
    /// under `temp:<auth_key>` in the session state.
    pub auth_key: String,
    /// Language code sent with document-search requests.
    pub language_code: String,
    /// Per-call timeout for upstream requests.
    pub request_timeout: Duration,
}

impl Config {
    /// Load from the deployment's environment variables (reads `.env` if
    /// present). Fails when a required identifier is missing.
    pub fn from_env() -> Result<Self> {
        let _ = dotenvy::dotenv(); // load .env if present, ignore error

        Ok(Self {
            model: require_env("MODEL")?,
            project_id: require_env("GOOGLE_CLOUD_PROJECT")?,
            location: require_env("DATASTORE_LOCATION")?,
            data_store_id: require_env("DATASTORE_ID")?,
            engine_id: require_env("AGENTSPACE_APP_ID_SEARCH")?,
            auth_key: require_env("AGENT_AUTH_OBJECT_ID")?,
            language_code: std::env::var("DATASTORE_LANGUAGE_CODE")
                .unwrap_or_else(|_| "pt-BR".to_string()),
            request_timeout: DEFAULT_TIMEOUT,
        })
    }

    /// Override the per-call upstream timeout.
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Session-state key under which a per-session token may be cached.
    pub fn session_token_key(&self) -> String {
        format!("temp:{}", self.auth_key)
    }
}

fn require_env(name: &str) -> Result<String> {
    std::env::var(name)
        .map_err(|_| AssistError::Configuration(format!("missing environment variable {name}")))
}
