//! Agent-facing query tool.

use async_trait::async_trait;
use serde_json::json;
use tracing::{debug, warn};

use crate::auth::CredentialResolver;
use crate::client::AnswerClient;
use crate::config::Config;
use crate::error::Result;
use crate::normalize;
use crate::session::SessionState;

/// JSON Schema parameter definition for a tool.
#[derive(Debug, Clone)]
pub struct ToolParameters {
    pub schema: serde_json::Value,
}

impl ToolParameters {
    pub fn from_schema(schema: serde_json::Value) -> Self {
        Self { schema }
    }

    /// Schema with a single required string property.
    pub fn single_string(name: &str, description: &str) -> Self {
        Self {
            schema: json!({
                "type": "object",
                "properties": {
                    name: {"type": "string", "description": description}
                },
                "required": [name],
            }),
        }
    }
}

/// A callable the agent runtime can mount.
///
/// `call` is the tool boundary: it always produces a value, never an
/// error. Failures degrade to an empty result inside the tool.
#[async_trait]
pub trait Tool: Send + Sync {
    /// Tool name (must match what the model calls).
    fn name(&self) -> &str;

    /// Human-readable description.
    fn description(&self) -> &str;

    /// JSON Schema parameters.
    fn parameters(&self) -> &ToolParameters;

    /// Execute with raw arguments and the session state owned by the
    /// runtime.
    async fn call(&self, args: &serde_json::Value, session: &SessionState) -> serde_json::Value;
}

/// Answers user queries by forwarding them to the streaming assist
/// endpoint and normalizing the response to plain text.
pub struct SearchTool {
    session_token_key: String,
    resolver: CredentialResolver,
    client: AnswerClient,
    parameters: ToolParameters,
}

impl SearchTool {
    /// Tool backed by the ambient default identity.
    pub fn new(config: &Config) -> Self {
        Self::with_identity(config, CredentialResolver::ambient())
    }

    /// Tool with a specific credential resolver (tests inject doubles).
    pub fn with_identity(config: &Config, resolver: CredentialResolver) -> Self {
        Self {
            session_token_key: config.session_token_key(),
            resolver,
            client: AnswerClient::new(config),
            parameters: ToolParameters::single_string("query", "The search query string."),
        }
    }

    /// Replace the answer client (tests override its base URL).
    pub fn with_client(mut self, client: AnswerClient) -> Self {
        self.client = client;
        self
    }

    /// Resolve a credential, run the streaming query, and normalize.
    ///
    /// Typed errors distinguish "request failed" from the valid empty
    /// outcome "no extractable answer"; [`SearchTool::run`] collapses
    /// both at the tool boundary.
    pub async fn execute(&self, query: &str, session: &SessionState) -> Result<String> {
        let credential = self
            .resolver
            .resolve(session, &self.session_token_key)
            .await?;
        let chunks = self.client.stream_assist(query, &credential).await?;
        Ok(normalize::collect_answer(chunks))
    }

    /// Tool-boundary entry point: always returns some string, possibly
    /// empty. Errors are logged and degraded, never propagated to the
    /// agent runtime.
    pub async fn run(&self, query: &str, session: &SessionState) -> String {
        match self.execute(query, session).await {
            Ok(answer) => {
                debug!(len = answer.len(), "query answered");
                answer
            }
            Err(err) => {
                warn!(error = %err, upstream = err.is_upstream(), "query failed, returning empty answer");
                String::new()
            }
        }
    }
}

#[async_trait]
impl Tool for SearchTool {
    fn name(&self) -> &str {
        "search_tasks"
    }

    fn description(&self) -> &str {
        "Searches the task registry and answers the query with grounded enterprise search results."
    }

    fn parameters(&self) -> &ToolParameters {
        &self.parameters
    }

    async fn call(&self, args: &serde_json::Value, session: &SessionState) -> serde_json::Value {
        let query = args.get("query").and_then(|q| q.as_str()).unwrap_or("");
        json!(self.run(query, session).await)
    }
}
