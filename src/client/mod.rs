//! HTTP client for the upstream search/answer service.

pub mod http;

use std::time::Duration;

use futures::stream::BoxStream;
use tracing::debug;

use crate::config::Config;
use crate::error::{AssistError, Result};
use crate::normalize::{self, AnswerResponse, AssistChunk};

/// Result-count limit sent with single-shot answer requests.
const MAX_RETURN_RESULTS: u32 = 5;

/// Page size for plain document-search requests.
const SEARCH_PAGE_SIZE: u32 = 10;

/// Client for the regional answer/search endpoints.
///
/// Built once from a [`Config`]; credentials are resolved per call and
/// passed into each request. One HTTP POST per invocation, no retries:
/// at most one attempt is ever made for a query.
pub struct AnswerClient {
    client: reqwest::Client,
    base_url: String,
    project_id: String,
    location: String,
    data_store_id: String,
    engine_id: String,
    language_code: String,
    timeout: Duration,
}

impl AnswerClient {
    pub fn new(config: &Config) -> Self {
        Self {
            client: http::build_client(config.request_timeout),
            base_url: format!(
                "https://{}-discoveryengine.googleapis.com/v1alpha",
                config.location
            ),
            project_id: config.project_id.clone(),
            location: config.location.clone(),
            data_store_id: config.data_store_id.clone(),
            engine_id: config.engine_id.clone(),
            language_code: config.language_code.clone(),
            timeout: config.request_timeout,
        }
    }

    /// Override the endpoint base (tests point this at a mock server).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    fn serving_config_url(&self, verb: &str) -> String {
        format!(
            "{}/projects/{}/locations/{}/collections/default_collection/dataStores/{}/servingConfigs/default_search:{verb}",
            self.base_url, self.project_id, self.location, self.data_store_id
        )
    }

    fn assistant_url(&self) -> String {
        format!(
            "{}/projects/{}/locations/{}/collections/default_collection/engines/{}/assistants/default_assistant:streamAssist",
            self.base_url, self.project_id, self.location, self.engine_id
        )
    }

    async fn post(
        &self,
        url: &str,
        credential: &str,
        body: &serde_json::Value,
    ) -> Result<reqwest::Response> {
        let request = async {
            let resp = self
                .client
                .post(url)
                .headers(http::bearer_headers(credential))
                .json(body)
                .send()
                .await
                .map_err(|e| http::transport_error(e, self.timeout))?;

            let status = resp.status().as_u16();
            if !(200..300).contains(&status) {
                let body_text = resp.text().await.unwrap_or_default();
                return Err(http::status_to_error(status, &body_text));
            }
            Ok(resp)
        };

        // Explicit per-call deadline on top of the transport timeout.
        match tokio::time::timeout(self.timeout, request).await {
            Ok(result) => result,
            Err(_) => Err(AssistError::Timeout(self.timeout.as_millis() as u64)),
        }
    }

    /// Single-shot answer generation (`:answer`).
    pub async fn answer(&self, query: &str, credential: &str) -> Result<AnswerResponse> {
        let url = self.serving_config_url("answer");
        let body = serde_json::json!({
            "query": {"text": query},
            "searchSpec": {
                "searchParams": {
                    "maxReturnResults": MAX_RETURN_RESULTS
                }
            }
        });

        debug!(%url, "answer request");
        let resp = self.post(&url, credential, &body).await?;
        decode_body(resp).await
    }

    /// Streaming assist (`:streamAssist`): the upstream responds with a
    /// JSON array of partial chunks.
    pub async fn stream_assist(&self, query: &str, credential: &str) -> Result<Vec<AssistChunk>> {
        let url = self.assistant_url();
        let body = serde_json::json!({
            "query": {"text": query}
        });

        debug!(%url, "streamAssist request");
        let resp = self.post(&url, credential, &body).await?;
        decode_body(resp).await
    }

    /// Streaming assist as a lazy stream of displayable text segments,
    /// thought content already filtered. Consumed once, in chunk order.
    pub async fn assist_segments(
        &self,
        query: &str,
        credential: &str,
    ) -> Result<BoxStream<'static, String>> {
        let chunks = self.stream_assist(query, credential).await?;
        let stream = async_stream::stream! {
            for chunk in chunks {
                for segment in normalize::chunk_segments(chunk) {
                    yield segment;
                }
            }
        };
        Ok(Box::pin(stream))
    }

    /// Plain document search (`:search`) with query expansion, spell
    /// correction, and snippet return. Returns the raw decoded body.
    pub async fn search(&self, query: &str, credential: &str) -> Result<serde_json::Value> {
        let url = self.serving_config_url("search");
        let body = serde_json::json!({
            "query": query,
            "pageSize": SEARCH_PAGE_SIZE,
            "queryExpansionSpec": {"condition": "AUTO"},
            "spellCorrectionSpec": {"mode": "AUTO"},
            "relevanceScoreSpec": {"returnRelevanceScore": true},
            "languageCode": self.language_code,
            "contentSearchSpec": {"snippetSpec": {"returnSnippet": true}},
            "naturalLanguageQueryUnderstandingSpec": {"filterExtractionCondition": "ENABLED"}
        });

        debug!(%url, "search request");
        let resp = self.post(&url, credential, &body).await?;
        decode_body(resp).await
    }
}

/// Decode a 2xx response body, reporting shape mismatches as malformed
/// rather than as transport failures.
async fn decode_body<T: serde::de::DeserializeOwned>(resp: reqwest::Response) -> Result<T> {
    let bytes = resp.bytes().await?;
    serde_json::from_slice(&bytes)
        .map_err(|e| AssistError::MalformedResponse(format!("undecodable response body: {e}")))
}
