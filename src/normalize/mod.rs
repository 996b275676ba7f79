//! Normalization of upstream answer payloads into plain text.
//!
//! The streaming assist endpoint returns a sequence of loosely structured
//! chunks; every level of nesting is optional. Absence of structure at any
//! level means absence of content, never an error: a chunk with no answer,
//! a reply with no grounded content, or content with no text all contribute
//! nothing. Content tagged as internal thought is filtered out entirely.

use serde::Deserialize;
use tracing::warn;

// ---------------------------------------------------------------------------
// Wire types — streaming assist
// ---------------------------------------------------------------------------

/// One unit of the streaming assist response.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssistChunk {
    pub answer: Option<AssistAnswer>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssistAnswer {
    pub replies: Option<Vec<AssistReply>>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssistReply {
    pub grounded_content: Option<GroundedContent>,
}

/// Content backed by retrieved source documents.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroundedContent {
    pub content: Option<ReplyContent>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReplyContent {
    pub text: Option<String>,
    /// Internal reasoning trace, not meant for end-user display.
    #[serde(default)]
    pub thought: bool,
}

// ---------------------------------------------------------------------------
// Wire types — single-shot answer
// ---------------------------------------------------------------------------

/// Response of the single-shot `:answer` endpoint.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnswerResponse {
    pub answer: Option<AnswerBody>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnswerBody {
    pub answer_text: Option<String>,
}

// ---------------------------------------------------------------------------
// Normalization
// ---------------------------------------------------------------------------

/// Displayable, non-thought text segments of one chunk, in reply order.
pub fn chunk_segments(chunk: AssistChunk) -> impl Iterator<Item = String> {
    chunk
        .answer
        .and_then(|a| a.replies)
        .into_iter()
        .flatten()
        .filter_map(|reply| {
            let content = reply.grounded_content?.content?;
            if content.thought {
                return None;
            }
            content.text
        })
}

/// Concatenate every displayable text segment across all chunks.
///
/// Order is strictly chunk-encounter order, then reply order within a
/// chunk; no reordering or deduplication. Segments are joined with a
/// single space. The chunk sequence is consumed once; the result may be
/// empty, and an empty result is a valid outcome.
pub fn collect_answer<I>(chunks: I) -> String
where
    I: IntoIterator<Item = AssistChunk>,
{
    let mut answer = String::new();
    for chunk in chunks {
        for segment in chunk_segments(chunk) {
            if !answer.is_empty() {
                answer.push(' ');
            }
            answer.push_str(&segment);
        }
    }
    answer
}

/// Project a single-shot answer response down to its text.
///
/// A response without `answer.answerText` yields the empty string; the
/// shape mismatch is logged but not fatal.
pub fn single_answer_text(response: AnswerResponse) -> String {
    match response.answer.and_then(|a| a.answer_text) {
        Some(text) => text,
        None => {
            warn!("answer response carried no answerText field");
            String::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn chunks(value: serde_json::Value) -> Vec<AssistChunk> {
        serde_json::from_value(value).expect("chunk fixture")
    }

    #[test]
    fn chunks_without_answers_normalize_to_empty() {
        let raw = chunks(json!([{}, {"other": 1}, {"answer": {}}]));
        assert_eq!(collect_answer(raw), "");
    }

    #[test]
    fn thought_content_never_appears() {
        let raw = chunks(json!([{
            "answer": {"replies": [
                {"groundedContent": {"content": {"text": "internal plan", "thought": true}}},
                {"groundedContent": {"content": {"text": "visible"}}}
            ]}
        }]));
        let out = collect_answer(raw);
        assert_eq!(out, "visible");
        assert!(!out.contains("internal plan"));
    }

    #[test]
    fn concatenation_preserves_encounter_order() {
        let raw = chunks(json!([
            {"answer": {"replies": [
                {"groundedContent": {"content": {"text": "A"}}}
            ]}},
            {"answer": {"replies": [
                {"groundedContent": {"content": {"text": "B"}}},
                {"groundedContent": {"content": {"text": "C"}}}
            ]}}
        ]));
        assert_eq!(collect_answer(raw), "A B C");
    }

    #[test]
    fn partial_structure_is_skipped_silently() {
        let raw = chunks(json!([
            {"answer": {"replies": [{}]}},
            {"answer": {"replies": [{"groundedContent": {}}]}},
            {"answer": {"replies": [{"groundedContent": {"content": {}}}]}},
            {"answer": {"replies": [{"groundedContent": {"content": {"text": "kept"}}}]}}
        ]));
        assert_eq!(collect_answer(raw), "kept");
    }

    #[test]
    fn single_answer_is_a_pure_projection() {
        let response: AnswerResponse =
            serde_json::from_value(json!({"answer": {"answerText": "X"}})).unwrap();
        assert_eq!(single_answer_text(response), "X");
    }

    #[test]
    fn single_answer_missing_field_yields_empty() {
        let response: AnswerResponse = serde_json::from_value(json!({})).unwrap();
        assert_eq!(single_answer_text(response), "");

        let response: AnswerResponse =
            serde_json::from_value(json!({"answer": {}})).unwrap();
        assert_eq!(single_answer_text(response), "");
    }
}
