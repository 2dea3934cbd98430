//! Content generation request/response types for the Gemini API.
//!
//! Every response field is optional: the model is free to omit candidates,
//! content, parts or feedback, and callers must check each level explicitly.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::content::{Blob, Content};

/// The reason why content generation finished.
///
/// Kept as the raw API string so that new reason codes (for example the
/// image-specific `IMAGE_SAFETY`) are reported verbatim instead of failing
/// deserialization.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct FinishReason(pub String);

impl FinishReason {
    /// Natural stop point.
    pub const STOP: &'static str = "STOP";

    /// Creates a finish reason from its API code.
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    /// Returns the API code.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns true for normal completion.
    pub fn is_normal(&self) -> bool {
        self.0 == Self::STOP
    }
}

impl fmt::Display for FinishReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Metadata about token usage.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct UsageMetadata {
    /// Number of tokens in the prompt.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prompt_token_count: Option<i32>,
    /// Number of tokens in the candidates.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub candidates_token_count: Option<i32>,
    /// Total number of tokens.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_token_count: Option<i32>,
}

/// A candidate response from the model.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    /// The content of the candidate.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<Content>,
    /// The reason generation finished.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub finish_reason: Option<FinishReason>,
    /// Human readable detail for the finish reason.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub finish_message: Option<String>,
    /// The index of this candidate.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub index: Option<i32>,
}

/// Request to generate content.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentRequest {
    /// The content to send to the model.
    pub contents: Vec<Content>,
}

/// Feedback on why the prompt was blocked.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct PromptFeedback {
    /// The reason the prompt was blocked, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub block_reason: Option<String>,
    /// Explanation accompanying the block reason.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub block_reason_message: Option<String>,
}

/// Response from content generation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentResponse {
    /// The candidate responses.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub candidates: Option<Vec<Candidate>>,
    /// Feedback about the prompt.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prompt_feedback: Option<PromptFeedback>,
    /// Usage metadata.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub usage_metadata: Option<UsageMetadata>,
    /// The version of the model used.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model_version: Option<String>,
}

impl GenerateContentResponse {
    /// Returns the non-empty block reason and its optional message.
    pub fn block_reason(&self) -> Option<(&str, Option<&str>)> {
        let feedback = self.prompt_feedback.as_ref()?;
        let reason = feedback.block_reason.as_deref()?;
        if reason.trim().is_empty() {
            return None;
        }
        Some((reason, feedback.block_reason_message.as_deref()))
    }

    /// Returns the first candidate, if any.
    pub fn first_candidate(&self) -> Option<&Candidate> {
        self.candidates.as_ref()?.first()
    }

    /// Returns the first inline-data blob of the first candidate.
    pub fn first_inline_data(&self) -> Option<&Blob> {
        self.first_candidate()?
            .content
            .as_ref()?
            .parts
            .iter()
            .find_map(|part| part.inline_data.as_ref())
    }

    /// Returns the finish reason of the first candidate. A blank code counts
    /// as absent.
    pub fn finish_reason(&self) -> Option<&FinishReason> {
        self.first_candidate()?
            .finish_reason
            .as_ref()
            .filter(|reason| !reason.as_str().trim().is_empty())
    }

    /// Concatenated answer text of the first candidate, excluding thoughts.
    pub fn text(&self) -> Option<String> {
        let content = self.first_candidate()?.content.as_ref()?;
        let texts: Vec<&str> = content
            .parts
            .iter()
            .filter(|part| part.thought != Some(true))
            .filter_map(|part| part.text.as_deref())
            .collect();

        if texts.is_empty() {
            None
        } else {
            Some(texts.concat())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn parse(value: serde_json::Value) -> GenerateContentResponse {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_empty_response_deserializes() {
        let response = parse(json!({}));
        assert!(response.first_candidate().is_none());
        assert!(response.first_inline_data().is_none());
        assert!(response.finish_reason().is_none());
        assert!(response.text().is_none());
        assert!(response.block_reason().is_none());
    }

    #[test]
    fn test_blank_block_reason_is_ignored() {
        let response = parse(json!({"promptFeedback": {"blockReason": ""}}));
        assert!(response.block_reason().is_none());
    }

    #[test]
    fn test_block_reason_with_message() {
        let response = parse(json!({
            "promptFeedback": {"blockReason": "SAFETY", "blockReasonMessage": "nope"}
        }));
        assert_eq!(response.block_reason(), Some(("SAFETY", Some("nope"))));
    }

    #[test]
    fn test_first_inline_data_skips_text_parts() {
        let response = parse(json!({
            "candidates": [{
                "content": {"role": "model", "parts": [
                    {"text": "Here you go"},
                    {"inlineData": {"mimeType": "image/png", "data": "AAAA"}},
                    {"inlineData": {"mimeType": "image/jpeg", "data": "BBBB"}}
                ]},
                "finishReason": "STOP"
            }]
        }));
        let blob = response.first_inline_data().unwrap();
        assert_eq!(blob.mime_type, "image/png");
        assert_eq!(blob.data, "AAAA");
        assert!(response.finish_reason().unwrap().is_normal());
    }

    #[test]
    fn test_candidate_without_content() {
        let response = parse(json!({
            "candidates": [{"finishReason": "IMAGE_SAFETY"}]
        }));
        assert!(response.first_inline_data().is_none());
        assert_eq!(response.finish_reason().unwrap().as_str(), "IMAGE_SAFETY");
    }

    #[test]
    fn test_text_excludes_thoughts() {
        let response = parse(json!({
            "candidates": [{
                "content": {"parts": [
                    {"text": "thinking...", "thought": true},
                    {"text": "I can't "},
                    {"text": "edit that."}
                ]}
            }]
        }));
        assert_eq!(response.text().as_deref(), Some("I can't edit that."));
    }
}
