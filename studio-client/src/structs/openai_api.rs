//! OpenAI-compatible payloads used by the deployed inference API.
//!
//! Responses extend the stock OpenAI shapes with a `contexts` array per
//! choice when `include_contexts=1` is requested.

use serde::{Deserialize, Serialize};

use crate::structs::chat::{ChatMessage, ContextRecord};

/// Partial inference parameters, carrying only values that differ from the
/// client-side defaults. Flattened into request bodies so absent fields fall
/// back to the server's own defaults.
///
/// This is the typed replacement for assigning arbitrary keys onto a request
/// object: the field set is fixed at compile time and serialization skips
/// anything left unset.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ModelParamsPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub presence_penalty: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub frequency_penalty: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
}

impl ModelParamsPatch {
    /// True when every field is unset (the request would carry no overrides).
    pub fn is_empty(&self) -> bool {
        self.temperature.is_none()
            && self.presence_penalty.is_none()
            && self.frequency_penalty.is_none()
            && self.max_tokens.is_none()
    }
}

/// Token accounting block. The deployed API reports `-1` when it does not
/// meter a category.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Usage {
    pub prompt_tokens: i64,
    pub completion_tokens: i64,
    pub total_tokens: i64,
}

/// One completion alternative, plus its retrieved contexts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompletionChoice {
    pub text: String,
    #[serde(default)]
    pub index: u32,
    #[serde(default)]
    pub finish_reason: Option<String>,
    #[serde(default)]
    pub contexts: Vec<ContextRecord>,
}

/// Response of `POST /v1/completions?include_contexts=1`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompletionResponse {
    pub id: String,
    pub object: String,
    pub created: i64,
    pub model: String,
    #[serde(default)]
    pub system_fingerprint: Option<String>,
    pub choices: Vec<CompletionChoice>,
    #[serde(default)]
    pub usage: Usage,
}

/// One chat alternative, plus its retrieved contexts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatChoice {
    pub message: ChatMessage,
    #[serde(default)]
    pub index: u32,
    #[serde(default)]
    pub finish_reason: Option<String>,
    #[serde(default)]
    pub contexts: Vec<ContextRecord>,
}

/// Response of `POST /v1/chat/completions?include_contexts=1`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatCompletionResponse {
    pub id: String,
    pub object: String,
    pub created: i64,
    pub model: String,
    pub choices: Vec<ChatChoice>,
    #[serde(default)]
    pub usage: Usage,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_patch_serializes_to_nothing() {
        let patch = ModelParamsPatch::default();
        assert!(patch.is_empty());
        assert_eq!(
            serde_json::to_value(patch).unwrap(),
            serde_json::json!({})
        );
    }

    #[test]
    fn patch_keeps_wire_field_names() {
        let patch = ModelParamsPatch {
            max_tokens: Some(256),
            ..Default::default()
        };
        assert_eq!(
            serde_json::to_value(patch).unwrap(),
            serde_json::json!({"max_tokens": 256})
        );
    }
}
