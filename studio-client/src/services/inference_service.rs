//! OpenAI-compatible inference API of a deployed RAG application.
//!
//! Endpoints are requested with `include_contexts=1` so every choice carries
//! the retrieved passages that informed it. The model name is baked into the
//! deployment; requests always send the fixed `rag_model` identifier.

use tracing::{debug, info};

use crate::envelope::ApiEnvelope;
use crate::error_handler::{ApiError, Result};
use crate::structs::chat::{ChatHistoryRecord, ChatMessage, Generation};
use crate::structs::openai_api::{
    ChatCompletionResponse, CompletionResponse, ModelParamsPatch,
};

/// The only model identifier the deployed API accepts.
pub const RAG_MODEL: &str = "rag_model";

const COMPLETIONS_PATH: &str = "/v1/completions?include_contexts=1";
const CHAT_COMPLETIONS_PATH: &str = "/v1/chat/completions?include_contexts=1";

/// Typed surface of the deployed inference API.
#[derive(Debug, Clone)]
pub struct InferenceService {
    env: ApiEnvelope,
}

impl InferenceService {
    pub fn new(env: ApiEnvelope) -> Self {
        Self { env }
    }

    /// Single-prompt completion with debug contexts.
    pub async fn complete(
        &self,
        prompt: &str,
        params: &ModelParamsPatch,
    ) -> Result<CompletionResponse> {
        debug!(prompt_len = prompt.len(), "POST {COMPLETIONS_PATH}");
        let body = CompletionRequest {
            model: RAG_MODEL,
            prompt,
            params,
        };
        self.env.post_json(COMPLETIONS_PATH, &body).await
    }

    /// Like [`Self::complete`], reduced to the first choice.
    pub async fn complete_primary(
        &self,
        prompt: &str,
        params: &ModelParamsPatch,
    ) -> Result<Generation> {
        let resp = self.complete(prompt, params).await?;
        let choice = resp.choices.into_iter().next().ok_or(ApiError::EmptyChoices)?;
        Ok(Generation {
            completion: choice.text,
            contexts: choice.contexts,
        })
    }

    /// Chat completion with debug contexts. When `user` is given the server
    /// associates the turn with that anonymous user's chat history.
    pub async fn chat(
        &self,
        messages: &[ChatMessage],
        params: &ModelParamsPatch,
        user: Option<&str>,
    ) -> Result<ChatCompletionResponse> {
        debug!(
            turns = messages.len(),
            has_user = user.is_some(),
            "POST {CHAT_COMPLETIONS_PATH}"
        );
        let body = ChatCompletionRequest {
            model: RAG_MODEL,
            messages,
            params,
            user,
        };
        self.env.post_json(CHAT_COMPLETIONS_PATH, &body).await
    }

    /// Like [`Self::chat`], reduced to the first choice.
    pub async fn chat_primary(
        &self,
        messages: &[ChatMessage],
        params: &ModelParamsPatch,
        user: Option<&str>,
    ) -> Result<Generation> {
        let resp = self.chat(messages, params, user).await?;
        let choice = resp.choices.into_iter().next().ok_or(ApiError::EmptyChoices)?;
        Ok(Generation {
            completion: choice.message.content,
            contexts: choice.contexts,
        })
    }

    /// Fetches every persisted conversation for the given anonymous user,
    /// most recent first.
    pub async fn chat_history(&self, user_id: &str) -> Result<Vec<ChatHistoryRecord>> {
        let records: Vec<ChatHistoryRecord> = self
            .env
            .get_json(&format!("/chat-history/{user_id}"))
            .await?;
        info!(user_id, records = records.len(), "chat history fetched");
        Ok(records)
    }
}

/* ===========================================================================
HTTP payloads
======================================================================== */

/// Minimal completion request: fixed model, prompt, and the flattened
/// parameter patch (unset fields defer to server defaults).
#[derive(Debug, serde::Serialize)]
struct CompletionRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    #[serde(flatten)]
    params: &'a ModelParamsPatch,
}

/// Minimal chat request; `user` scopes server-side history.
#[derive(Debug, serde::Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    #[serde(flatten)]
    params: &'a ModelParamsPatch,
    #[serde(skip_serializing_if = "Option::is_none")]
    user: Option<&'a str>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn completion_request_omits_unchanged_params() {
        let params = ModelParamsPatch::default();
        let body = CompletionRequest {
            model: RAG_MODEL,
            prompt: "hello",
            params: &params,
        };
        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            serde_json::json!({"model": "rag_model", "prompt": "hello"})
        );
    }

    #[test]
    fn chat_request_flattens_params_and_user() {
        let params = ModelParamsPatch {
            temperature: Some(1.5),
            ..Default::default()
        };
        let messages = vec![ChatMessage::user("hi")];
        let body = ChatCompletionRequest {
            model: RAG_MODEL,
            messages: &messages,
            params: &params,
            user: Some("u-1"),
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["temperature"], serde_json::json!(1.5));
        assert_eq!(json["user"], "u-1");
        assert!(json.get("max_tokens").is_none());
    }
}
