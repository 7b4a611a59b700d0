//! Chat messages, retrieved contexts, and persisted chat history.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

/// Author of a chat message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    System,
    User,
    Assistant,
}

impl fmt::Display for ChatRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChatRole::System => write!(f, "system"),
            ChatRole::User => write!(f, "user"),
            ChatRole::Assistant => write!(f, "assistant"),
        }
    }
}

/// One turn of a conversation. Conversations are append-only on the client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::Assistant,
            content: content.into(),
        }
    }
}

/// One retrieved passage surfaced alongside a completion, for debugging.
/// Never persisted by the client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContextRecord {
    pub score: f32,
    pub filename: String,
    pub context: String,
}

/// Answer plus the retrieved passages that produced it. Shared by the
/// builder try-out endpoints and the inference service's first-choice view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Generation {
    pub completion: String,
    #[serde(default)]
    pub contexts: Vec<ContextRecord>,
}

/// One persisted conversation for an anonymous user.
///
/// The server keys records by a hash of the message list; some deployments
/// send it as a JSON number, others as a string. Both deserialize into the
/// string `key`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatHistoryRecord {
    #[serde(deserialize_with = "key_from_string_or_number")]
    pub key: String,
    #[serde(default)]
    pub messages: Vec<ChatMessage>,
}

fn key_from_string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    match value {
        serde_json::Value::String(s) => Ok(s),
        serde_json::Value::Number(n) => Ok(n.to_string()),
        other => Err(serde::de::Error::custom(format!(
            "chat history key must be a string or number, got {other}"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roles_serialize_lowercase() {
        let msg = ChatMessage::assistant("hi");
        let json = serde_json::to_value(&msg).unwrap();
        assert_eq!(json["role"], "assistant");
    }

    #[test]
    fn history_key_accepts_numbers_and_strings() {
        let rec: ChatHistoryRecord =
            serde_json::from_str(r#"{"key": -337045291, "messages": []}"#).unwrap();
        assert_eq!(rec.key, "-337045291");

        let rec: ChatHistoryRecord =
            serde_json::from_str(r#"{"key": "abc", "messages": []}"#).unwrap();
        assert_eq!(rec.key, "abc");
    }
}
