//! The server-authoritative configuration snapshot.

use serde::{Deserialize, Serialize};

/// One indexed knowledge-base file, as reported by the server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileRecord {
    /// File name inside the knowledge base.
    pub file_name: String,
    /// Number of index nodes derived from this file.
    pub node_count: u64,
}

/// Prompt templates used for single-query answering.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryPrompts {
    pub text_qa_template: String,
    pub refine_template: String,
}

/// Prompt templates used for chat answering.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatPrompts {
    pub context_prompt: String,
    pub condense_prompt: String,
}

/// Everything the server knows about the configured RAG application.
///
/// Fetched once per console session from `GET /api/data` and replaced
/// wholesale after every committed edit; never mutated locally. The
/// [`Default`] value is the zero-value snapshot shown before the first load
/// completes (or when it fails) — panels render empty fields instead of
/// crashing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppSnapshot {
    #[serde(default)]
    pub app_name: String,
    #[serde(default)]
    pub repo_name: String,
    #[serde(default)]
    pub embed_model: String,
    #[serde(default)]
    pub files: Vec<FileRecord>,
    #[serde(default)]
    pub last_checkpoint: String,
    #[serde(default)]
    pub query_prompts: QueryPrompts,
    #[serde(default)]
    pub chat_prompts: ChatPrompts,
    #[serde(default)]
    pub llm_model: String,
}

impl AppSnapshot {
    /// Console/window title derived from the application name.
    pub fn title(&self) -> String {
        format!("{} - Rag App Studio", self.app_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_value_snapshot_is_fully_populated() {
        let snap = AppSnapshot::default();
        assert_eq!(snap.app_name, "");
        assert!(snap.files.is_empty());
        assert_eq!(snap.query_prompts, QueryPrompts::default());
    }

    #[test]
    fn snapshot_tolerates_missing_fields() {
        let snap: AppSnapshot = serde_json::from_str(r#"{"app_name":"docs-bot"}"#).unwrap();
        assert_eq!(snap.app_name, "docs-bot");
        assert_eq!(snap.llm_model, "");
        assert_eq!(snap.title(), "docs-bot - Rag App Studio");
    }
}
