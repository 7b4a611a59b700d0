//! Builder-side studio API: configuration snapshot, try-out panels,
//! knowledge-base uploads, retrieval evaluation, and the server log tail.
//!
//! Commit-a-setting endpoints (`/api/update-*`) are not wrapped in methods
//! here: the console drives them through [`ApiEnvelope::call_with`] followed
//! by a full snapshot reload, so the path constants below are public.

use std::path::Path;

use reqwest::multipart;
use tracing::{debug, info, warn};

use crate::envelope::ApiEnvelope;
use crate::error_handler::Result;
use crate::structs::chat::{ChatMessage, Generation};
use crate::structs::evaluation::RetrievalEvalResult;
use crate::structs::logs::LogsResponse;
use crate::structs::snapshot::AppSnapshot;

/// Snapshot fetch (GET).
pub const DATA_PATH: &str = "/api/data";
/// Rename the application.
pub const UPDATE_APP_NAME_PATH: &str = "/api/update-app-name";
/// Change the generation model.
pub const UPDATE_MODEL_PATH: &str = "/api/update-model";
/// Change the embedding model.
pub const UPDATE_EMBEDDING_MODEL_PATH: &str = "/api/update-embedding-model";
/// Replace the query prompt templates.
pub const UPDATE_QUERY_PROMPTS_PATH: &str = "/api/update-query-prompts";
/// Replace the chat prompt templates.
pub const UPDATE_CHAT_PROMPTS_PATH: &str = "/api/update-chat-prompts";
/// Knowledge-base file upload (multipart).
pub const UPLOAD_PATH: &str = "/api/upload";

/// Outcome of a multi-file upload batch.
///
/// The studio accepts one file per request, so a "batch" is a client-side
/// loop; partial failure is possible and is reported, not raised.
#[derive(Debug, Default)]
pub struct UploadBatch {
    /// Files the server accepted.
    pub completed: usize,
    /// `(file name, error detail)` for each rejected or unreadable file.
    pub failed: Vec<(String, String)>,
}

impl UploadBatch {
    /// True when every queued file was accepted.
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }

    /// Alert text for a partially failed batch.
    pub fn alert_text(&self) -> String {
        format!(
            "Error: only uploaded {} items. Please adjust your request and try again.",
            self.completed
        )
    }
}

/// Typed surface of the studio builder API.
#[derive(Debug, Clone)]
pub struct StudioService {
    env: ApiEnvelope,
}

impl StudioService {
    pub fn new(env: ApiEnvelope) -> Self {
        Self { env }
    }

    /// The underlying envelope, for commit-and-reload flows.
    pub fn envelope(&self) -> &ApiEnvelope {
        &self.env
    }

    /// Fetches the server-authoritative configuration snapshot.
    pub async fn fetch_snapshot(&self) -> Result<AppSnapshot> {
        let snap: AppSnapshot = self.env.get_json(DATA_PATH).await?;
        info!(
            app_name = %snap.app_name,
            repo_name = %snap.repo_name,
            files = snap.files.len(),
            "configuration snapshot loaded"
        );
        Ok(snap)
    }

    /// Answers one stand-alone query through the configured pipeline.
    pub async fn try_completion(&self, prompt: &str) -> Result<Generation> {
        debug!(prompt_len = prompt.len(), "POST {TRY_COMPLETION_PATH}");
        self.env
            .post_json(TRY_COMPLETION_PATH, &TryCompletionRequest { prompt })
            .await
    }

    /// Answers the next chat turn through the configured pipeline.
    pub async fn try_chat(&self, messages: &[ChatMessage]) -> Result<Generation> {
        debug!(turns = messages.len(), "POST {TRY_CHAT_PATH}");
        self.env
            .post_json(TRY_CHAT_PATH, &TryChatRequest { messages })
            .await
    }

    /// Launches the retrieval auto-evaluation and waits for its result rows.
    pub async fn run_retrieval_evaluation(&self) -> Result<Vec<RetrievalEvalResult>> {
        info!("launching retrieval auto-evaluation");
        let results: Vec<RetrievalEvalResult> = self
            .env
            .post_json(RETRIEVAL_AUTORUN_PATH, &serde_json::json!({}))
            .await?;
        info!(rows = results.len(), "retrieval evaluation finished");
        Ok(results)
    }

    /// Tails the server log.
    pub async fn fetch_logs(&self, num_lines: u64) -> Result<LogsResponse> {
        self.env
            .get_json(&format!("{LOGS_PATH}?num_lines={num_lines}"))
            .await
    }

    /// Uploads each file as its own multipart request, collecting a batch
    /// summary instead of stopping at the first failure.
    pub async fn upload_files(&self, paths: &[impl AsRef<Path>]) -> UploadBatch {
        info!(items = paths.len(), "upload batch start");
        let mut batch = UploadBatch::default();

        for path in paths {
            let path = path.as_ref();
            let name = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| path.display().to_string());

            match self.upload_one(path, &name).await {
                Ok(()) => batch.completed += 1,
                Err(e) => {
                    warn!(file = %name, error = %e, "upload failed");
                    batch.failed.push((name, e.to_string()));
                }
            }
        }

        info!(
            completed = batch.completed,
            failed = batch.failed.len(),
            "upload batch finish"
        );
        batch
    }

    async fn upload_one(&self, path: &Path, name: &str) -> Result<()> {
        let bytes = tokio::fs::read(path).await?;
        let part = multipart::Part::bytes(bytes).file_name(name.to_string());
        let form = multipart::Form::new().part("file", part);
        let _: serde_json::Value = self.env.post_multipart(UPLOAD_PATH, form).await?;
        Ok(())
    }
}

const TRY_COMPLETION_PATH: &str = "/api/try-completion";
const TRY_CHAT_PATH: &str = "/api/try-chat";
const RETRIEVAL_AUTORUN_PATH: &str = "/api/evaluation/retrieval/autorun";
const LOGS_PATH: &str = "/api/logs";

/* ===========================================================================
HTTP payloads
======================================================================== */

/// Body of `/api/try-completion`.
#[derive(Debug, serde::Serialize)]
struct TryCompletionRequest<'a> {
    prompt: &'a str,
}

/// Body of `/api/try-chat`.
#[derive(Debug, serde::Serialize)]
struct TryChatRequest<'a> {
    messages: &'a [ChatMessage],
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_batch_reports_the_original_alert_text() {
        let batch = UploadBatch {
            completed: 3,
            failed: vec![("a.txt".into(), "HTTP 500".into())],
        };
        assert!(!batch.is_complete());
        assert_eq!(
            batch.alert_text(),
            "Error: only uploaded 3 items. Please adjust your request and try again."
        );
    }
}
