//! Typed client for a RAG Studio deployment.
//!
//! Two HTTP surfaces share one [`envelope::ApiEnvelope`]:
//!
//! - [`services::studio_service::StudioService`] — the builder API
//!   (configuration snapshot, try-out panels, uploads, retrieval
//!   evaluation, log tail);
//! - [`services::inference_service::InferenceService`] — the deployed
//!   application's OpenAI-compatible API (completions/chat with debug
//!   contexts, per-user chat history).
//!
//! Configuration comes from the environment ([`config::ConsoleConfig`]);
//! errors are unified under [`error_handler::StudioClientError`].

pub mod config;
pub mod envelope;
pub mod error_handler;
pub mod services;
pub mod structs;
pub mod telemetry;

pub use config::ConsoleConfig;
pub use envelope::{AlertSink, ApiEnvelope};
pub use error_handler::{ApiError, ConfigError, Result, StudioClientError};
pub use services::inference_service::{InferenceService, RAG_MODEL};
pub use services::studio_service::{StudioService, UploadBatch};
pub use structs::chat::{ChatHistoryRecord, ChatMessage, ChatRole, ContextRecord, Generation};
pub use structs::evaluation::{EvalMetrics, RetrievalEvalResult};
pub use structs::logs::LogsResponse;
pub use structs::openai_api::{
    ChatCompletionResponse, CompletionResponse, ModelParamsPatch, Usage,
};
pub use structs::snapshot::{AppSnapshot, ChatPrompts, FileRecord, QueryPrompts};
