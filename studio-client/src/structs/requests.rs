//! Bodies of the commit-a-setting endpoints.
//!
//! Prompt updates reuse [`crate::structs::snapshot::QueryPrompts`] and
//! [`crate::structs::snapshot::ChatPrompts`]: the commit body is exactly the
//! snapshot section being replaced.

use serde::Serialize;

/// Body of `POST /api/update-app-name`.
#[derive(Debug, Clone, Serialize)]
pub struct UpdateAppName {
    pub app_name: String,
}

/// Body of `POST /api/update-model`.
#[derive(Debug, Clone, Serialize)]
pub struct UpdateModel {
    pub model_name: String,
}

/// Body of `POST /api/update-embedding-model`.
#[derive(Debug, Clone, Serialize)]
pub struct UpdateEmbeddingModel {
    pub embedding_model: String,
}
