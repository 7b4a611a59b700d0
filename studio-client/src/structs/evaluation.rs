//! Retrieval-evaluation results returned by the autorun endpoint.

use serde::{Deserialize, Serialize};

/// Retrieval-quality scores for a single evaluation query.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EvalMetrics {
    pub precision: f64,
    pub recall: f64,
    pub hit_rate: f64,
}

/// One row of a retrieval evaluation run: the generated query, the reference
/// passages, what the retriever actually returned, and the scores.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RetrievalEvalResult {
    pub query: String,
    #[serde(default)]
    pub expected_texts: Vec<String>,
    #[serde(default)]
    pub retrieved_texts: Vec<String>,
    pub metrics: EvalMetrics,
}
