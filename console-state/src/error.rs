//! Typed error for the console-state crate.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConsoleStateError {
    /// Model parameters failed range validation; one entry per violation.
    #[error("invalid model parameters: {}", issues.join("; "))]
    InvalidParams { issues: Vec<String> },

    /// State-file IO (persisted anonymous user id).
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
