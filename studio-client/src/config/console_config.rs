//! Runtime configuration loaded from environment variables.
//!
//! # Environment variables
//!
//! - `RAG_STUDIO_URL`          = API base URL (mandatory; http(s), no trailing slash)
//! - `RAG_STUDIO_TIMEOUT_SECS` = optional request timeout in seconds (default 60)
//! - `RAG_STUDIO_USER_ID_FILE` = optional path of the persisted anonymous user id
//! - `RAG_STUDIO_LOG_LINES`    = optional default for the server-log tail size

use std::path::PathBuf;

use crate::error_handler::{Result, env_opt_u64, must_env, validate_base_url};

/// Default request timeout when `RAG_STUDIO_TIMEOUT_SECS` is unset.
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Default number of log lines fetched by the log panel.
pub const DEFAULT_LOG_LINES: u64 = 100;

/// Config bag for the console and its API clients.
///
/// Construction fails fast on a missing or malformed base URL; everything
/// else has defaults.
#[derive(Clone, Debug)]
pub struct ConsoleConfig {
    /// API host, scheme included, no trailing slash.
    pub base_url: String,

    /// Per-request timeout for every HTTP call.
    pub timeout_secs: u64,

    /// Where the anonymous user id lives between runs (cookie analog).
    pub user_id_file: PathBuf,

    /// Default `num_lines` for the server-log tail.
    pub log_lines: u64,
}

impl ConsoleConfig {
    /// Builds the config from environment variables.
    ///
    /// # Errors
    /// - [`crate::error_handler::ConfigError::MissingVar`] when `RAG_STUDIO_URL` is unset/empty
    /// - [`crate::error_handler::ConfigError::InvalidBaseUrl`] on a bad scheme or trailing slash
    /// - [`crate::error_handler::ConfigError::InvalidNumber`] when a numeric knob fails to parse
    pub fn from_env() -> Result<Self> {
        let base_url = must_env("RAG_STUDIO_URL")?;
        validate_base_url("RAG_STUDIO_URL", &base_url)?;

        let timeout_secs =
            env_opt_u64("RAG_STUDIO_TIMEOUT_SECS")?.unwrap_or(DEFAULT_TIMEOUT_SECS);
        let log_lines = env_opt_u64("RAG_STUDIO_LOG_LINES")?.unwrap_or(DEFAULT_LOG_LINES);

        let user_id_file = std::env::var("RAG_STUDIO_USER_ID_FILE")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(".rag-studio-user-id"));

        Ok(Self {
            base_url,
            timeout_secs,
            user_id_file,
            log_lines,
        })
    }

    /// Constructor for embedders and tests that already hold a validated URL.
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            user_id_file: PathBuf::from(".rag-studio-user-id"),
            log_lines: DEFAULT_LOG_LINES,
        }
    }
}
