//! Unified error handling for `studio-client`.
//!
//! This module exposes a single top-level error type [`StudioClientError`] for
//! the whole library, and groups domain-specific errors in nested enums
//! ([`ConfigError`], [`ApiError`]). Small helpers for reading/validating
//! environment variables are provided and return the unified [`Result<T>`]
//! alias.
//!
//! All messages include the suffix `[Studio Client]` to simplify attribution
//! in logs.

use reqwest::StatusCode;
use thiserror::Error;

/* ------------------------------------------------------------------------- */
/* Public result alias                                                       */
/* ------------------------------------------------------------------------- */

/// Unified result alias for the entire crate.
pub type Result<T> = std::result::Result<T, StudioClientError>;

/* ------------------------------------------------------------------------- */
/* Top-level error                                                           */
/* ------------------------------------------------------------------------- */

/// Top-level error for the `studio-client` crate.
///
/// Variants wrap domain-specific enums (config/API) and a few common cases
/// (HTTP transport, file IO for uploads). Prefer adding new sub-enums for
/// distinct domains instead of growing this type indefinitely.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum StudioClientError {
    /// Configuration/validation errors (startup/preconditions).
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Errors raised by the remote API (bad status, undecodable payload).
    #[error(transparent)]
    Api(#[from] ApiError),

    /// Underlying HTTP transport error (e.g., `reqwest::Error`).
    #[error("[Studio Client] transport error: {0}")]
    HttpTransport(#[from] reqwest::Error),

    /// Local file IO failed (e.g., reading a file queued for upload).
    #[error("[Studio Client] io error: {0}")]
    Io(#[from] std::io::Error),
}

/* ------------------------------------------------------------------------- */
/* Config errors                                                             */
/* ------------------------------------------------------------------------- */

/// Error enum for environment/config-driven setup and call preconditions.
///
/// Keep this focused: only errors that realistically happen at config
/// load/validation time or before a request is issued.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Required environment variable is missing or empty.
    #[error("[Studio Client] missing required environment variable: {0}")]
    MissingVar(&'static str),

    /// A number failed to parse (like timeouts or line counts).
    #[error("[Studio Client] invalid number in {var}: {reason}")]
    InvalidNumber {
        /// Variable name (e.g., `RAG_STUDIO_TIMEOUT_SECS`).
        var: &'static str,
        /// Human-readable reason (e.g., `expected u64`).
        reason: &'static str,
    },

    /// Base URL had the wrong format (scheme, trailing slash).
    #[error("[Studio Client] invalid base URL in {var}: {reason}")]
    InvalidBaseUrl {
        /// Variable name (e.g., `RAG_STUDIO_URL`).
        var: &'static str,
        /// Explanation (e.g., `must not end with a trailing slash`).
        reason: &'static str,
    },

    /// A call path did not start with `/`. Rejected before any request.
    #[error("[Studio Client] call path must start with '/': {0:?}")]
    InvalidCallPath(String),
}

/* ------------------------------------------------------------------------- */
/* API errors                                                                */
/* ------------------------------------------------------------------------- */

/// Error enum for failures reported by the remote studio/inference API.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum ApiError {
    /// Upstream returned a non-successful HTTP status.
    #[error("[Studio Client] HTTP {status} from {url}: {snippet}")]
    HttpStatus {
        /// Numeric HTTP status code.
        status: StatusCode,
        /// Request URL.
        url: String,
        /// Short snippet of the response body (trimmed).
        snippet: String,
    },

    /// Response payload could not be decoded as expected.
    #[error("[Studio Client] decode error: {0}")]
    Decode(String),

    /// A completion response carried no choices.
    #[error("[Studio Client] response contained no choices")]
    EmptyChoices,
}

/* ------------------------------------------------------------------------- */
/* Env helpers (return unified `Result<T>`)                                  */
/* ------------------------------------------------------------------------- */

/// Fetches a required, non-empty environment variable.
///
/// # Errors
/// Returns [`StudioClientError::Config`] with [`ConfigError::MissingVar`] if
/// the variable is absent or empty.
pub fn must_env(name: &'static str) -> Result<String> {
    match std::env::var(name) {
        Ok(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(ConfigError::MissingVar(name).into()),
    }
}

/// Parses an optional `u64` from env (`Ok(None)` if unset/empty).
///
/// # Errors
/// Returns [`StudioClientError::Config`] with [`ConfigError::InvalidNumber`]
/// if the variable is set but not a valid `u64`.
pub fn env_opt_u64(name: &'static str) -> Result<Option<u64>> {
    match std::env::var(name) {
        Ok(v) if !v.trim().is_empty() => v.parse::<u64>().map(Some).map_err(|_| {
            StudioClientError::from(ConfigError::InvalidNumber {
                var: name,
                reason: "expected u64",
            })
        }),
        _ => Ok(None),
    }
}

/* ------------------------------------------------------------------------- */
/* Validation helpers (return unified `Result<T>`)                           */
/* ------------------------------------------------------------------------- */

/// Validates the API base URL: http(s) scheme and no trailing slash.
///
/// The trailing-slash rule is strict on purpose: call paths always start
/// with `/`, so a slash-terminated base would silently produce `//` URLs.
///
/// # Errors
/// Returns [`StudioClientError::Config`] with [`ConfigError::InvalidBaseUrl`]
/// when the string has the wrong scheme or ends with `/`.
pub fn validate_base_url(var: &'static str, value: &str) -> Result<()> {
    let trimmed = value.trim();
    if !(trimmed.starts_with("http://") || trimmed.starts_with("https://")) {
        return Err(ConfigError::InvalidBaseUrl {
            var,
            reason: "must start with http:// or https://",
        }
        .into());
    }
    if trimmed.ends_with('/') {
        return Err(ConfigError::InvalidBaseUrl {
            var,
            reason: "must not end with a trailing slash",
        }
        .into());
    }
    Ok(())
}

/// Validates that a call path is server-relative (starts with `/`).
///
/// # Errors
/// Returns [`StudioClientError::Config`] with [`ConfigError::InvalidCallPath`]
/// otherwise. Nothing is sent when this fails.
pub fn validate_call_path(path: &str) -> Result<()> {
    if path.starts_with('/') {
        Ok(())
    } else {
        Err(ConfigError::InvalidCallPath(path.to_string()).into())
    }
}

/// Produces a short, single-line snippet of a response body for error
/// messages and logs.
pub fn make_snippet(body: &str) -> String {
    const MAX: usize = 240;
    let one_line: String = body.split_whitespace().collect::<Vec<_>>().join(" ");
    if one_line.chars().count() > MAX {
        let head: String = one_line.chars().take(MAX).collect();
        format!("{head}…")
    } else {
        one_line
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_rules() {
        assert!(validate_base_url("X", "http://localhost:8000").is_ok());
        assert!(validate_base_url("X", "https://studio.example.com").is_ok());
        assert!(validate_base_url("X", "ftp://studio.example.com").is_err());
        assert!(validate_base_url("X", "https://studio.example.com/").is_err());
    }

    #[test]
    fn call_path_must_be_relative() {
        assert!(validate_call_path("/api/data").is_ok());
        let err = validate_call_path("api/data").unwrap_err();
        assert!(matches!(
            err,
            StudioClientError::Config(ConfigError::InvalidCallPath(_))
        ));
    }

    #[test]
    fn snippet_is_single_line_and_bounded() {
        let body = "line one\nline two\t\tend";
        assert_eq!(make_snippet(body), "line one line two end");
        let long = "x".repeat(1000);
        assert!(make_snippet(&long).chars().count() <= 241);
    }
}
