//! JSON remote-call envelope shared by both API services.
//!
//! Two calling conventions exist on purpose:
//!
//! - the strict methods ([`ApiEnvelope::get_json`], [`ApiEnvelope::post_json`],
//!   [`ApiEnvelope::post_multipart`]) return the unified [`Result`] and are
//!   what the typed services build on;
//! - [`ApiEnvelope::call`] / [`ApiEnvelope::call_with`] implement the
//!   console's report-then-swallow policy: any failure is handed to the
//!   caller-supplied error callback, surfaced through the alert sink, logged,
//!   and turned into `None`. Callers must treat `None` as failure.
//!
//! Call paths must be server-relative (`/...`); anything else is rejected
//! before a request is built.

use std::sync::Arc;
use std::time::{Duration, Instant};

use colored::Colorize;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, error};

use crate::config::ConsoleConfig;
use crate::error_handler::{
    ApiError, Result, StudioClientError, make_snippet, validate_base_url, validate_call_path,
};

/// User-visible alert channel. The default sink paints the detail red on
/// stderr, which is the console analog of a blocking alert dialog.
pub type AlertSink = Arc<dyn Fn(&str) + Send + Sync>;

fn default_alert_sink() -> AlertSink {
    Arc::new(|detail: &str| {
        eprintln!("{} {}", "ALERT:".red().bold(), detail.red());
    })
}

/// Preconfigured HTTP envelope for one API host.
#[derive(Clone)]
pub struct ApiEnvelope {
    http: reqwest::Client,
    base: String,
    alert: AlertSink,
}

impl std::fmt::Debug for ApiEnvelope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiEnvelope")
            .field("base", &self.base)
            .finish_non_exhaustive()
    }
}

impl ApiEnvelope {
    /// Builds the envelope from config: re-validates the base URL and
    /// constructs one `reqwest::Client` with the configured timeout.
    ///
    /// # Errors
    /// - [`crate::error_handler::ConfigError::InvalidBaseUrl`] on a bad base URL
    /// - [`StudioClientError::HttpTransport`] if the HTTP client cannot be built
    pub fn new(cfg: &ConsoleConfig) -> Result<Self> {
        validate_base_url("RAG_STUDIO_URL", &cfg.base_url)?;

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(cfg.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base: cfg.base_url.clone(),
            alert: default_alert_sink(),
        })
    }

    /// Replaces the alert sink (tests, alternative frontends).
    pub fn with_alert(mut self, alert: AlertSink) -> Self {
        self.alert = alert;
        self
    }

    /// The configured base URL (scheme included, no trailing slash).
    pub fn base(&self) -> &str {
        &self.base
    }

    fn url_for(&self, path: &str) -> Result<String> {
        validate_call_path(path)?;
        Ok(format!("{}{}", self.base, path))
    }

    /// `GET {base}{path}`, decoding the JSON response.
    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = self.url_for(path)?;
        let started = Instant::now();
        debug!("GET {url}");
        let resp = self.http.get(&url).send().await?;
        self.decode(resp, url, started).await
    }

    /// `POST {base}{path}` with a JSON body, decoding the JSON response.
    pub async fn post_json<T, B>(&self, path: &str, body: &B) -> Result<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let url = self.url_for(path)?;
        let started = Instant::now();
        debug!("POST {url}");
        let resp = self.http.post(&url).json(body).send().await?;
        self.decode(resp, url, started).await
    }

    /// `POST {base}{path}` with a multipart form (file uploads).
    pub async fn post_multipart<T: DeserializeOwned>(
        &self,
        path: &str,
        form: reqwest::multipart::Form,
    ) -> Result<T> {
        let url = self.url_for(path)?;
        let started = Instant::now();
        debug!("POST (multipart) {url}");
        let resp = self.http.post(&url).multipart(form).send().await?;
        self.decode(resp, url, started).await
    }

    /// Report-then-swallow POST with the default (no-op) error callback.
    pub async fn call<T, B>(&self, path: &str, body: &B) -> Option<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.call_with(path, body, |_| {}).await
    }

    /// Report-then-swallow POST.
    ///
    /// On failure the error callback runs exactly once, the alert sink shows
    /// the error detail, the error is logged, and `None` is returned. The
    /// error never propagates: the action it belonged to is over, and the
    /// operator decides whether to retry.
    pub async fn call_with<T, B, F>(&self, path: &str, body: &B, on_error: F) -> Option<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
        F: FnOnce(&StudioClientError),
    {
        match self.post_json(path, body).await {
            Ok(value) => Some(value),
            Err(e) => {
                on_error(&e);
                error!(path, error = %e, "remote call failed");
                (self.alert)(&e.to_string());
                None
            }
        }
    }

    async fn decode<T: DeserializeOwned>(
        &self,
        resp: reqwest::Response,
        url: String,
        started: Instant,
    ) -> Result<T> {
        let status = resp.status();
        let text = resp.text().await.unwrap_or_default();

        if !status.is_success() {
            let snippet = make_snippet(&text);
            error!(
                %status,
                %url,
                %snippet,
                latency_ms = started.elapsed().as_millis(),
                "request returned non-success status"
            );
            return Err(ApiError::HttpStatus {
                status,
                url,
                snippet,
            }
            .into());
        }

        match serde_json::from_str::<T>(&text) {
            Ok(value) => {
                debug!(%url, latency_ms = started.elapsed().as_millis(), "request completed");
                Ok(value)
            }
            Err(e) => {
                error!(
                    %url,
                    error = %e,
                    latency_ms = started.elapsed().as_millis(),
                    "failed to decode response body"
                );
                Err(ApiError::Decode(format!(
                    "serde error: {e}; body: {}",
                    make_snippet(&text)
                ))
                .into())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;
    use crate::error_handler::ConfigError;

    fn unroutable() -> ApiEnvelope {
        // Discard port: connections are refused immediately, no network needed.
        ApiEnvelope::new(&ConsoleConfig::with_base_url("http://127.0.0.1:9")).unwrap()
    }

    #[tokio::test]
    async fn relative_path_precondition_fails_before_any_request() {
        let env = unroutable();
        let err = env
            .post_json::<serde_json::Value, _>("api/data", &serde_json::json!({}))
            .await
            .unwrap_err();
        // A transport error would mean a request was attempted.
        assert!(matches!(
            err,
            StudioClientError::Config(ConfigError::InvalidCallPath(_))
        ));
    }

    #[tokio::test]
    async fn failing_call_reports_once_and_resolves_to_none() {
        let alerts = Arc::new(Mutex::new(Vec::<String>::new()));
        let sink_alerts = alerts.clone();
        let env = unroutable().with_alert(Arc::new(move |detail: &str| {
            sink_alerts.lock().unwrap().push(detail.to_string());
        }));

        let calls = AtomicUsize::new(0);
        let out: Option<serde_json::Value> = env
            .call_with("/api/update-app-name", &serde_json::json!({"app_name": "x"}), |_| {
                calls.fetch_add(1, Ordering::SeqCst);
            })
            .await;

        assert!(out.is_none());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(alerts.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn call_with_default_callback_swallows_errors() {
        let env = unroutable().with_alert(Arc::new(|_| {}));
        let out: Option<serde_json::Value> = env.call("/api/data", &serde_json::json!({})).await;
        assert!(out.is_none());
    }
}
