//! Shared console shell: owns the configuration snapshot and the
//! commit-then-reload write path.
//!
//! Only the shell ever overwrites the snapshot, and only by refetching the
//! whole thing from the server — child panels keep private drafts and never
//! merge locally. A failed initial load leaves the zero-value snapshot in
//! place so every panel still renders (empty) instead of crashing the
//! session.

use std::sync::Arc;

use console_state::{BusyGuard, BusySink};
use serde::Serialize;
use studio_client::{
    ApiEnvelope, AppSnapshot, ConsoleConfig, StudioClientError, StudioService,
};
use tracing::error;

use crate::console::render;

pub struct ConsoleShell {
    pub studio: StudioService,
    pub snapshot: AppSnapshot,
    busy: Arc<dyn BusySink>,
}

impl ConsoleShell {
    /// Builds the services and performs the initial snapshot load.
    ///
    /// Construction only fails on local misconfiguration; a server that is
    /// down yields an alert and the zero-value snapshot.
    pub async fn connect(
        cfg: &ConsoleConfig,
        busy: Arc<dyn BusySink>,
    ) -> Result<Self, StudioClientError> {
        let env = ApiEnvelope::new(cfg)?;
        let mut shell = Self {
            studio: StudioService::new(env),
            snapshot: AppSnapshot::default(),
            busy,
        };

        if shell.reload().await {
            render::title(&shell.snapshot);
        }
        Ok(shell)
    }

    /// Busy indicator for any in-flight request driven from a panel.
    pub fn busy_guard(&self) -> BusyGuard<'_> {
        BusyGuard::new(self.busy.as_ref())
    }

    /// Refetches the snapshot. On failure the previous (possibly zero-value)
    /// snapshot stays authoritative and the operator is alerted.
    pub async fn reload(&mut self) -> bool {
        let _busy = BusyGuard::new(self.busy.as_ref());
        match self.studio.fetch_snapshot().await {
            Ok(snapshot) => {
                self.snapshot = snapshot;
                true
            }
            Err(e) => {
                error!(error = %e, "configuration fetch failed");
                render::alert(&format!("Error fetching initial data: {e}"));
                false
            }
        }
    }

    /// Commits one setting: report-then-swallow POST, and on success a full
    /// snapshot reload so the UI never trusts locally reconstructed state.
    /// Returns whether the commit (including the reload) went through.
    pub async fn commit<B: Serialize>(&mut self, path: &str, body: &B) -> bool {
        let committed = {
            let _busy = self.busy_guard();
            self.studio
                .envelope()
                .call::<serde_json::Value, _>(path, body)
                .await
                .is_some()
        };
        if !committed {
            return false;
        }
        self.reload().await
    }

    /// Applies the report-then-swallow policy to a typed service result:
    /// failures are logged, alerted, and collapsed to `None`.
    pub fn report<T>(&self, result: Result<T, StudioClientError>) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(e) => {
                error!(error = %e, "request failed");
                render::alert(&e.to_string());
                None
            }
        }
    }
}
