//! Tracing setup shared by the console binaries.
//!
//! The console prints panels to stdout, so log output goes to **stderr** and
//! stays compact: RFC3339 UTC timestamps, single-line events, ANSI only when
//! stderr is a terminal. A per-crate directive keeps `studio_client` logs at
//! DEBUG while everything else follows `RUST_LOG` (or the given default).

use std::io::{self, IsTerminal};
use std::str::FromStr;

use tracing::Level;
use tracing_subscriber::filter::Directive;
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::time::FormatTime;
use tracing_subscriber::{EnvFilter, fmt};

/// Crate target prefix used in per-crate filter directives.
pub const TARGET_PREFIX: &str = "studio_client";

/// RFC3339 UTC timer implemented via `chrono` (no extra features).
/// Example output: `2025-09-12T10:20:30Z`
#[derive(Clone, Debug, Default)]
struct ChronoRfc3339Utc;

impl FormatTime for ChronoRfc3339Utc {
    fn format_time(&self, w: &mut Writer<'_>) -> std::fmt::Result {
        let now = chrono::Utc::now();
        // Compact timestamps: no fractional seconds, Z-suffix
        let s = now.to_rfc3339_opts(chrono::SecondsFormat::Secs, true);
        w.write_str(&s)
    }
}

/// Builds a level directive scoped to **this** library only.
///
/// Example:
/// `EnvFilter::new("info").add_directive(level_directive(Level::DEBUG))`
pub fn level_directive(level: Level) -> Directive {
    // Renders like `studio_client=debug`
    let s = format!("{TARGET_PREFIX}={}", level.as_str().to_lowercase());
    Directive::from_str(&s).expect("valid level directive")
}

/// Creates an `EnvFilter` from `RUST_LOG` (or the fallback default), then
/// raises this library to the given level.
pub fn env_filter_with_level(default: &str, level: Level) -> EnvFilter {
    let base = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    base.add_directive(level_directive(level))
}

/// Installs the global subscriber used by the console binaries.
///
/// Idempotence is not required here: the binaries call this exactly once at
/// startup, before any panel is rendered.
///
/// # Panics
/// Panics if a global subscriber was already installed.
pub fn init_console_subscriber(default: &str) {
    let use_ansi = io::stderr().is_terminal();

    fmt()
        .with_env_filter(env_filter_with_level(default, Level::DEBUG))
        .with_timer(ChronoRfc3339Utc)
        .with_target(true)
        .with_ansi(use_ansi)
        .with_writer(io::stderr)
        .compact()
        .init();
}
