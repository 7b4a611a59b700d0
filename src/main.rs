mod console;

use anyhow::bail;
use studio_client::{ConsoleConfig, telemetry};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Pick up RAG_STUDIO_* variables from a local .env when present.
    dotenvy::dotenv().ok();

    telemetry::init_console_subscriber("info");

    let mode = std::env::args().nth(1).unwrap_or_else(|| "builder".to_string());
    let cfg = ConsoleConfig::from_env()?;

    match mode.as_str() {
        "builder" => console::builder::run(cfg).await,
        "runner" => console::runner::run(cfg).await,
        other => bail!("unknown mode {other:?} (expected `builder` or `runner`)"),
    }
}
