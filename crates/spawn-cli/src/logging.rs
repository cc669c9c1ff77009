//! Subscriber setup shared by the binaries.

use anyhow::Result;
use std::env;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const DEFAULT_DIRECTIVES: &str = "spawn_core=info,spawn_cli=info";

/// Install a formatted subscriber filtered by `RUST_LOG`, falling back to
/// info level for the spawn crates. `SPAWN_LOG_FORMAT=json` switches to
/// JSON lines.
pub fn init() -> Result<()> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVES));
    let json = env::var("SPAWN_LOG_FORMAT").is_ok_and(|format| format == "json");

    tracing_subscriber::registry()
        .with(filter)
        .with(json.then(|| tracing_subscriber::fmt::layer().json()))
        .with((!json).then(tracing_subscriber::fmt::layer))
        .try_init()?;
    Ok(())
}
