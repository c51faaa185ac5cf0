//! NewsLite — Binary Entrypoint
//! Boots the Axum HTTP server on Shuttle with the configured key-value store.

use shuttle_axum::ShuttleAxum;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Enable tracing logs in development only.
/// Activation requires BOTH:
///   - dev environment (debug build OR SHUTTLE_ENV in {local, development, dev})
///   - NEWSLITE_DEV_LOG=1
/// NEWSLITE_LOG_JSON=1 switches the output to JSON lines.
fn enable_dev_tracing() {
    let dev_flag = std::env::var("NEWSLITE_DEV_LOG")
        .ok()
        .is_some_and(|v| v == "1");

    let is_dev_env = cfg!(debug_assertions)
        || matches!(
            std::env::var("SHUTTLE_ENV")
                .unwrap_or_default()
                .to_ascii_lowercase()
                .as_str(),
            "local" | "development" | "dev"
        );

    if !(dev_flag && is_dev_env) {
        return;
    }

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("newslite=debug,warn"));

    let json = std::env::var("NEWSLITE_LOG_JSON").ok().as_deref() == Some("1");
    let registry = tracing_subscriber::registry().with(filter);
    // Shuttle may already own the global subscriber; keep theirs in that case.
    let _ = if json {
        registry.with(fmt::layer().json()).try_init()
    } else {
        registry.with(fmt::layer().compact()).try_init()
    };
}

#[shuttle_runtime::main]
async fn axum() -> ShuttleAxum {
    // Load .env in local/dev; no-op in prod environments.
    let _ = dotenvy::dotenv();

    enable_dev_tracing();

    let router = newslite::app().await?;

    Ok(router.into())
}
