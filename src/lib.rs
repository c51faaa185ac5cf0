// src/lib.rs
// Public library surface for the binaries and integration tests.

pub mod api;
pub mod article;
pub mod config;
pub mod grouping;
pub mod metrics;
pub mod page;
pub mod render;
pub mod store;

// ---- Re-exports for stable public API ----
pub use crate::api::router;
pub use crate::article::{Article, OTHER_TOPIC};
pub use crate::config::NewsliteConfig;
pub use crate::grouping::{group_by_topic, TopicGroup};
pub use crate::page::{build_page, AppState};
pub use crate::store::{KvStore, MemoryStore};

use axum::Router;
use tracing::info;

/// Build the full application router from config on disk + env.
///
/// Mounts `/metrics` when the Prometheus recorder could be installed.
pub async fn app() -> anyhow::Result<Router> {
    let cfg = NewsliteConfig::load()?;
    let store = store::build_store(&cfg.store)?;
    info!(
        store = store.name(),
        missing_date = ?cfg.articles.missing_date,
        "newslite configured"
    );

    let mut router = api::router(AppState::new(store, cfg));
    if let Some(m) = metrics::Metrics::init() {
        router = router.merge(m.router());
    }
    Ok(router)
}
