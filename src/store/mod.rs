// src/store/mod.rs
pub mod cloudflare;
pub mod file;
pub mod memory;

use std::sync::Arc;

use anyhow::Result;

use crate::config::{StoreBackend, StoreConfig};

pub use cloudflare::CloudflareKvStore;
pub use file::FileStore;
pub use memory::MemoryStore;

/// Read-only view of a key-value store. The write path lives elsewhere.
#[async_trait::async_trait]
pub trait KvStore: Send + Sync {
    /// `Ok(None)` when the key has no value.
    async fn get(&self, key: &str) -> Result<Option<String>>;
    fn name(&self) -> &'static str;
}

pub type DynKvStore = Arc<dyn KvStore>;

/// Build the backend selected in config.
pub fn build_store(cfg: &StoreConfig) -> Result<DynKvStore> {
    let store: DynKvStore = match cfg.backend {
        StoreBackend::Memory => match &cfg.seed_path {
            Some(path) => Arc::new(MemoryStore::from_seed_file(path)?),
            None => Arc::new(MemoryStore::new()),
        },
        StoreBackend::File => Arc::new(FileStore::new(&cfg.data_dir)),
        StoreBackend::Cloudflare => Arc::new(CloudflareKvStore::from_config(&cfg.cloudflare)?),
    };
    tracing::info!(backend = store.name(), "key-value store ready");
    Ok(store)
}
