// src/store/memory.rs
use anyhow::{Context, Result};
use std::collections::HashMap;
use std::path::Path;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use super::KvStore;

/// In-process store, used by tests and local demos.
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: RwLock<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a JSON object of `key -> value`. Non-string values are stored as
    /// their JSON text, so a seed file may inline article arrays directly.
    pub fn from_seed_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let data = std::fs::read_to_string(path)
            .with_context(|| format!("reading seed file {}", path.display()))?;
        let seed: HashMap<String, serde_json::Value> = serde_json::from_str(&data)
            .with_context(|| format!("parsing seed file {}", path.display()))?;

        let store = Self::new();
        for (k, v) in seed {
            let value = match v {
                serde_json::Value::String(s) => s,
                other => other.to_string(),
            };
            store.insert(k, value);
        }
        Ok(store)
    }

    pub fn with_entry(self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn insert(&self, key: impl Into<String>, value: impl Into<String>) {
        self.write().insert(key.into(), value.into());
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn read(&self) -> RwLockReadGuard<'_, HashMap<String, String>> {
        match self.inner.read() {
            Ok(g) => g,
            Err(poison) => poison.into_inner(),
        }
    }

    fn write(&self) -> RwLockWriteGuard<'_, HashMap<String, String>> {
        match self.inner.write() {
            Ok(g) => g,
            Err(poison) => poison.into_inner(),
        }
    }
}

#[async_trait::async_trait]
impl KvStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.read().get(key).cloned())
    }

    fn name(&self) -> &'static str {
        "memory"
    }
}
