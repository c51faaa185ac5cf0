// src/store/file.rs
//! Directory-backed store: key `articles/2024-01-01` lives at
//! `<root>/articles/2024-01-01.json`.

use anyhow::{Context, Result};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use super::KvStore;

#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Map a key to its file. `None` for keys that could leave the root.
    pub fn path_for(&self, key: &str) -> Option<PathBuf> {
        if key.is_empty() || key.starts_with('/') || key.contains('\\') || key.contains('\0') {
            return None;
        }
        let mut path = self.root.clone();
        for segment in key.split('/') {
            if segment.is_empty() || segment == "." || segment == ".." {
                return None;
            }
            path.push(segment);
        }
        let mut file = path.into_os_string();
        file.push(".json");
        Some(PathBuf::from(file))
    }
}

#[async_trait::async_trait]
impl KvStore for FileStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        let Some(path) = self.path_for(key) else {
            tracing::warn!(key, root = %self.root().display(), "rejected key outside file store root");
            return Ok(None);
        };

        match tokio::fs::read_to_string(&path).await {
            Ok(s) => Ok(Some(s)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e).with_context(|| format!("reading {}", path.display())),
        }
    }

    fn name(&self) -> &'static str {
        "file"
    }
}
