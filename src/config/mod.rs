// src/config/mod.rs
//! Service configuration: TOML file with environment overrides.
//!
//! Resolution order:
//! 1) `$NEWSLITE_CONFIG_PATH`, else `config/newslite.toml` (missing file = defaults)
//! 2) env overrides (`NEWSLITE_*`, `CLOUDFLARE_*`)

use anyhow::{anyhow, bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::{env, fs, path::PathBuf};

pub const DEFAULT_CONFIG_PATH: &str = "config/newslite.toml";
pub const ENV_CONFIG_PATH: &str = "NEWSLITE_CONFIG_PATH";

pub const DEFAULT_STYLESHEET_URL: &str =
    "https://cdn.jsdelivr.net/npm/bootstrap@5.3.3/dist/css/bootstrap.min.css";
pub const DEFAULT_CLOUDFLARE_API_BASE: &str = "https://api.cloudflare.com/client/v4";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewsliteConfig {
    #[serde(default)]
    pub site: SiteConfig,
    #[serde(default)]
    pub articles: ArticlesConfig,
    #[serde(default)]
    pub store: StoreConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteConfig {
    #[serde(default = "default_title")]
    pub title: String,
    #[serde(default = "default_stylesheet_url")]
    pub stylesheet_url: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: default_title(),
            stylesheet_url: default_stylesheet_url(),
        }
    }
}

/// What to do when a request carries no `date`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MissingDate {
    /// Read the fixed "latest" key.
    #[default]
    Latest,
    /// Render a page asking for `?date=YYYY-MM-DD`.
    Prompt,
}

impl std::str::FromStr for MissingDate {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "latest" => Ok(Self::Latest),
            "prompt" => Ok(Self::Prompt),
            other => bail!("unsupported missing_date policy: {other}"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArticlesConfig {
    #[serde(default = "default_key_prefix")]
    pub key_prefix: String,
    #[serde(default = "default_latest_key")]
    pub latest_key: String,
    #[serde(default)]
    pub missing_date: MissingDate,
}

impl Default for ArticlesConfig {
    fn default() -> Self {
        Self {
            key_prefix: default_key_prefix(),
            latest_key: default_latest_key(),
            missing_date: MissingDate::default(),
        }
    }
}

impl ArticlesConfig {
    pub fn key_for_date(&self, date: &str) -> String {
        format!("{}{}", self.key_prefix, date)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    #[default]
    Memory,
    File,
    Cloudflare,
}

impl std::str::FromStr for StoreBackend {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "memory" => Ok(Self::Memory),
            "file" => Ok(Self::File),
            "cloudflare" => Ok(Self::Cloudflare),
            other => bail!("unsupported store backend: {other}"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    #[serde(default)]
    pub backend: StoreBackend,
    /// Root directory for the `file` backend.
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
    /// JSON object (key -> string value) preloaded into the `memory` backend.
    #[serde(default)]
    pub seed_path: Option<PathBuf>,
    #[serde(default)]
    pub cloudflare: CloudflareConfig,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            backend: StoreBackend::default(),
            data_dir: default_data_dir(),
            seed_path: None,
            cloudflare: CloudflareConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CloudflareConfig {
    #[serde(default)]
    pub account_id: String,
    #[serde(default)]
    pub namespace_id: String,
    /// "ENV" means: read from CLOUDFLARE_API_TOKEN
    #[serde(default)]
    pub api_token: String,
    #[serde(default = "default_cloudflare_base")]
    pub base_url: String,
    /// Unset means no client-side timeout.
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

impl Default for CloudflareConfig {
    fn default() -> Self {
        Self {
            account_id: String::new(),
            namespace_id: String::new(),
            api_token: String::new(),
            base_url: default_cloudflare_base(),
            timeout_secs: None,
        }
    }
}

fn default_title() -> String {
    "NewsLite".to_string()
}
fn default_stylesheet_url() -> String {
    DEFAULT_STYLESHEET_URL.to_string()
}
fn default_key_prefix() -> String {
    "articles/".to_string()
}
fn default_latest_key() -> String {
    "articles/latest".to_string()
}
fn default_data_dir() -> PathBuf {
    PathBuf::from("data")
}
fn default_cloudflare_base() -> String {
    DEFAULT_CLOUDFLARE_API_BASE.to_string()
}

impl NewsliteConfig {
    /// Load using `$NEWSLITE_CONFIG_PATH` (or the default path) and apply env overrides.
    pub fn load() -> Result<Self> {
        let path = env::var(ENV_CONFIG_PATH)
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_CONFIG_PATH));

        let mut cfg = if path.exists() {
            let content = fs::read_to_string(&path)
                .with_context(|| format!("reading config from {}", path.display()))?;
            Self::from_toml_str(&content)
                .with_context(|| format!("parsing config at {}", path.display()))?
        } else {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            Self::default()
        };

        cfg.apply_env()?;
        Ok(cfg)
    }

    pub fn from_toml_str(s: &str) -> Result<Self> {
        Ok(toml::from_str(s)?)
    }

    /// Apply `NEWSLITE_*` / `CLOUDFLARE_*` overrides and resolve `api_token = "ENV"`.
    pub fn apply_env(&mut self) -> Result<()> {
        if let Some(v) = env_nonempty("NEWSLITE_STORE") {
            self.store.backend = v.parse()?;
        }
        if let Some(v) = env_nonempty("NEWSLITE_DATA_DIR") {
            self.store.data_dir = PathBuf::from(v);
        }
        if let Some(v) = env_nonempty("NEWSLITE_SEED_PATH") {
            self.store.seed_path = Some(PathBuf::from(v));
        }
        if let Some(v) = env_nonempty("NEWSLITE_MISSING_DATE") {
            self.articles.missing_date = v.parse()?;
        }
        if let Some(v) = env_nonempty("NEWSLITE_STYLESHEET_URL") {
            self.site.stylesheet_url = v;
        }

        let cf = &mut self.store.cloudflare;
        if let Some(v) = env_nonempty("CLOUDFLARE_ACCOUNT_ID") {
            cf.account_id = v;
        }
        if let Some(v) = env_nonempty("CLOUDFLARE_KV_NAMESPACE_ID") {
            cf.namespace_id = v;
        }
        if cf.api_token.trim().eq_ignore_ascii_case("env") || cf.api_token.is_empty() {
            match env_nonempty("CLOUDFLARE_API_TOKEN") {
                Some(token) => cf.api_token = token,
                None if self.store.backend == StoreBackend::Cloudflare => {
                    return Err(anyhow!("Missing CLOUDFLARE_API_TOKEN env var"));
                }
                None => {}
            }
        }

        Ok(())
    }
}

fn env_nonempty(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.trim().is_empty())
}
