// src/store/cloudflare.rs
//! Read-only client for the Cloudflare Workers KV REST API.
//!
//! `GET {base}/accounts/{account}/storage/kv/namespaces/{namespace}/values/{key}`
//! returns the raw stored value; 404 means the key is unset.

use anyhow::{anyhow, bail, Context, Result};
use reqwest::{Client, StatusCode, Url};
use std::time::Duration;

use super::KvStore;
use crate::config::CloudflareConfig;

#[derive(Clone)]
pub struct CloudflareKvStore {
    client: Client,
    base: Url,
    account_id: String,
    namespace_id: String,
    api_token: String,
    timeout: Option<Duration>,
}

impl CloudflareKvStore {
    pub fn new(
        base_url: &str,
        account_id: impl Into<String>,
        namespace_id: impl Into<String>,
        api_token: impl Into<String>,
    ) -> Result<Self> {
        let base = Url::parse(base_url)
            .with_context(|| format!("invalid Cloudflare API base url: {base_url}"))?;
        if base.cannot_be_a_base() {
            bail!("Cloudflare API base url cannot be a base: {base_url}");
        }
        Ok(Self {
            client: Client::new(),
            base,
            account_id: account_id.into(),
            namespace_id: namespace_id.into(),
            api_token: api_token.into(),
            timeout: None,
        })
    }

    pub fn from_config(cfg: &CloudflareConfig) -> Result<Self> {
        if cfg.account_id.is_empty() || cfg.namespace_id.is_empty() {
            bail!("cloudflare store needs account_id and namespace_id");
        }
        if cfg.api_token.is_empty() {
            bail!("cloudflare store needs an api_token");
        }
        let mut store = Self::new(&cfg.base_url, &cfg.account_id, &cfg.namespace_id, &cfg.api_token)?;
        if let Some(secs) = cfg.timeout_secs {
            store = store.with_timeout(Duration::from_secs(secs));
        }
        Ok(store)
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Value URL for `key`. The key is pushed as a single, percent-encoded
    /// path segment, so `articles/2024-01-01` becomes `articles%2F2024-01-01`.
    pub fn value_url(&self, key: &str) -> Result<Url> {
        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|_| anyhow!("Cloudflare API base url cannot be a base"))?
            .pop_if_empty()
            .extend([
                "accounts",
                self.account_id.as_str(),
                "storage",
                "kv",
                "namespaces",
                self.namespace_id.as_str(),
                "values",
                key,
            ]);
        Ok(url)
    }
}

#[async_trait::async_trait]
impl KvStore for CloudflareKvStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        let url = self.value_url(key)?;

        let mut req = self.client.get(url).bearer_auth(&self.api_token);
        if let Some(t) = self.timeout {
            req = req.timeout(t);
        }

        let rsp = req
            .send()
            .await
            .map_err(|e| anyhow!("Cloudflare KV request failed: {e}"))?;

        match rsp.status() {
            StatusCode::NOT_FOUND => Ok(None),
            s if s.is_success() => {
                let body = rsp
                    .text()
                    .await
                    .map_err(|e| anyhow!("Cloudflare KV body read failed: {e}"))?;
                Ok(Some(body))
            }
            s => Err(anyhow!("Cloudflare KV HTTP error: {s} for key `{key}`")),
        }
    }

    fn name(&self) -> &'static str {
        "cloudflare"
    }
}
