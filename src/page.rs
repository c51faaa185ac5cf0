// src/page.rs
//! Request handler core: date -> store key -> stored payload -> topic groups -> HTML.
//!
//! Errors from the store are returned to the caller; the HTTP layer owns the
//! 500 guard. A malformed payload is not an error here (see `decode_articles`).

use std::sync::Arc;
use std::time::Instant;

use anyhow::{Context, Result};
use metrics::{counter, histogram};
use tracing::{debug, info};

use crate::article::decode_articles;
use crate::config::{MissingDate, NewsliteConfig};
use crate::grouping::{group_by_topic, TopicGroup};
use crate::render;
use crate::store::DynKvStore;

/// Label used in headings when the "latest" key is read.
pub const LATEST_LABEL: &str = "latest";

const PREVIEW_CHARS: usize = 200;

#[derive(Clone)]
pub struct AppState {
    pub store: DynKvStore,
    pub config: Arc<NewsliteConfig>,
}

impl AppState {
    pub fn new(store: DynKvStore, config: NewsliteConfig) -> Self {
        Self {
            store,
            config: Arc::new(config),
        }
    }
}

/// Which stored value (if any) a request maps to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Lookup {
    /// Read `key`; `label` is what the page calls it.
    Key { key: String, label: String },
    /// No date and the service asks for one.
    Prompt,
}

/// Resolve the optional `date` parameter. An empty value counts as absent;
/// the date itself is not validated.
pub fn resolve_lookup(cfg: &NewsliteConfig, date: Option<&str>) -> Lookup {
    match date.filter(|d| !d.is_empty()) {
        Some(d) => Lookup::Key {
            key: cfg.articles.key_for_date(d),
            label: d.to_string(),
        },
        None => match cfg.articles.missing_date {
            MissingDate::Latest => Lookup::Key {
                key: cfg.articles.latest_key.clone(),
                label: LATEST_LABEL.to_string(),
            },
            MissingDate::Prompt => Lookup::Prompt,
        },
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageOutcome {
    Prompt,
    NoData { key: String },
    Articles { groups: usize, articles: usize },
}

impl PageOutcome {
    pub fn as_label(&self) -> &'static str {
        match self {
            PageOutcome::Prompt => "prompt",
            PageOutcome::NoData { .. } => "no_data",
            PageOutcome::Articles { .. } => "articles",
        }
    }
}

#[derive(Debug, Clone)]
pub struct Page {
    pub outcome: PageOutcome,
    pub html: String,
}

/// Build the full HTML page for `date`. One store read at most, no retry.
pub async fn build_page(state: &AppState, date: Option<&str>) -> Result<Page> {
    let t0 = Instant::now();
    let cfg = state.config.as_ref();

    let (outcome, inner) = match resolve_lookup(cfg, date) {
        Lookup::Prompt => (PageOutcome::Prompt, render::render_prompt()),
        Lookup::Key { key, label } => {
            let raw = state
                .store
                .get(&key)
                .await
                .inspect_err(|_| counter!("newslite_store_errors_total").increment(1))
                .with_context(|| format!("reading `{key}` from {} store", state.store.name()))?;

            // an empty stored value reads as "no data", same as a missing key
            match raw.filter(|r| !r.is_empty()) {
                None => {
                    let html = render::render_no_data(&label);
                    (PageOutcome::NoData { key }, html)
                }
                Some(raw) => {
                    debug!(
                        target: "newslite::payload",
                        %key,
                        bytes = raw.len(),
                        preview = %preview(&raw, PREVIEW_CHARS),
                        "raw stored value"
                    );
                    let articles = decode_articles(&raw);
                    let total = articles.len();
                    let groups = group_by_topic(articles);
                    let html = render::render_groups(&cfg.site.title, &label, &groups);
                    (
                        PageOutcome::Articles {
                            groups: groups.len(),
                            articles: total,
                        },
                        html,
                    )
                }
            }
        }
    };

    let html = render::wrap_document(&cfg.site, &inner);

    let ms = t0.elapsed().as_secs_f64() * 1_000.0;
    histogram!("newslite_page_render_ms").record(ms);
    counter!("newslite_page_requests_total", "outcome" => outcome.as_label()).increment(1);
    info!(outcome = outcome.as_label(), ms, "page built");

    Ok(Page { outcome, html })
}

/// Group articles without rendering; used by callers that only need the structure.
pub fn groups_from_payload(raw: &str) -> Vec<TopicGroup> {
    group_by_topic(decode_articles(raw))
}

fn preview(s: &str, max: usize) -> String {
    let mut out: String = s.chars().take(max).collect();
    if s.chars().nth(max).is_some() {
        out.push('…');
    }
    out
}
