// src/article.rs
//! Article records as stored in the key-value store, plus payload decoding.
//!
//! The stored value is a JSON array of objects. Only the fields below are
//! read; anything else on the record is ignored.

use anyhow::{Context, Result};
use metrics::counter;
use serde::{Deserialize, Deserializer, Serialize};

/// Group key for articles without a usable topic.
pub const OTHER_TOPIC: &str = "other";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Article {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub title: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub url: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub summary: String,
    #[serde(default)]
    pub topic: Option<String>,
    /// Audio rendition of the article (mp3 URL), if one was produced.
    #[serde(default)]
    pub audio: Option<String>,
}

impl Article {
    /// Topic this article is grouped under. Blank or missing topics fall back
    /// to [`OTHER_TOPIC`]; anything else is used verbatim (case-sensitive).
    /// Whitespace-only counts as blank, so `"  "` never becomes a group of its own.
    pub fn topic_key(&self) -> &str {
        match self.topic.as_deref() {
            Some(t) if !t.trim().is_empty() => t,
            _ => OTHER_TOPIC,
        }
    }

    pub fn audio_src(&self) -> Option<&str> {
        self.audio.as_deref().filter(|a| !a.is_empty())
    }
}

fn null_as_empty<'de, D>(de: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(de)?.unwrap_or_default())
}

/// Strict decode: the payload must be a JSON array of article objects.
pub fn parse_articles(raw: &str) -> Result<Vec<Article>> {
    serde_json::from_str(raw).context("decoding article payload")
}

/// Lenient decode used by the page pipeline. A malformed payload becomes an
/// empty list; the failure is logged and counted but never returned.
pub fn decode_articles(raw: &str) -> Vec<Article> {
    match parse_articles(raw) {
        Ok(articles) => articles,
        Err(e) => {
            tracing::warn!(error = ?e, bytes = raw.len(), "malformed article payload, rendering empty list");
            counter!("newslite_payload_decode_errors_total").increment(1);
            Vec::new()
        }
    }
}
