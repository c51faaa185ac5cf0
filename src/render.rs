// src/render.rs
//! HTML rendering for the article page: topic sections, article cards, and
//! the Bootstrap document wrapper.
//!
//! All interpolated values go through `html-escape`; attribute values use
//! the double-quoted attribute encoder.

use std::fmt::Write as _;

use html_escape::{encode_double_quoted_attribute, encode_text};

use crate::article::Article;
use crate::config::SiteConfig;
use crate::grouping::TopicGroup;

/// Page heading followed by one section per topic group.
pub fn render_groups(title: &str, label: &str, groups: &[TopicGroup]) -> String {
    let mut html = format!(
        r#"<h1 class="mb-4">{} — {}</h1>"#,
        encode_text(title),
        encode_text(label)
    );

    for group in groups {
        let _ = write!(
            html,
            r#"
      <section class="mb-5">
        <h2 class="mb-3 text-primary text-capitalize">{}</h2>
        <div class="row g-4">{}
        </div>
      </section>"#,
            encode_text(&group.topic),
            group
                .articles
                .iter()
                .map(render_article_card)
                .collect::<String>()
        );
    }

    html
}

pub fn render_article_card(article: &Article) -> String {
    let media = match article.audio_src() {
        Some(src) => format!(
            r#"<audio controls class="w-100 mt-2">
                <source src="{}" type="audio/mpeg">
              </audio>"#,
            encode_double_quoted_attribute(src)
        ),
        None => r#"<span class="text-muted">No audio available</span>"#.to_string(),
    };

    format!(
        r#"
          <div class="col-12 col-md-6 col-lg-4">
            <div class="card shadow-sm h-100">
              <div class="card-body d-flex flex-column">
                <h5 class="card-title"><a href="{url}" target="_blank">{title}</a></h5>
                <p class="card-text flex-grow-1">{summary}</p>
                {media}
              </div>
            </div>
          </div>"#,
        url = encode_double_quoted_attribute(&article.url),
        title = encode_text(&article.title),
        summary = encode_text(&article.summary),
    )
}

/// Shown when no `date` was given and the service is configured to ask for one.
pub fn render_prompt() -> String {
    "<h2>Please specify ?date=YYYY-MM-DD</h2>".to_string()
}

pub fn render_no_data(label: &str) -> String {
    format!("<h2>No data found for {}</h2>", encode_text(label))
}

/// Full HTML document around `inner`.
pub fn wrap_document(site: &SiteConfig, inner: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <title>{title}</title>
  <link href="{stylesheet}" rel="stylesheet" />
  <meta name="viewport" content="width=device-width, initial-scale=1" />
  <style>
    body {{ padding: 20px; }}
    a {{ text-decoration: none; }}
    a:hover {{ text-decoration: underline; }}
  </style>
</head>
<body>
  <div class="container">
    {inner}
  </div>
</body>
</html>
"#,
        title = encode_text(&site.title),
        stylesheet = encode_double_quoted_attribute(&site.stylesheet_url),
    )
}
