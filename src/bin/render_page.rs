//! Offline preview: render a stored payload file to HTML on stdout.
//!
//! Usage: `render_page <payload.json> [date]`

use anyhow::{Context, Result};
use newslite::config::NewsliteConfig;
use newslite::page::{groups_from_payload, LATEST_LABEL};
use newslite::render::{render_groups, wrap_document};

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let mut args = std::env::args().skip(1);
    let path = args
        .next()
        .context("usage: render_page <payload.json> [date]")?;
    let label = args.next().unwrap_or_else(|| LATEST_LABEL.to_string());

    let _ = dotenvy::dotenv();
    let cfg = NewsliteConfig::load()?;

    let raw = std::fs::read_to_string(&path).with_context(|| format!("reading {path}"))?;
    let groups = groups_from_payload(&raw);
    tracing::info!(groups = groups.len(), %label, "rendering preview");

    let inner = render_groups(&cfg.site.title, &label, &groups);
    println!("{}", wrap_document(&cfg.site, &inner));
    Ok(())
}
