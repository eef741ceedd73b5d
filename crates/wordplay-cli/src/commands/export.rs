//! The `wordplay export` command.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::Local;

use wordplay_core::statistics::BookStatistics;
use wordplay_report::html::write_html_report;
use wordplay_report::text::{default_export_file_name, ensure_txt_extension, write_text_report};

use super::AppContext;

pub fn execute(
    book: Option<String>,
    output: Option<PathBuf>,
    format: String,
    force: bool,
    config_path: Option<&Path>,
    data: Option<PathBuf>,
) -> Result<()> {
    let ctx = AppContext::open(config_path, data)?;
    let name = ctx.book_name(book.as_deref())?;
    let book = ctx
        .library
        .get(&name)
        .with_context(|| format!("word book not found: {name}"))?;
    let stats = BookStatistics::compute(book, &ctx.config.thresholds());
    let now = Local::now();
    let default_path = || PathBuf::from(default_export_file_name(&name, now));

    let path = match format.as_str() {
        "text" | "txt" => {
            let path = output.map_or_else(default_path, |p| ensure_txt_extension(&p));
            write_text_report(&stats, now, &path, force)?;
            path
        }
        "html" => {
            let path = output.unwrap_or_else(|| default_path().with_extension("html"));
            write_html_report(&stats, now, &path, force)?;
            path
        }
        other => anyhow::bail!("unknown export format: {other} (expected text or html)"),
    };

    tracing::info!(path = %path.display(), "statistics exported");
    println!("Statistics exported to {}", path.display());
    Ok(())
}
