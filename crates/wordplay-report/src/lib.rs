//! wordplay-report: statistics export for wordplay.
//!
//! Renders [`BookStatistics`] as a plain-text report, a self-contained HTML
//! page, or JSON.

use std::path::Path;

use anyhow::{Context, Result};

use wordplay_core::statistics::BookStatistics;

pub mod html;
pub mod text;

/// Pretty-printed JSON of the statistics.
pub fn render_json(stats: &BookStatistics) -> Result<String> {
    serde_json::to_string_pretty(stats).context("failed to serialize statistics")
}

/// Write `contents` to `path`, creating parent directories. An existing file
/// is only replaced when `force` is set.
pub(crate) fn write_report_file(path: &Path, contents: &str, force: bool) -> Result<()> {
    if path.exists() && !force {
        anyhow::bail!(
            "{} already exists (use --force to overwrite)",
            path.display()
        );
    }
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    std::fs::write(path, contents)
        .with_context(|| format!("failed to write report: {}", path.display()))?;
    Ok(())
}
