//! Plain-text statistics report.

use std::path::{Path, PathBuf};

use anyhow::Result;
use chrono::{DateTime, Local};

use wordplay_core::statistics::{BookStatistics, WordStats};

use crate::write_report_file;

const BANNER_WIDTH: usize = 50;
const SECTION_WIDTH: usize = 30;
const TABLE_WIDTH: usize = 80;

/// Render the report for `stats` as plain text.
pub fn render_text_report(stats: &BookStatistics, generated_at: DateTime<Local>) -> String {
    let banner = "=".repeat(BANNER_WIDTH);
    let rule = "-".repeat(TABLE_WIDTH);
    let mut out = String::new();

    out.push_str(&format!("{banner}\nWordPlay learning statistics\n{banner}\n"));
    out.push_str(&format!("Word book: {}\n", stats.book_name));
    out.push_str(&format!(
        "Generated: {}\n",
        generated_at.format("%Y-%m-%d %H:%M")
    ));
    out.push_str(&format!("{banner}\n\n"));

    out.push_str("[ Summary ]\n");
    out.push_str(&format!("{}\n", "-".repeat(SECTION_WIDTH)));
    out.push_str(&format!("Total words: {}\n", stats.total_words));
    out.push_str(&format!(
        "Average accuracy: {:.1}%\n",
        stats.average_accuracy
    ));
    out.push_str(&format!("Total exposures: {}\n\n", stats.total_exposures));

    out.push_str("[ Words ]\n");
    out.push_str(&format!("{rule}\n"));
    out.push_str(&format!(
        "{:<15} {:<20} {:>8} {:>8} {:>10} {:>14}\n",
        "Word", "Meaning", "Shown", "Correct", "Accuracy", "Status"
    ));
    out.push_str(&format!("{rule}\n"));
    for w in &stats.words {
        out.push_str(&row(w));
        out.push_str(&format!(" {:>14}\n", w.status.to_string()));
    }

    if !stats.weak_words.is_empty() {
        out.push_str(&format!(
            "\n\n[ Weak words (accuracy below {}%) ]\n",
            stats.thresholds.weak
        ));
        out.push_str(&format!("{rule}\n"));
        out.push_str(&format!(
            "{:<15} {:<20} {:>8} {:>8} {:>10}\n",
            "Word", "Meaning", "Shown", "Correct", "Accuracy"
        ));
        out.push_str(&format!("{rule}\n"));
        for w in &stats.weak_words {
            out.push_str(&row(w));
            out.push('\n');
        }
    }

    out.push_str(&format!(
        "\n{banner}\nEnd of WordPlay learning statistics\n{banner}\n"
    ));
    out
}

fn row(w: &WordStats) -> String {
    format!(
        "{:<15} {:<20} {:>8} {:>8} {:>9.1}%",
        w.word, w.meaning, w.exposure_count, w.correct_count, w.accuracy
    )
}

/// `<book>_stats_<YYYY-MM-DD_HH-MM>.txt`, with path separators in the book
/// name replaced.
pub fn default_export_file_name(book_name: &str, at: DateTime<Local>) -> String {
    let safe: String = book_name
        .chars()
        .map(|c| if matches!(c, '/' | '\\' | ':') { '_' } else { c })
        .collect();
    format!("{safe}_stats_{}.txt", at.format("%Y-%m-%d_%H-%M"))
}

/// Append `.txt` unless the file name already ends with it (any case).
pub fn ensure_txt_extension(path: &Path) -> PathBuf {
    let has_txt = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("txt"));
    if has_txt {
        path.to_path_buf()
    } else {
        let mut name = path.as_os_str().to_owned();
        name.push(".txt");
        PathBuf::from(name)
    }
}

/// Render and write the text report. Refuses to replace an existing file
/// unless `force` is set.
pub fn write_text_report(
    stats: &BookStatistics,
    generated_at: DateTime<Local>,
    path: &Path,
    force: bool,
) -> Result<()> {
    write_report_file(path, &render_text_report(stats, generated_at), force)
}
