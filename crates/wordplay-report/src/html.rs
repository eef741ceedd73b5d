//! HTML report generator.
//!
//! Produces a self-contained HTML file with all CSS inlined.

use anyhow::Result;
use chrono::{DateTime, Local};
use std::path::Path;

use wordplay_core::statistics::{BookStatistics, WordStats, WordStatus};

use crate::write_report_file;

/// Escape a string for safe HTML insertion.
fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}

fn status_class(status: WordStatus) -> &'static str {
    match status {
        WordStatus::NotTested => "untested",
        WordStatus::Strong => "strong",
        WordStatus::Average => "average",
        WordStatus::Weak => "weak",
    }
}

/// Generate an HTML report for one book.
pub fn generate_html(stats: &BookStatistics, generated_at: DateTime<Local>) -> String {
    let mut html = String::new();

    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
    html.push_str("<meta charset=\"utf-8\">\n");
    html.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n");
    html.push_str(&format!(
        "<title>WordPlay statistics: {}</title>\n",
        html_escape(&stats.book_name)
    ));
    html.push_str("<style>\n");
    html.push_str(CSS);
    html.push_str("</style>\n");
    html.push_str("</head>\n<body>\n");

    // Header
    html.push_str("<header>\n");
    html.push_str("<h1>WordPlay learning statistics</h1>\n");
    html.push_str(&format!(
        "<p class=\"meta\">Word book: <strong>{}</strong> | {}</p>\n",
        html_escape(&stats.book_name),
        generated_at.format("%Y-%m-%d %H:%M")
    ));
    html.push_str("</header>\n");

    // Summary cards
    html.push_str("<section class=\"dashboard\">\n");
    html.push_str("<h2>Summary</h2>\n<div class=\"cards\">\n");
    html.push_str(&card("Total words", &stats.total_words.to_string()));
    html.push_str(&card(
        "Average accuracy",
        &format!("{:.1}%", stats.average_accuracy),
    ));
    html.push_str(&card("Total exposures", &stats.total_exposures.to_string()));
    html.push_str(&card("Weak words", &stats.weak_words.len().to_string()));
    html.push_str("</div>\n</section>\n");

    html.push_str("<section class=\"words\">\n<h2>Words</h2>\n");
    html.push_str(&word_table(&stats.words, true));
    html.push_str("</section>\n");

    if !stats.weak_words.is_empty() {
        html.push_str(&format!(
            "<section class=\"weak-words\">\n<h2>Weak words (accuracy below {}%)</h2>\n",
            stats.thresholds.weak
        ));
        html.push_str(&word_table(&stats.weak_words, false));
        html.push_str("</section>\n");
    }

    html.push_str("</body>\n</html>");
    html
}

fn card(label: &str, value: &str) -> String {
    format!(
        "<div class=\"card\"><span class=\"label\">{}</span><span class=\"value\">{}</span></div>\n",
        html_escape(label),
        html_escape(value)
    )
}

fn word_table(rows: &[WordStats], with_status: bool) -> String {
    let mut html = String::from("<table>\n<thead><tr><th>Word</th><th>Meaning</th><th>Shown</th><th>Correct</th><th>Accuracy</th>");
    if with_status {
        html.push_str("<th>Status</th>");
    }
    html.push_str("</tr></thead>\n<tbody>\n");

    for w in rows {
        html.push_str(&format!(
            "<tr class=\"{}\"><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{:.1}%</td>",
            status_class(w.status),
            html_escape(&w.word),
            html_escape(&w.meaning),
            w.exposure_count,
            w.correct_count,
            w.accuracy
        ));
        if with_status {
            html.push_str(&format!("<td>{}</td>", w.status));
        }
        html.push_str("</tr>\n");
    }

    html.push_str("</tbody></table>\n");
    html
}

/// Write an HTML report to a file.
pub fn write_html_report(
    stats: &BookStatistics,
    generated_at: DateTime<Local>,
    path: &Path,
    force: bool,
) -> Result<()> {
    write_report_file(path, &generate_html(stats, generated_at), force)
}

const CSS: &str = r#"
:root { --bg: #fff; --fg: #1a1a1a; --border: #e5e7eb; --strong: #dcfce7; --average: #fef9c3; --weak: #fde2e2; }
@media (prefers-color-scheme: dark) {
  :root { --bg: #111827; --fg: #f9fafb; --border: #374151; --strong: #064e3b; --average: #713f12; --weak: #7f1d1d; }
}
body { font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', sans-serif; margin: 0; padding: 2rem; background: var(--bg); color: var(--fg); }
h1, h2 { margin-top: 2rem; }
.meta { color: #6b7280; }
.cards { display: flex; gap: 1rem; flex-wrap: wrap; }
.card { border: 1px solid var(--border); border-radius: 8px; padding: 1rem 1.5rem; display: flex; flex-direction: column; }
.card .label { color: #6b7280; font-size: 0.85rem; }
.card .value { font-size: 1.5rem; font-weight: bold; }
table { border-collapse: collapse; width: 100%; margin: 1rem 0; }
th, td { border: 1px solid var(--border); padding: 0.5rem 1rem; text-align: left; }
th { background: var(--border); }
.strong { background: var(--strong); }
.average { background: var(--average); }
.weak { background: var(--weak); }
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use wordplay_core::statistics::StatusThresholds;
    use wordplay_core::WordBook;

    fn make_stats() -> BookStatistics {
        let mut book = WordBook::new("Tom & <Jerry>");
        book.add_word("apple", "사과");
        book.add_word("pear", "\"배\"");
        for _ in 0..4 {
            book.record_exposure("pear");
        }
        book.record_correct("pear");
        BookStatistics::compute(&book, &StatusThresholds::default())
    }

    fn at() -> DateTime<Local> {
        Local.with_ymd_and_hms(2026, 3, 1, 9, 5, 0).unwrap()
    }

    #[test]
    fn html_report_contains_required_elements() {
        let html = generate_html(&make_stats(), at());

        assert!(html.contains("<html"));
        assert!(html.contains("</html>"));
        assert!(html.contains("apple"));
        assert!(html.contains("Weak words (accuracy below 50%)"));
        assert!(html.contains("25.0%"));
        assert!(html.contains("2026-03-01 09:05"));
    }

    #[test]
    fn html_escapes_user_text() {
        let html = generate_html(&make_stats(), at());
        assert!(html.contains("Tom &amp; &lt;Jerry&gt;"));
        assert!(html.contains("&quot;배&quot;"));
        assert!(!html.contains("<Jerry>"));
    }

    #[test]
    fn html_report_write_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out/report.html");

        write_html_report(&make_stats(), at(), &path, false).unwrap();
        assert!(path.exists());

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("<html"));
        assert!(write_html_report(&make_stats(), at(), &path, false).is_err());
    }
}
