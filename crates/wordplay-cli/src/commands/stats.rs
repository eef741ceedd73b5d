//! The `wordplay stats` command.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use comfy_table::{Cell, Table};

use wordplay_core::statistics::{BookStatistics, WordStats};

use super::AppContext;

pub fn execute(
    book: Option<String>,
    format: String,
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

    match format.as_str() {
        "json" => println!("{}", wordplay_report::render_json(&stats)?),
        "table" => print_table(&stats),
        other => anyhow::bail!("unknown stats format: {other} (expected table or json)"),
    }
    Ok(())
}

fn word_table(rows: &[WordStats], with_status: bool) -> Table {
    let mut table = Table::new();
    let mut header = vec!["Word", "Meaning", "Shown", "Correct", "Accuracy"];
    if with_status {
        header.push("Status");
    }
    table.set_header(header);

    for w in rows {
        let mut row = vec![
            Cell::new(&w.word),
            Cell::new(&w.meaning),
            Cell::new(w.exposure_count),
            Cell::new(w.correct_count),
            Cell::new(format!("{:.1}%", w.accuracy)),
        ];
        if with_status {
            row.push(Cell::new(w.status));
        }
        table.add_row(row);
    }
    table
}

fn print_table(stats: &BookStatistics) {
    println!("Word book: {}", stats.book_name);
    println!("Total words: {}", stats.total_words);
    println!("Average accuracy: {:.1}%", stats.average_accuracy);
    println!("Total exposures: {}", stats.total_exposures);

    if stats.words.is_empty() {
        println!("\nNo words yet.");
        return;
    }

    println!("\n{}", word_table(&stats.words, true));

    if stats.weak_words.is_empty() {
        println!("\nNo weak words.");
    } else {
        println!(
            "\nWeak words (accuracy below {}%):\n{}",
            stats.thresholds.weak,
            word_table(&stats.weak_words, false)
        );
    }
}
