//! The `wordplay word` commands.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use comfy_table::{Cell, Table};

use super::AppContext;

pub enum Action {
    Add(String, String),
    Remove(String),
    Update(String, String),
    List,
    Show(String),
}

pub fn execute(
    action: Action,
    book: Option<String>,
    config_path: Option<&Path>,
    data: Option<PathBuf>,
) -> Result<()> {
    let mut ctx = AppContext::open(config_path, data)?;
    let name = ctx.book_name(book.as_deref())?;
    let thresholds = ctx.config.thresholds();
    let book = ctx
        .library
        .book_mut(&name)
        .with_context(|| format!("word book not found: {name}"))?;

    match action {
        Action::Add(word, meaning) => {
            if book.contains(&word) {
                anyhow::bail!("'{}' is already in {name}", word.trim());
            }
            if !book.add_word(&word, &meaning) {
                anyhow::bail!("word and meaning must not be empty");
            }
            println!("Added '{}' to {name}", word.trim());
        }
        Action::Remove(word) => {
            if !book.remove_word(&word) {
                anyhow::bail!("'{}' is not in {name}", word.trim());
            }
            println!("Removed '{}' from {name}", word.trim());
        }
        Action::Update(word, meaning) => {
            if !book.contains(&word) {
                anyhow::bail!("'{}' is not in {name}", word.trim());
            }
            if !book.update_word(&word, &meaning) {
                anyhow::bail!("meaning must not be empty");
            }
            println!("Updated '{}' in {name}", word.trim());
        }
        Action::List => {
            if book.is_empty() {
                println!("No words in {name}.");
                return Ok(());
            }
            let mut table = Table::new();
            table.set_header(vec!["Word", "Meaning", "Shown", "Correct", "Accuracy"]);
            for entry in book.get_all_word_data() {
                table.add_row(vec![
                    Cell::new(entry.word()),
                    Cell::new(entry.meaning()),
                    Cell::new(entry.exposure_count()),
                    Cell::new(entry.correct_count()),
                    Cell::new(format!("{:.1}%", entry.accuracy())),
                ]);
            }
            println!("{book}");
            println!("{table}");
            return Ok(());
        }
        Action::Show(word) => {
            let entry = book
                .get_word_data(&word)
                .with_context(|| format!("'{}' is not in {name}", word.trim()))?;
            println!("Word:     {}", entry.word());
            println!("Meaning:  {}", entry.meaning());
            println!("Shown:    {}", entry.exposure_count());
            println!("Correct:  {}", entry.correct_count());
            println!("Accuracy: {:.1}%", entry.accuracy());
            println!("Status:   {}", thresholds.classify(entry));
            return Ok(());
        }
    }

    ctx.close()
}
