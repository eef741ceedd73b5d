//! The `wordplay book` commands.

use std::path::{Path, PathBuf};

use anyhow::Result;

use super::AppContext;

pub enum Action {
    Create(String),
    Delete(String),
    Rename(String, String),
    Select(String),
    List,
}

pub fn execute(action: Action, config_path: Option<&Path>, data: Option<PathBuf>) -> Result<()> {
    let mut ctx = AppContext::open(config_path, data)?;
    let library = &mut ctx.library;

    match action {
        Action::Create(name) => {
            if name.trim().is_empty() {
                anyhow::bail!("word book name must not be empty");
            }
            if !library.create_word_book(&name) {
                anyhow::bail!("word book already exists: {}", name.trim());
            }
            println!("Created word book: {}", name.trim());
        }
        Action::Delete(name) => {
            if !library.delete_word_book(&name) {
                anyhow::bail!("word book not found: {}", name.trim());
            }
            println!("Deleted word book: {}", name.trim());
        }
        Action::Rename(old_name, new_name) => {
            if !library.rename_word_book(&old_name, &new_name) {
                let collection = library.collection();
                if collection.get(&old_name).is_none() {
                    anyhow::bail!("word book not found: {}", old_name.trim());
                } else if new_name.trim().is_empty() {
                    anyhow::bail!("word book name must not be empty");
                }
                anyhow::bail!("word book already exists: {}", new_name.trim());
            }
            println!("Renamed {} to {}", old_name.trim(), new_name.trim());
        }
        Action::Select(name) => {
            if !library.select_word_book(&name) {
                anyhow::bail!("word book not found: {}", name.trim());
            }
            println!("Selected word book: {}", name.trim());
        }
        Action::List => {
            let collection = library.collection();
            if collection.is_empty() {
                println!("No word books. Create one with `wordplay book create <name>`.");
                return Ok(());
            }
            let selected = collection.selected_name();
            for book in collection.books() {
                let marker = if Some(book.name()) == selected { "*" } else { " " };
                println!("{marker} {book}");
            }
        }
    }

    Ok(())
}
