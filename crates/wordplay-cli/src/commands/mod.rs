pub mod book;
pub mod export;
pub mod init;
pub mod play;
pub mod quiz;
pub mod stats;
pub mod word;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use wordplay_core::config::load_config_from;
use wordplay_core::{JsonFileStore, Library, LoadOutcome, WordplayConfig};

/// Loaded configuration plus the word books it points at.
pub struct AppContext {
    pub config: WordplayConfig,
    pub library: Library<JsonFileStore>,
}

impl AppContext {
    /// Load the config, then open the data file. `data` wins over the
    /// configured path.
    pub fn open(config_path: Option<&Path>, data: Option<PathBuf>) -> Result<Self> {
        let config = load_config_from(config_path)?;
        let data_file = data.unwrap_or_else(|| config.data_file.clone());
        tracing::debug!(path = %data_file.display(), "opening word books");
        let store = JsonFileStore::new(data_file);
        let library = Library::open(store.clone());
        if library.load_outcome() == LoadOutcome::Recovered {
            eprintln!(
                "Warning: could not read word books from {}; starting with none. \
                 The old file is moved to {} before anything is saved.",
                store.path().display(),
                store.backup_path().display()
            );
        }
        Ok(Self { config, library })
    }

    /// The book a command works on: `explicit` if given, otherwise the
    /// selected one.
    pub fn book_name(&self, explicit: Option<&str>) -> Result<String> {
        let collection = self.library.collection();
        match explicit {
            Some(name) => {
                let name = name.trim();
                anyhow::ensure!(
                    collection.get(name).is_some(),
                    "word book not found: {name}"
                );
                Ok(name.to_string())
            }
            None => collection
                .selected_name()
                .map(str::to_string)
                .context("no word book selected (use `wordplay book select <name>` or --book)"),
        }
    }

    /// Write everything back to the data file.
    pub fn close(self) -> Result<()> {
        let path = self.library.store().path().to_path_buf();
        self.library
            .close()
            .with_context(|| format!("failed to save word books to {}", path.display()))
    }
}
