//! Versioned on-disk representation of a word book collection.
//!
//! The in-memory model is converted to plain records before encoding, so the
//! file format stays stable when the model types change. Decoding checks the
//! version first and then re-validates every model invariant.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::collection::WordBookCollection;
use crate::error::StoreError;
use crate::model::{WordBook, WordEntry};

/// Current snapshot schema version.
pub const SNAPSHOT_VERSION: u32 = 1;

/// A whole-collection snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Schema version the snapshot was written with.
    pub version: u32,
    /// Name of the selected book, if any.
    #[serde(default)]
    pub selected: Option<String>,
    /// Every book, sorted by name.
    #[serde(default)]
    pub books: Vec<BookRecord>,
}

/// One word book.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookRecord {
    pub name: String,
    /// Entries, sorted by word.
    #[serde(default)]
    pub entries: Vec<EntryRecord>,
}

/// One word entry with its counters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryRecord {
    pub word: String,
    pub meaning: String,
    #[serde(default)]
    pub exposure_count: u32,
    #[serde(default)]
    pub correct_count: u32,
}

#[derive(Deserialize)]
struct VersionProbe {
    version: u32,
}

impl Snapshot {
    /// Snapshot the observable state of a collection.
    pub fn capture(collection: &WordBookCollection) -> Self {
        let books = collection
            .books()
            .into_iter()
            .map(|book| BookRecord {
                name: book.name().to_string(),
                entries: book
                    .get_all_word_data()
                    .into_iter()
                    .map(|e| EntryRecord {
                        word: e.word().to_string(),
                        meaning: e.meaning().to_string(),
                        exposure_count: e.exposure_count(),
                        correct_count: e.correct_count(),
                    })
                    .collect(),
            })
            .collect();

        Self {
            version: SNAPSHOT_VERSION,
            selected: collection.selected_name().map(str::to_string),
            books,
        }
    }

    /// Rebuild a collection, rejecting anything the model would not allow.
    pub fn restore(self) -> Result<WordBookCollection, StoreError> {
        if self.version > SNAPSHOT_VERSION {
            return Err(StoreError::UnsupportedVersion {
                found: self.version,
                supported: SNAPSHOT_VERSION,
            });
        }

        let mut collection = WordBookCollection::new();
        for record in self.books {
            let name = record.name.trim();
            if name.is_empty() || name != record.name {
                return Err(StoreError::Corrupt(format!(
                    "invalid book name {:?}",
                    record.name
                )));
            }

            let mut book = WordBook::new(name);
            for e in record.entries {
                if e.word.trim().is_empty()
                    || e.word.trim() != e.word
                    || e.meaning.trim().is_empty()
                    || e.meaning.trim() != e.meaning
                {
                    return Err(StoreError::Corrupt(format!(
                        "invalid entry {:?} in book {:?}",
                        e.word, record.name
                    )));
                }
                let word = e.word.clone();
                let entry =
                    WordEntry::with_counts(e.word, e.meaning, e.exposure_count, e.correct_count)
                        .ok_or_else(|| {
                            StoreError::Corrupt(format!(
                                "word {word:?} in book {:?} has more correct answers than exposures",
                                record.name
                            ))
                        })?;
                if !book.insert_entry(entry) {
                    return Err(StoreError::Corrupt(format!(
                        "duplicate word {word:?} in book {:?}",
                        record.name
                    )));
                }
            }

            if !collection.insert_book(book) {
                return Err(StoreError::Corrupt(format!(
                    "duplicate book name {:?}",
                    record.name
                )));
            }
        }

        if let Some(selected) = self.selected {
            if !collection.select_word_book(&selected) {
                tracing::warn!("selected book {selected:?} is missing, clearing selection");
            }
        }

        Ok(collection)
    }

    /// Encode as pretty-printed JSON.
    pub fn to_json(&self) -> Result<String, StoreError> {
        serde_json::to_string_pretty(self).map_err(StoreError::Encode)
    }

    /// Decode JSON, checking the schema version before the full structure so
    /// newer files report a version error rather than a parse error.
    pub fn from_json(content: &str, source: &Path) -> Result<Self, StoreError> {
        let decode_err = |source_err| StoreError::Decode {
            path: source.to_path_buf(),
            source: source_err,
        };

        let probe: VersionProbe = serde_json::from_str(content).map_err(decode_err)?;
        if probe.version > SNAPSHOT_VERSION {
            return Err(StoreError::UnsupportedVersion {
                found: probe.version,
                supported: SNAPSHOT_VERSION,
            });
        }
        serde_json::from_str(content).map_err(decode_err)
    }
}
