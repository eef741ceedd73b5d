//! A word book collection bound to a snapshot store.
//!
//! `Library` is the explicit store object the rest of the program is handed:
//! it loads once when opened, saves after every successful collection-level
//! mutation, and saves once more when closed.

use std::cell::Cell;

use crate::collection::WordBookCollection;
use crate::error::StoreError;
use crate::model::WordBook;
use crate::snapshot::Snapshot;
use crate::store::SnapshotStore;

/// How the library came up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// A stored snapshot was restored.
    Restored,
    /// Nothing was stored yet; started empty.
    Fresh,
    /// The stored data could not be read; started empty.
    Recovered,
}

pub struct Library<S: SnapshotStore> {
    collection: WordBookCollection,
    store: S,
    load_outcome: LoadOutcome,
    /// The stored data failed to decode and has not been set aside yet.
    pending_backup: Cell<bool>,
}

impl<S: SnapshotStore> Library<S> {
    /// Load the collection from `store`.
    ///
    /// A missing snapshot starts an empty collection. Any other failure is
    /// logged and also falls back to an empty collection. Stored data that
    /// is unreadable is backed up by the store before the first save.
    pub fn open(store: S) -> Self {
        let loaded = store
            .load()
            .and_then(|snapshot| snapshot.map(Snapshot::restore).transpose());
        let mut pending_backup = false;
        let (collection, load_outcome) = match loaded {
            Ok(Some(collection)) => {
                tracing::info!(books = collection.len(), "word books loaded");
                (collection, LoadOutcome::Restored)
            }
            Ok(None) => {
                tracing::info!("no saved word books, starting fresh");
                (WordBookCollection::new(), LoadOutcome::Fresh)
            }
            Err(e) => {
                tracing::warn!("failed to load word books, starting fresh: {e}");
                pending_backup = e.is_data_error();
                (WordBookCollection::new(), LoadOutcome::Recovered)
            }
        };

        Self {
            collection,
            store,
            load_outcome,
            pending_backup: Cell::new(pending_backup),
        }
    }

    pub fn load_outcome(&self) -> LoadOutcome {
        self.load_outcome
    }

    pub fn collection(&self) -> &WordBookCollection {
        &self.collection
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Write the whole collection to the store.
    pub fn save(&self) -> Result<(), StoreError> {
        if self.pending_backup.get() {
            self.store.back_up()?;
            self.pending_backup.set(false);
        }
        self.store.save(&Snapshot::capture(&self.collection))?;
        tracing::info!(books = self.collection.len(), "word books saved");
        Ok(())
    }

    /// Save after a successful mutation. Failures leave the in-memory state
    /// intact and are only logged.
    fn persist_after(&self, op: &str) {
        if let Err(e) = self.save() {
            tracing::error!("failed to save word books after {op}: {e}");
        }
    }

    pub fn create_word_book(&mut self, name: &str) -> bool {
        let created = self.collection.create_word_book(name);
        if created {
            self.persist_after("create");
        }
        created
    }

    pub fn delete_word_book(&mut self, name: &str) -> bool {
        let deleted = self.collection.delete_word_book(name);
        if deleted {
            self.persist_after("delete");
        }
        deleted
    }

    pub fn rename_word_book(&mut self, old_name: &str, new_name: &str) -> bool {
        let renamed = self.collection.rename_word_book(old_name, new_name);
        if renamed {
            self.persist_after("rename");
        }
        renamed
    }

    pub fn select_word_book(&mut self, name: &str) -> bool {
        let selected = self.collection.select_word_book(name);
        if selected {
            self.persist_after("select");
        }
        selected
    }

    pub fn get(&self, name: &str) -> Option<&WordBook> {
        self.collection.get(name)
    }

    pub fn selected(&self) -> Option<&WordBook> {
        self.collection.selected()
    }

    /// Mutable access to one book. Word-level changes made through it are
    /// written by the next [`save`](Self::save) or [`close`](Self::close).
    pub fn book_mut(&mut self, name: &str) -> Option<&mut WordBook> {
        self.collection.get_mut(name)
    }

    /// Shutdown save.
    pub fn close(self) -> Result<(), StoreError> {
        self.save()
    }
}
