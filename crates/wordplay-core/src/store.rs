//! Snapshot storage backends.
//!
//! [`SnapshotStore`] is the seam between the in-memory collection and
//! wherever it is persisted. [`JsonFileStore`] is the real backend;
//! [`MemoryStore`] is a test double that can also simulate failures.

use std::cell::{Cell, RefCell};
use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

use crate::error::StoreError;
use crate::snapshot::Snapshot;

/// Somewhere a whole-collection snapshot can be read from and written to.
pub trait SnapshotStore {
    /// Load the stored snapshot. `Ok(None)` means nothing has been saved yet.
    fn load(&self) -> Result<Option<Snapshot>, StoreError>;

    /// Replace the stored snapshot.
    fn save(&self, snapshot: &Snapshot) -> Result<(), StoreError>;

    /// Keep the currently stored data aside so the next save does not
    /// destroy it. Used when the stored data could not be read.
    fn back_up(&self) -> Result<(), StoreError> {
        Ok(())
    }
}

/// Stores the snapshot as a pretty-printed JSON file.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Where [`back_up`](SnapshotStore::back_up) moves an unreadable file.
    pub fn backup_path(&self) -> PathBuf {
        let mut name = self.path.as_os_str().to_owned();
        name.push(".bak");
        PathBuf::from(name)
    }

    fn parent_dir(&self) -> &Path {
        match self.path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        }
    }
}

impl SnapshotStore for JsonFileStore {
    fn load(&self) -> Result<Option<Snapshot>, StoreError> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(StoreError::io(&self.path, e)),
        };
        Snapshot::from_json(&content, &self.path).map(Some)
    }

    /// Writes to a temporary file next to the target and renames it into
    /// place, so a failed save never truncates the previous snapshot.
    fn save(&self, snapshot: &Snapshot) -> Result<(), StoreError> {
        let json = snapshot.to_json()?;
        let dir = self.parent_dir();
        std::fs::create_dir_all(dir).map_err(|e| StoreError::io(dir, e))?;

        let mut tmp = NamedTempFile::new_in(dir).map_err(|e| StoreError::io(dir, e))?;
        tmp.write_all(json.as_bytes())
            .and_then(|()| tmp.as_file().sync_all())
            .map_err(|e| StoreError::io(tmp.path(), e))?;
        tmp.persist(&self.path)
            .map_err(|e| StoreError::io(&self.path, e.error))?;
        Ok(())
    }

    /// Renames the data file to `<path>.bak`, replacing an older backup.
    fn back_up(&self) -> Result<(), StoreError> {
        let backup = self.backup_path();
        match std::fs::rename(&self.path, &backup) {
            Ok(()) => {
                tracing::warn!(backup = %backup.display(), "unreadable word book data kept aside");
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StoreError::io(&self.path, e)),
        }
    }
}

/// In-memory store for tests.
#[derive(Debug, Default)]
pub struct MemoryStore {
    snapshot: RefCell<Option<Snapshot>>,
    fail_saves: Cell<bool>,
    save_count: Cell<u32>,
    backups: RefCell<Vec<Snapshot>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store that already holds `snapshot`.
    pub fn with_snapshot(snapshot: Snapshot) -> Self {
        let store = Self::new();
        store.snapshot.replace(Some(snapshot));
        store
    }

    /// Make every subsequent save fail (or succeed again).
    pub fn set_fail_saves(&self, fail: bool) {
        self.fail_saves.set(fail);
    }

    /// Number of successful saves.
    pub fn save_count(&self) -> u32 {
        self.save_count.get()
    }

    /// The most recently saved snapshot.
    pub fn snapshot(&self) -> Option<Snapshot> {
        self.snapshot.borrow().clone()
    }

    /// Snapshots set aside by `back_up`, oldest first.
    pub fn backups(&self) -> Vec<Snapshot> {
        self.backups.borrow().clone()
    }
}

impl SnapshotStore for MemoryStore {
    fn load(&self) -> Result<Option<Snapshot>, StoreError> {
        Ok(self.snapshot.borrow().clone())
    }

    fn save(&self, snapshot: &Snapshot) -> Result<(), StoreError> {
        if self.fail_saves.get() {
            return Err(StoreError::io(
                "memory",
                std::io::Error::other("simulated save failure"),
            ));
        }
        self.snapshot.replace(Some(snapshot.clone()));
        self.save_count.set(self.save_count.get() + 1);
        Ok(())
    }

    fn back_up(&self) -> Result<(), StoreError> {
        if let Some(snapshot) = self.snapshot.borrow_mut().take() {
            self.backups.borrow_mut().push(snapshot);
        }
        Ok(())
    }
}

impl<S: SnapshotStore + ?Sized> SnapshotStore for &S {
    fn load(&self) -> Result<Option<Snapshot>, StoreError> {
        (**self).load()
    }

    fn save(&self, snapshot: &Snapshot) -> Result<(), StoreError> {
        (**self).save(snapshot)
    }

    fn back_up(&self) -> Result<(), StoreError> {
        (**self).back_up()
    }
}
