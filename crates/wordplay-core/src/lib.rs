//! wordplay-core: word books, quizzes, and learning statistics.
//!
//! This crate holds the data model and every operation that has to keep its
//! invariants: word books and their collection, the versioned snapshot and
//! its stores, quiz option generation, the matching game, and the
//! statistics fold.

pub mod collection;
pub mod config;
pub mod error;
pub mod library;
pub mod matching;
pub mod model;
pub mod quiz;
pub mod snapshot;
pub mod statistics;
pub mod store;

pub use collection::WordBookCollection;
pub use config::WordplayConfig;
pub use error::StoreError;
pub use library::{Library, LoadOutcome};
pub use model::{WordBook, WordEntry};
pub use statistics::{BookStatistics, StatusThresholds, WordStatus};
pub use store::{JsonFileStore, MemoryStore, SnapshotStore};
