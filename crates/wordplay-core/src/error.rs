//! Persistence error types.
//!
//! Domain outcomes (duplicate names, missing words) are plain `bool` /
//! `Option` results on the model types. Only unexpected storage conditions
//! are represented here.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while loading or saving word books.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Reading or writing the backing file failed.
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The snapshot could not be serialized.
    #[error("failed to encode snapshot: {0}")]
    Encode(#[source] serde_json::Error),

    /// The backing file is not a valid snapshot document.
    #[error("failed to decode snapshot from {}: {source}", path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// The snapshot was written by a newer schema.
    #[error("unsupported snapshot version {found} (this build reads up to {supported})")]
    UnsupportedVersion { found: u32, supported: u32 },

    /// The snapshot decoded but violates a model invariant.
    #[error("corrupt snapshot: {0}")]
    Corrupt(String),
}

impl StoreError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        StoreError::Io {
            path: path.into(),
            source,
        }
    }

    /// Returns `true` if the error came from the snapshot contents rather
    /// than from the file system.
    pub fn is_data_error(&self) -> bool {
        matches!(
            self,
            StoreError::Decode { .. } | StoreError::UnsupportedVersion { .. } | StoreError::Corrupt(_)
        )
    }
}
