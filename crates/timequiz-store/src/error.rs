//! Store error types.

use std::path::PathBuf;

use thiserror::Error;

/// Errors reading or writing the preferences file.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The file exists but could not be read or written.
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file holds something other than a valid state document.
    #[error("corrupt state file {path}: {source}")]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}
