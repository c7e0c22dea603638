//! Index error types.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while building or rebuilding the index.
#[derive(Debug, Error)]
pub enum IndexError {
    /// The configured root directory cannot be read at all.
    ///
    /// Per-subtree and per-file failures are absorbed during the walk;
    /// this is the only error surfaced to callers.
    #[error("root directory not accessible: {path}")]
    RootInaccessible {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// I/O error outside the walk itself
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
