//! Error types for polyloclib

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while counting a directory tree.
///
/// Only traversal problems and pipeline integrity failures surface here.
/// Unreadable files and a missing or broken ignore file degrade silently.
#[derive(Error, Debug)]
pub enum PolylocError {
    /// Path does not exist
    #[error("path does not exist: {0}")]
    PathNotFound(PathBuf),

    /// A directory entry could not be listed or stat'ed during the walk
    #[error("failed to traverse '{path}': {source}")]
    Traversal {
        path: PathBuf,
        source: walkdir::Error,
    },

    /// Invalid glob pattern
    #[error("invalid glob pattern '{pattern}': {message}")]
    InvalidGlob { pattern: String, message: String },

    /// A stage sub-task panicked or was cancelled, so its item never arrived
    #[error("{stage} task failed: {source}")]
    TaskFailed {
        stage: &'static str,
        source: tokio::task::JoinError,
    },

    /// The downstream queue went away while a stage still held an item
    #[error("{stage} output queue closed before all items were forwarded")]
    QueueClosed { stage: &'static str },

    /// The aggregated file count does not match what the walker emitted
    #[error("pipeline lost items: walker emitted {emitted}, aggregator counted {counted}")]
    ItemsLost { emitted: u64, counted: u64 },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl PolylocError {
    /// Whether this error is only a consequence of another stage failing.
    pub(crate) fn is_secondary(&self) -> bool {
        matches!(self, PolylocError::QueueClosed { .. })
    }
}
