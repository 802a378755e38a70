//! The unit of pipeline work: one discovered file.

use std::path::PathBuf;

/// One file travelling through the pipeline.
///
/// The walker creates it with identity fields only. The loader attaches
/// `content`, the metrics stage fills in the counts and takes the content
/// back out. Items are moved from queue to queue, so whichever stage holds
/// one owns it outright.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct WorkItem {
    /// Absolute path of the file
    pub path: PathBuf,
    /// Final path component
    pub file_name: String,
    /// Normalized lookup key (see [`normalize_extension`](crate::normalize_extension))
    pub extension: String,
    /// Classified language label
    pub language: String,
    /// Raw bytes, present only between the loader and the metrics stage
    pub content: Option<Vec<u8>>,
    /// Content length
    pub bytes: u64,
    /// Number of `\n` bytes
    pub lines: u64,
    /// Reserved, never computed
    pub code: u64,
    /// Reserved, never computed
    pub comment: u64,
    /// Number of non-overlapping `\n\n` sequences
    pub blank: u64,
    /// The loader could not read the file and substituted empty content
    pub read_failed: bool,
}

impl WorkItem {
    /// Create an item for a classified file.
    pub fn new(
        path: impl Into<PathBuf>,
        file_name: impl Into<String>,
        extension: impl Into<String>,
        language: impl Into<String>,
    ) -> Self {
        Self {
            path: path.into(),
            file_name: file_name.into(),
            extension: extension.into(),
            language: language.into(),
            ..Self::default()
        }
    }
}
