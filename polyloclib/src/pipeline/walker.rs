//! Directory traversal: the first stage of the pipeline.
//!
//! Walks the root with `walkdir`, prunes the root's `.git` directory and
//! anything the ignore rules match, and emits one [`WorkItem`] per regular
//! file whose name classifies to a known language. Symlinks are not
//! followed and are never emitted.
//!
//! Any traversal error ends the walk. The walker owns the only sender of
//! its output queue, so returning (successfully or not) closes it.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::{debug, trace};
use walkdir::WalkDir;

use crate::data::WorkItem;
use crate::error::PolylocError;
use crate::languages::LanguageRegistry;
use crate::source::{FilterConfig, IgnoreRules};
use crate::Result;

pub(crate) const STAGE: &str = "walker";

/// Version-control metadata directory skipped at the root.
const VCS_DIR: &str = ".git";

/// Directory walker producing classified work items.
#[derive(Debug, Clone)]
pub struct Walker {
    root: PathBuf,
    registry: Arc<LanguageRegistry>,
    rules: IgnoreRules,
    filter: FilterConfig,
}

impl Walker {
    /// Create a walker with no ignore rules and no exclusions.
    pub fn new(root: impl Into<PathBuf>, registry: Arc<LanguageRegistry>) -> Self {
        Self {
            root: root.into(),
            registry,
            rules: IgnoreRules::disabled(),
            filter: FilterConfig::new(),
        }
    }

    /// Set the ignore rules.
    pub fn rules(mut self, rules: IgnoreRules) -> Self {
        self.rules = rules;
        self
    }

    /// Set the glob exclusions.
    pub fn filter(mut self, filter: FilterConfig) -> Self {
        self.filter = filter;
        self
    }

    /// Walk the tree, handing each item to `emit`.
    ///
    /// Returns the number of items emitted. Stops at the first traversal
    /// error or the first error returned by `emit`.
    pub fn walk<F>(&self, mut emit: F) -> Result<u64>
    where
        F: FnMut(WorkItem) -> Result<()>,
    {
        let root = self.root.as_path();
        let mut emitted = 0;

        let entries = WalkDir::new(root)
            .follow_links(false)
            .into_iter()
            .filter_entry(|entry| {
                if entry.depth() == 0 {
                    return true;
                }
                let is_dir = entry.file_type().is_dir();
                if is_dir && entry.depth() == 1 && entry.file_name() == VCS_DIR {
                    return false;
                }
                !self.rules.is_ignored(entry.path(), is_dir)
            });

        for entry in entries {
            let entry = entry.map_err(|err| {
                let path = err
                    .path()
                    .map(Path::to_path_buf)
                    .unwrap_or_else(|| root.to_path_buf());
                PolylocError::Traversal { path, source: err }
            })?;

            if !entry.file_type().is_file() {
                continue;
            }

            // A file root is relative to itself, which leaves nothing to match
            let relative = match entry.path().strip_prefix(root) {
                Ok(rel) if !rel.as_os_str().is_empty() => rel,
                _ => Path::new(entry.file_name()),
            };
            if self.filter.excludes(relative) {
                trace!(path = %relative.display(), "excluded by filter");
                continue;
            }

            let file_name = entry.file_name().to_string_lossy();
            let Some((extension, language)) = self.registry.classify(&file_name) else {
                continue;
            };

            let item = WorkItem::new(entry.path(), file_name.into_owned(), extension, language);
            emit(item)?;
            emitted += 1;
        }

        Ok(emitted)
    }

    /// Walk into a queue. Blocks on a full queue, so run it off the async
    /// workers.
    pub(crate) fn run(self, output: mpsc::Sender<WorkItem>) -> Result<u64> {
        let outcome = self.walk(|item| {
            output
                .blocking_send(item)
                .map_err(|_| PolylocError::QueueClosed { stage: STAGE })
        });

        drop(output);
        match &outcome {
            Ok(emitted) => debug!(stage = STAGE, emitted, "closed"),
            Err(err) => debug!(stage = STAGE, error = %err, "aborted"),
        }
        outcome
    }
}
