//! Ignore rules read from the scan root.
//!
//! Pattern semantics come from the `ignore` crate's gitignore matcher. Only
//! the ignore file at the root is consulted. A missing file, or one that
//! fails to parse, leaves filtering disabled rather than failing the run.

use std::path::Path;

use ignore::gitignore::{Gitignore, GitignoreBuilder};
use tracing::debug;

/// Default ignore file name looked up in the scan root.
pub const DEFAULT_IGNORE_FILE: &str = ".gitignore";

/// Path-exclusion predicate built from an ignore file.
#[derive(Debug, Clone, Default)]
pub struct IgnoreRules {
    matcher: Option<Gitignore>,
}

impl IgnoreRules {
    /// Rules that never match.
    pub fn disabled() -> Self {
        Self { matcher: None }
    }

    /// Load `root/file_name`, falling back to disabled rules on any error.
    pub fn load(root: &Path, file_name: &str) -> Self {
        let path = root.join(file_name);
        if !path.is_file() {
            debug!(path = %path.display(), "no ignore file, filtering disabled");
            return Self::disabled();
        }

        let mut builder = GitignoreBuilder::new(root);
        if let Some(err) = builder.add(&path) {
            debug!(path = %path.display(), error = %err, "ignore file unusable, filtering disabled");
            return Self::disabled();
        }

        match builder.build() {
            Ok(matcher) => {
                debug!(path = %path.display(), rules = matcher.num_ignores(), "loaded ignore rules");
                Self {
                    matcher: Some(matcher),
                }
            }
            Err(err) => {
                debug!(path = %path.display(), error = %err, "ignore file unusable, filtering disabled");
                Self::disabled()
            }
        }
    }

    /// Whether any rules are active.
    pub fn is_enabled(&self) -> bool {
        self.matcher.is_some()
    }

    /// Check whether a path under the root is ignored.
    ///
    /// Directories are checked as the walker reaches them, so a file inside
    /// an ignored directory is never asked about.
    pub fn is_ignored(&self, path: &Path, is_dir: bool) -> bool {
        match &self.matcher {
            Some(matcher) => matcher.matched(path, is_dir).is_ignore(),
            None => false,
        }
    }
}
