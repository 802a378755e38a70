//! Glob-based path exclusion.
//!
//! Patterns are matched against the path relative to the scan root, so
//! `vendor/**` and `**/*.min.js` both behave the way a user would expect.

use std::path::Path;

use glob::Pattern;

use crate::error::PolylocError;
use crate::Result;

/// Configuration for user-supplied exclusions.
#[derive(Debug, Clone, Default)]
pub struct FilterConfig {
    /// Glob patterns to exclude
    pub exclude: Vec<Pattern>,
}

impl FilterConfig {
    /// Create a new empty filter config (excludes nothing).
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an exclude pattern.
    pub fn exclude(mut self, pattern: &str) -> Result<Self> {
        let pat = Pattern::new(pattern).map_err(|e| PolylocError::InvalidGlob {
            pattern: pattern.to_string(),
            message: e.to_string(),
        })?;
        self.exclude.push(pat);
        Ok(self)
    }

    /// Add multiple exclude patterns.
    pub fn exclude_many(mut self, patterns: &[&str]) -> Result<Self> {
        for pattern in patterns {
            self = self.exclude(pattern)?;
        }
        Ok(self)
    }

    /// Check if a root-relative path is excluded.
    pub fn excludes(&self, relative: &Path) -> bool {
        if self.exclude.is_empty() {
            return false;
        }
        let path_str = relative.to_string_lossy();
        self.exclude.iter().any(|pattern| pattern.matches(&path_str))
    }
}
