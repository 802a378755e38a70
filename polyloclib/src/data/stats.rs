//! Core data structures for per-language statistics

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::ops::{Add, AddAssign};

use super::item::WorkItem;

/// Summed counters for a set of files.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Counts {
    /// Number of files
    pub files: u64,
    /// Total size in bytes
    pub bytes: u64,
    /// Line terminators seen
    pub lines: u64,
    /// Always zero, kept for the report layout
    pub code: u64,
    /// Always zero, kept for the report layout
    pub comment: u64,
    /// Approximate blank lines (`\n\n` occurrences)
    pub blank: u64,
    /// Files counted with zeroed metrics because they could not be read
    pub unreadable: u64,
}

impl Counts {
    /// Create new zeroed counts
    pub fn new() -> Self {
        Self::default()
    }

    /// Counts contributed by a single measured item.
    pub fn from_item(item: &WorkItem) -> Self {
        Self {
            files: 1,
            bytes: item.bytes,
            lines: item.lines,
            code: item.code,
            comment: item.comment,
            blank: item.blank,
            unreadable: u64::from(item.read_failed),
        }
    }
}

impl Add for Counts {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self {
            files: self.files + other.files,
            bytes: self.bytes + other.bytes,
            lines: self.lines + other.lines,
            code: self.code + other.code,
            comment: self.comment + other.comment,
            blank: self.blank + other.blank,
            unreadable: self.unreadable + other.unreadable,
        }
    }
}

impl AddAssign for Counts {
    fn add_assign(&mut self, other: Self) {
        self.files += other.files;
        self.bytes += other.bytes;
        self.lines += other.lines;
        self.code += other.code;
        self.comment += other.comment;
        self.blank += other.blank;
        self.unreadable += other.unreadable;
    }
}

/// Statistics for one language
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LanguageSummary {
    /// Language label
    pub name: String,
    /// Summed counters
    #[serde(flatten)]
    pub counts: Counts,
}

impl LanguageSummary {
    /// Create an empty summary for a language
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            counts: Counts::new(),
        }
    }

    /// Add one measured item
    pub fn add_item(&mut self, item: &WorkItem) {
        self.counts += Counts::from_item(item);
    }
}

/// Result of counting a directory tree.
///
/// Languages are keyed by label, so iteration order is alphabetical and
/// stable across runs. The grand total is always derived from the buckets.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountResult {
    /// Per-language statistics
    pub languages: BTreeMap<String, LanguageSummary>,
}

impl CountResult {
    /// Create a new empty result.
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one measured item into its language bucket.
    pub fn add_item(&mut self, item: &WorkItem) {
        self.languages
            .entry(item.language.clone())
            .or_insert_with(|| LanguageSummary::new(item.language.clone()))
            .add_item(item);
    }

    /// Grand total across every language.
    pub fn total(&self) -> Counts {
        self.languages
            .values()
            .fold(Counts::new(), |acc, summary| acc + summary.counts)
    }

    /// Number of files counted.
    pub fn file_count(&self) -> u64 {
        self.total().files
    }

    /// Summary for a language, if any file of it was seen.
    pub fn language(&self, name: &str) -> Option<&LanguageSummary> {
        self.languages.get(name)
    }

    /// Iterate summaries in label order.
    pub fn summaries(&self) -> impl Iterator<Item = &LanguageSummary> {
        self.languages.values()
    }
}
