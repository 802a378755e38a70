//! Table-ready data structures for LOC output.
//!
//! `LOCTable` is a presentation-ready view of a [`CountResult`] that can be
//! rendered as text or serialized to JSON. It only formats numbers into
//! strings. Row order comes from the result, which is already sorted by
//! language name.

use serde::{Deserialize, Serialize};

use crate::data::stats::Counts;
use crate::data::CountResult;

/// Column headers, label column first.
pub const HEADERS: [&str; 7] = ["Language", "Files", "Lines", "Code", "Comment", "Blank", "Bytes"];

/// Label of the footer row.
pub const TOTAL_LABEL: &str = "Total";

/// A single row in the table (data row or footer).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableRow {
    /// Language name, or "Total" for the footer
    pub label: String,
    /// One value per numeric column, ready for display
    pub values: Vec<String>,
}

impl TableRow {
    fn from_counts(label: impl Into<String>, counts: &Counts) -> Self {
        Self {
            label: label.into(),
            values: format_counts(counts),
        }
    }
}

/// Table-ready LOC data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LOCTable {
    /// Column headers: [Language, Files, Lines, Code, Comment, Blank, Bytes]
    pub headers: Vec<String>,
    /// One row per language
    pub rows: Vec<TableRow>,
    /// Totals across all languages
    pub footer: TableRow,
    /// Files counted with zeroed metrics because they could not be read
    #[serde(default, skip_serializing_if = "is_zero")]
    pub unreadable: u64,
}

impl LOCTable {
    /// Build a table from a finished count.
    pub fn from_count(result: &CountResult) -> Self {
        let rows = result
            .summaries()
            .map(|summary| TableRow::from_counts(summary.name.clone(), &summary.counts))
            .collect();
        let total = result.total();

        LOCTable {
            headers: HEADERS.iter().map(|h| h.to_string()).collect(),
            rows,
            footer: TableRow::from_counts(TOTAL_LABEL, &total),
            unreadable: total.unreadable,
        }
    }
}

fn format_counts(counts: &Counts) -> Vec<String> {
    [
        counts.files,
        counts.lines,
        counts.code,
        counts.comment,
        counts.blank,
        counts.bytes,
    ]
    .iter()
    .map(u64::to_string)
    .collect()
}

fn is_zero(value: &u64) -> bool {
    *value == 0
}
