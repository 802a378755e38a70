//! Output formatting: present a count as a table.
//!
//! - **LOCTable**: headers, one row per language, and a "Total" footer
//! - **TableRow**: a label plus its formatted values
//!
//! LOCTable only turns numbers into strings. Ordering and totals come from
//! [`CountResult`](crate::CountResult).
//!
//! ## Example
//!
//! ```rust
//! use polyloclib::{CountResult, LOCTable, WorkItem};
//!
//! let mut result = CountResult::new();
//! result.add_item(&WorkItem::new("main.go", "main.go", "go", "Go"));
//!
//! let table = LOCTable::from_count(&result);
//! assert_eq!(table.rows[0].label, "Go");
//! assert_eq!(table.footer.label, "Total");
//! ```

pub mod table;

pub use table::{LOCTable, TableRow, HEADERS, TOTAL_LABEL};
