//! # polyloclib
//!
//! A concurrent lines-of-code counter for polyglot source trees.
//!
//! ## Overview
//!
//! Files are classified by extension (or by their whole lowercased name,
//! for files like `Makefile`) and counted per language. Work flows through
//! four stages connected by bounded queues:
//!
//! - **Walker**: traverses the tree, honoring `.gitignore` and glob
//!   exclusions, and emits one item per recognized file
//! - **Loader**: reads file contents concurrently
//! - **Metrics**: counts bytes, lines and blank lines concurrently
//! - **Aggregator**: folds the results into per-language totals
//!
//! Each stage closes its output only after all of its in-flight work has
//! been forwarded, so no file is lost or counted twice.
//!
//! ## Example
//!
//! ```rust
//! use polyloclib::{count_directory, CountOptions, FilterConfig};
//! use std::fs;
//! use tempfile::tempdir;
//!
//! let dir = tempdir().unwrap();
//! fs::write(dir.path().join("main.go"), "package main\n").unwrap();
//! fs::write(dir.path().join("readme.md"), "# hi\n\nbye\n").unwrap();
//! fs::write(dir.path().join("photo.png"), "binary").unwrap();
//!
//! let result = count_directory(dir.path(), CountOptions::new()).unwrap();
//! assert_eq!(result.total().files, 2);
//! assert_eq!(result.language("Markdown").unwrap().counts.blank, 1);
//!
//! // Count with filtering
//! let filter = FilterConfig::new().exclude("*.md").unwrap();
//! let result = count_directory(dir.path(), CountOptions::new().filter(filter)).unwrap();
//! assert!(result.language("Markdown").is_none());
//! ```

pub mod counter;
pub mod data;
pub mod error;
pub mod languages;
pub mod options;
pub mod output;
pub mod pipeline;
pub mod source;

pub use counter::{build_runtime, count_directory};
pub use data::{CountResult, Counts, LanguageSummary, WorkItem};
pub use error::PolylocError;
pub use languages::{normalize_extension, LanguageRegistry};
pub use options::{CountOptions, QueueCapacities};
pub use output::{LOCTable, TableRow};
pub use pipeline::{run_pipeline, StageState};
pub use source::{FilterConfig, IgnoreRules};

/// Result type for polyloclib operations
pub type Result<T> = std::result::Result<T, PolylocError>;
