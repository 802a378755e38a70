//! Source selection: decide which paths the walker may emit.
//!
//! - **Ignore rules**: patterns from the scan root's ignore file
//! - **File filtering**: user-supplied glob exclusions
//!
//! ## Example
//!
//! ```rust,ignore
//! use polyloclib::source::{FilterConfig, IgnoreRules, DEFAULT_IGNORE_FILE};
//!
//! let rules = IgnoreRules::load(root, DEFAULT_IGNORE_FILE);
//! let filter = FilterConfig::new().exclude("vendor/**")?;
//! ```

pub mod filter;
pub mod rules;

pub use filter::FilterConfig;
pub use rules::{IgnoreRules, DEFAULT_IGNORE_FILE};
