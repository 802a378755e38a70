//! Data model: work items and aggregated statistics.
//!
//! - **WorkItem**: one file moving through the pipeline, owned by one stage
//!   at a time
//! - **Statistics**: `Counts`, `LanguageSummary` and the final `CountResult`

pub mod item;
pub mod stats;

pub use item::WorkItem;
pub use stats::{CountResult, Counts, LanguageSummary};
