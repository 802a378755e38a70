//! High-level LOC counting API.
//!
//! Synchronous entry points over [`run_pipeline`]. Each call builds its own
//! tokio runtime, so callers do not need one.

use std::path::Path;

use tokio::runtime::{Builder, Runtime};

use crate::data::CountResult;
use crate::options::CountOptions;
use crate::pipeline::run_pipeline;
use crate::Result;

/// Build the multi-threaded runtime a count runs on.
///
/// `None` lets tokio size the worker pool from the available cores.
pub fn build_runtime(worker_threads: Option<usize>) -> Result<Runtime> {
    let mut builder = Builder::new_multi_thread();
    builder.enable_all().thread_name("polyloc-worker");
    if let Some(threads) = worker_threads {
        builder.worker_threads(threads.max(1));
    }
    Ok(builder.build()?)
}

/// Count lines of code in a directory tree, grouped by language.
///
/// # Example
///
/// ```rust,ignore
/// use polyloclib::{count_directory, CountOptions, FilterConfig};
///
/// let result = count_directory(".", CountOptions::new())?;
///
/// // Skip vendored code
/// let filter = FilterConfig::new().exclude("vendor/**")?;
/// let result = count_directory(".", CountOptions::new().filter(filter))?;
/// ```
pub fn count_directory(path: impl AsRef<Path>, options: CountOptions) -> Result<CountResult> {
    let runtime = build_runtime(options.worker_threads)?;
    runtime.block_on(run_pipeline(path.as_ref(), &options))
}
