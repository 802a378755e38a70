//! Shared machinery for the fan-out stages.
//!
//! The loader and the metrics stage behave identically apart from the work
//! they do per item: one spawned task per input item, and the output queue
//! is closed only once the input is exhausted *and* every spawned task has
//! forwarded its item. [`fan_out`] implements that once for both.

use std::fmt;
use std::future::Future;

use tokio::sync::mpsc;
use tokio::task::{JoinError, JoinSet};
use tracing::debug;

use crate::data::WorkItem;
use crate::error::PolylocError;
use crate::Result;

/// Lifecycle of a pipeline stage.
///
/// Fan-out stages go `Running` → `Draining` → `Closed`. The aggregator has
/// nothing in flight and goes straight from `Running` to `Closed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StageState {
    /// Accepting input, zero or more sub-tasks in flight
    Running,
    /// Input exhausted, waiting for in-flight sub-tasks
    Draining,
    /// Output end-of-stream signalled
    Closed,
}

impl fmt::Display for StageState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            StageState::Running => "running",
            StageState::Draining => "draining",
            StageState::Closed => "closed",
        };
        f.write_str(name)
    }
}

/// Unwrap a joined task, turning a panic or cancellation into an error.
pub(crate) fn settle<T>(
    stage: &'static str,
    joined: std::result::Result<Result<T>, JoinError>,
) -> Result<T> {
    joined.map_err(|source| PolylocError::TaskFailed { stage, source })?
}

/// Run `work` on every item from `input` concurrently and forward results.
///
/// Returns the number of items forwarded. `output` is dropped only after the
/// last task has been joined, which is what closes the downstream queue.
/// On error the remaining tasks are aborted when the join set drops.
pub(crate) async fn fan_out<F, Fut>(
    stage: &'static str,
    mut input: mpsc::Receiver<WorkItem>,
    output: mpsc::Sender<WorkItem>,
    work: F,
) -> Result<u64>
where
    F: Fn(WorkItem) -> Fut,
    Fut: Future<Output = WorkItem> + Send + 'static,
{
    let mut tasks: JoinSet<Result<()>> = JoinSet::new();
    let mut forwarded: u64 = 0;
    debug!(stage, state = %StageState::Running);

    while let Some(item) = input.recv().await {
        let output = output.clone();
        let task = work(item);
        tasks.spawn(async move {
            let item = task.await;
            output
                .send(item)
                .await
                .map_err(|_| PolylocError::QueueClosed { stage })
        });

        // Reap finished tasks so the set tracks only what is in flight.
        while let Some(joined) = tasks.try_join_next() {
            settle(stage, joined)?;
            forwarded += 1;
        }
    }

    debug!(stage, state = %StageState::Draining, in_flight = tasks.len());
    while let Some(joined) = tasks.join_next().await {
        settle(stage, joined)?;
        forwarded += 1;
    }

    drop(output);
    debug!(stage, state = %StageState::Closed, forwarded);
    Ok(forwarded)
}
