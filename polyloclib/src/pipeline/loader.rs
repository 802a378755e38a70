//! Content loading: one concurrent read per item.
//!
//! A read that fails is not an error. The item carries empty content and
//! `read_failed`, so it is still counted as a file with zeroed metrics.

use tokio::sync::mpsc;
use tracing::debug;

use super::stage::fan_out;
use crate::data::WorkItem;
use crate::Result;

pub(crate) const STAGE: &str = "loader";

/// Read the file behind `item` into memory.
pub async fn load(mut item: WorkItem) -> WorkItem {
    match tokio::fs::read(&item.path).await {
        Ok(content) => item.content = Some(content),
        Err(err) => {
            debug!(path = %item.path.display(), error = %err, "read failed, counting as empty");
            item.content = Some(Vec::new());
            item.read_failed = true;
        }
    }
    item
}

/// Load every item from `input` and forward it to `output`.
pub(crate) async fn run(
    input: mpsc::Receiver<WorkItem>,
    output: mpsc::Sender<WorkItem>,
) -> Result<u64> {
    fan_out(STAGE, input, output, load).await
}
