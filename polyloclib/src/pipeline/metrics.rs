//! Line and byte statistics, computed concurrently per item.
//!
//! The counts are byte-level and language-agnostic:
//!
//! - `lines` is the number of `\n` bytes, so a final line without a
//!   terminator is not counted
//! - `blank` is the number of non-overlapping `\n\n` pairs, a rough proxy
//!   that undercounts CRLF files and runs of several empty lines
//!
//! Code and comment counts are not computed and stay zero.

use tokio::sync::mpsc;

use super::stage::fan_out;
use crate::data::WorkItem;
use crate::Result;

pub(crate) const STAGE: &str = "metrics";

/// Count `\n` bytes.
pub fn count_lines(content: &[u8]) -> u64 {
    content.iter().filter(|&&b| b == b'\n').count() as u64
}

/// Count non-overlapping `\n\n` pairs.
pub fn count_blank(content: &[u8]) -> u64 {
    let mut count = 0;
    let mut i = 0;
    while i + 1 < content.len() {
        if content[i] == b'\n' && content[i + 1] == b'\n' {
            count += 1;
            i += 2;
        } else {
            i += 1;
        }
    }
    count
}

/// Fill in the statistics of a loaded item and release its content.
pub fn measure(mut item: WorkItem) -> WorkItem {
    let content = item.content.take().unwrap_or_default();
    item.bytes = content.len() as u64;
    item.lines = count_lines(&content);
    item.blank = count_blank(&content);
    item
}

/// Measure every item from `input` and forward it to `output`.
pub(crate) async fn run(
    input: mpsc::Receiver<WorkItem>,
    output: mpsc::Sender<WorkItem>,
) -> Result<u64> {
    fan_out(STAGE, input, output, |item| async move { measure(item) }).await
}
