//! Final stage: fold measured items into per-language totals.
//!
//! There is exactly one aggregator per run and it is the only owner of the
//! summary map, so accumulation needs no locking. Sums and counts do not
//! depend on arrival order.

use tokio::sync::mpsc;
use tracing::debug;

use super::stage::StageState;
use crate::data::{CountResult, WorkItem};

pub(crate) const STAGE: &str = "aggregator";

/// Drain `input` and return the accumulated result.
pub(crate) async fn run(mut input: mpsc::Receiver<WorkItem>) -> CountResult {
    let mut result = CountResult::new();
    debug!(stage = STAGE, state = %StageState::Running);

    while let Some(item) = input.recv().await {
        result.add_item(&item);
    }

    debug!(stage = STAGE, state = %StageState::Closed, files = result.file_count());
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    fn measured(language: &str, lines: u64) -> WorkItem {
        WorkItem {
            language: language.to_string(),
            lines,
            bytes: lines * 10,
            ..WorkItem::default()
        }
    }

    #[tokio::test]
    async fn test_aggregates_until_end_of_stream() {
        let (tx, rx) = mpsc::channel(1);
        let producer = tokio::spawn(async move {
            for n in 0..10 {
                let language = if n % 3 == 0 { "Go" } else { "Rust" };
                tx.send(measured(language, n)).await.unwrap();
            }
        });

        let result = run(rx).await;
        producer.await.unwrap();

        assert_eq!(result.file_count(), 10);
        assert_eq!(result.language("Go").unwrap().counts.files, 4);
        assert_eq!(result.language("Rust").unwrap().counts.files, 6);
        assert_eq!(result.total().lines, (0..10).sum::<u64>());
    }

    #[tokio::test]
    async fn test_empty_stream() {
        let (tx, rx) = mpsc::channel::<WorkItem>(1);
        drop(tx);

        let result = run(rx).await;

        assert!(result.languages.is_empty());
        assert_eq!(result.file_count(), 0);
    }
}
