//! The counting pipeline.
//!
//! ```text
//! walker ──walk──▶ loader ──load──▶ metrics ──measure──▶ aggregator
//! (blocking)       (task per item)  (task per item)      (single consumer)
//! ```
//!
//! Each arrow is a bounded queue with exactly one owner of its sending
//! side: the stage upstream of it. A stage closes its queue by dropping
//! that sender, after which nothing more can be written. The loader and
//! metrics stages only do so once every task they spawned has forwarded
//! its item, so the aggregator sees end-of-stream only when all emitted
//! files have arrived.
//!
//! If the walker hits a traversal error it closes its queue early. The
//! items already emitted still drain through the later stages, then the
//! run reports the traversal error and the partial tally is discarded.

pub mod aggregator;
pub mod loader;
pub mod metrics;
pub mod stage;
pub mod walker;

use std::io;
use std::path::Path;
use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::{debug, info};

use crate::data::CountResult;
use crate::error::PolylocError;
use crate::options::CountOptions;
use crate::source::IgnoreRules;
use crate::Result;

pub use stage::StageState;
pub use walker::Walker;

/// Count a directory tree on the current tokio runtime.
///
/// Must be called from within a multi-threaded runtime, since the walker
/// runs on the blocking pool. Use [`count_directory`](crate::count_directory)
/// from synchronous code.
pub async fn run_pipeline(root: &Path, options: &CountOptions) -> Result<CountResult> {
    let root = tokio::fs::canonicalize(root)
        .await
        .map_err(|err| match err.kind() {
            io::ErrorKind::NotFound => PolylocError::PathNotFound(root.to_path_buf()),
            _ => PolylocError::Io(err),
        })?;

    let caps = options.capacities;
    let (walk_tx, walk_rx) = mpsc::channel(caps.walk.max(1));
    let (load_tx, load_rx) = mpsc::channel(caps.load.max(1));
    let (measure_tx, measure_rx) = mpsc::channel(caps.measure.max(1));

    let walker_root = root.clone();
    let registry = Arc::clone(&options.registry);
    let ignore_file = options.ignore_file.clone();
    let filter = options.filter.clone();
    let walking = tokio::task::spawn_blocking(move || {
        let rules = match ignore_file {
            Some(name) => IgnoreRules::load(&walker_root, &name),
            None => IgnoreRules::disabled(),
        };
        debug!(stage = walker::STAGE, ignore_rules = rules.is_enabled(), "walking");
        Walker::new(walker_root, registry)
            .rules(rules)
            .filter(filter)
            .run(walk_tx)
    });
    let loading = tokio::spawn(loader::run(walk_rx, load_tx));
    let measuring = tokio::spawn(metrics::run(load_rx, measure_tx));

    let result = aggregator::run(measure_rx).await;

    let [emitted, loaded, measured] = first_failure([
        stage::settle(walker::STAGE, walking.await),
        stage::settle(loader::STAGE, loading.await),
        stage::settle(metrics::STAGE, measuring.await),
    ])?;

    let counted = result.file_count();
    if loaded != emitted || measured != emitted || counted != emitted {
        return Err(PolylocError::ItemsLost { emitted, counted });
    }

    info!(
        root = %root.display(),
        files = counted,
        languages = result.languages.len(),
        "count complete"
    );
    Ok(result)
}

/// Pick the error that explains a failed run.
///
/// A closed queue is only a symptom of some other stage stopping, so any
/// other error takes precedence over it.
fn first_failure(outcomes: [Result<u64>; 3]) -> Result<[u64; 3]> {
    let mut counts = [0; 3];
    let mut symptom = None;

    for (slot, outcome) in counts.iter_mut().zip(outcomes) {
        match outcome {
            Ok(count) => *slot = count,
            Err(err) if err.is_secondary() => {
                symptom.get_or_insert(err);
            }
            Err(err) => return Err(err),
        }
    }

    match symptom {
        Some(err) => Err(err),
        None => Ok(counts),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::QueueCapacities;
    use crate::source::FilterConfig;
    use std::fs;
    use tempfile::tempdir;

    fn write(root: &Path, relative: &str, content: &str) {
        let path = root.join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, content).unwrap();
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_end_to_end_counts() {
        let temp = tempdir().unwrap();
        write(temp.path(), "main.go", "package main\n");
        write(temp.path(), "readme.md", "# hi\n\nbye\n");
        write(temp.path(), "photo.png", "\u{89}PNG\r\n");

        let result = run_pipeline(temp.path(), &CountOptions::new()).await.unwrap();

        let names: Vec<&str> = result.summaries().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["Go", "Markdown"]);

        let go = result.language("Go").unwrap().counts;
        assert_eq!((go.files, go.lines, go.blank, go.bytes), (1, 1, 0, 13));

        let md = result.language("Markdown").unwrap().counts;
        assert_eq!((md.files, md.lines, md.blank, md.bytes), (1, 3, 1, 10));

        let total = result.total();
        assert_eq!(total.files, 2);
        assert_eq!(total.lines, 4);
        assert_eq!(total.bytes, 23);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_no_item_loss_under_backpressure() {
        const FILES: usize = 600;
        let temp = tempdir().unwrap();
        for n in 0..FILES {
            let (dir, ext) = match n % 3 {
                0 => ("go", "go"),
                1 => ("rust/nested", "rs"),
                _ => ("py", "py"),
            };
            write(temp.path(), &format!("{dir}/f{n}.{ext}"), &"x\n".repeat(n % 5));
        }

        let options = CountOptions::new().capacities(QueueCapacities::uniform(1));
        let result = run_pipeline(temp.path(), &options).await.unwrap();

        assert_eq!(result.file_count(), FILES as u64);
        assert_eq!(result.language("Go").unwrap().counts.files, 200);
        assert_eq!(result.language("Rust").unwrap().counts.files, 200);
        assert_eq!(result.language("Python").unwrap().counts.files, 200);

        let expected_lines: u64 = (0..FILES).map(|n| (n % 5) as u64).sum();
        assert_eq!(result.total().lines, expected_lines);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_zero_capacities_are_raised() {
        let temp = tempdir().unwrap();
        write(temp.path(), "a.c", "int x;\n");

        let options = CountOptions::new().capacities(QueueCapacities::uniform(0));
        let result = run_pipeline(temp.path(), &options).await.unwrap();

        assert_eq!(result.file_count(), 1);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_respects_ignore_file_and_git_dir() {
        let temp = tempdir().unwrap();
        write(temp.path(), ".gitignore", "target/\n");
        write(temp.path(), ".git/hooks/post-merge.sh", "echo\n");
        write(temp.path(), "target/out.rs", "fn x() {}\n");
        write(temp.path(), "src/lib.rs", "pub fn x() {}\n");

        let result = run_pipeline(temp.path(), &CountOptions::new()).await.unwrap();

        assert_eq!(result.file_count(), 1);
        assert!(result.language("Shell").is_none());

        let unfiltered = run_pipeline(temp.path(), &CountOptions::new().no_ignore())
            .await
            .unwrap();
        assert_eq!(unfiltered.language("Rust").unwrap().counts.files, 2);
        assert!(unfiltered.language("Shell").is_none());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_glob_filter_applies() {
        let temp = tempdir().unwrap();
        write(temp.path(), "keep.js", "a()\n");
        write(temp.path(), "dist/bundle.js", "b()\n");

        let filter = FilterConfig::new().exclude("dist/**").unwrap();
        let result = run_pipeline(temp.path(), &CountOptions::new().filter(filter))
            .await
            .unwrap();

        assert_eq!(result.file_count(), 1);
    }

    /// Whether permission bits are enforced for this process. Running as
    /// root bypasses them, so permission-based tests have nothing to show.
    #[cfg(unix)]
    fn permissions_enforced(locked: &Path) -> bool {
        if locked.is_dir() {
            fs::read_dir(locked).is_err()
        } else {
            fs::read(locked).is_err()
        }
    }

    #[cfg(unix)]
    fn set_mode(path: &Path, mode: u32) {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(path, fs::Permissions::from_mode(mode)).unwrap();
    }

    #[cfg(unix)]
    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_traversal_error_fails_run_after_draining() {
        let temp = tempdir().unwrap();
        for n in 0..50 {
            write(temp.path(), &format!("f{n}.go"), "package f\n");
        }
        write(temp.path(), "locked/hidden.go", "package hidden\n");
        let locked = temp.path().join("locked");
        set_mode(&locked, 0o000);
        if !permissions_enforced(&locked) {
            set_mode(&locked, 0o755);
            return;
        }

        let options = CountOptions::new().capacities(QueueCapacities::uniform(1));
        let result = run_pipeline(temp.path(), &options).await;
        set_mode(&locked, 0o755);

        match result {
            Err(PolylocError::Traversal { path, .. }) => assert!(path.ends_with("locked")),
            other => panic!("Expected Traversal error, got {other:?}"),
        }
    }

    #[cfg(unix)]
    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_unreadable_file_is_counted_with_zero_metrics() {
        let temp = tempdir().unwrap();
        write(temp.path(), "open.go", "package open\n");
        write(temp.path(), "sealed.go", "package sealed\n\n");
        let sealed = temp.path().join("sealed.go");
        set_mode(&sealed, 0o000);
        if !permissions_enforced(&sealed) {
            set_mode(&sealed, 0o644);
            return;
        }

        let result = run_pipeline(temp.path(), &CountOptions::new()).await;
        set_mode(&sealed, 0o644);

        let go = result.unwrap().language("Go").unwrap().counts;
        assert_eq!(go.files, 2);
        assert_eq!(go.unreadable, 1);
        assert_eq!(go.bytes, 13);
        assert_eq!(go.lines, 1);
        assert_eq!(go.blank, 0);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_missing_root() {
        let temp = tempdir().unwrap();
        let missing = temp.path().join("missing");

        let result = run_pipeline(&missing, &CountOptions::new()).await;

        match result {
            Err(PolylocError::PathNotFound(path)) => assert_eq!(path, missing),
            other => panic!("Expected PathNotFound, got {other:?}"),
        }
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_empty_directory() {
        let temp = tempdir().unwrap();

        let result = run_pipeline(temp.path(), &CountOptions::new()).await.unwrap();

        assert!(result.languages.is_empty());
        assert_eq!(result.total(), crate::data::Counts::new());
    }

    #[test]
    fn test_first_failure_prefers_root_cause() {
        let outcome = first_failure([
            Err(PolylocError::QueueClosed { stage: "walker" }),
            Err(PolylocError::PathNotFound("/x".into())),
            Ok(3),
        ]);

        assert!(matches!(outcome, Err(PolylocError::PathNotFound(_))));
    }

    #[test]
    fn test_first_failure_reports_symptom_alone() {
        let outcome = first_failure([Ok(1), Err(PolylocError::QueueClosed { stage: "loader" }), Ok(1)]);

        assert!(matches!(
            outcome,
            Err(PolylocError::QueueClosed { stage: "loader" })
        ));
    }

    #[test]
    fn test_first_failure_all_ok() {
        assert_eq!(first_failure([Ok(4), Ok(4), Ok(4)]).unwrap(), [4, 4, 4]);
    }
}
