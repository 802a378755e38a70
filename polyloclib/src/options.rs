//! Options for a counting run.

use std::sync::Arc;

use crate::languages::LanguageRegistry;
use crate::source::{FilterConfig, DEFAULT_IGNORE_FILE};

/// Capacities of the three hand-off queues.
///
/// Capacity only limits how far an upstream stage can run ahead before it
/// waits. Any value is correct; zero is raised to one when the queues are
/// built.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueueCapacities {
    /// Walker to loader
    pub walk: usize,
    /// Loader to metrics
    pub load: usize,
    /// Metrics to aggregator
    pub measure: usize,
}

impl QueueCapacities {
    /// Explicit capacities for each queue.
    pub fn new(walk: usize, load: usize, measure: usize) -> Self {
        Self {
            walk,
            load,
            measure,
        }
    }

    /// The same capacity for every queue.
    pub fn uniform(capacity: usize) -> Self {
        Self::new(capacity, capacity, capacity)
    }

    /// Capacities scaled to a parallelism level.
    ///
    /// Loaded content is the expensive thing to buffer, so the queue that
    /// carries it is the narrow one.
    pub fn for_parallelism(parallelism: usize) -> Self {
        let parallelism = parallelism.max(1);
        Self::new(parallelism * 20, parallelism, parallelism * 20)
    }
}

impl Default for QueueCapacities {
    fn default() -> Self {
        let parallelism = std::thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(1);
        Self::for_parallelism(parallelism)
    }
}

/// Options for counting a directory tree.
#[derive(Debug, Clone)]
pub struct CountOptions {
    /// User glob exclusions
    pub filter: FilterConfig,
    /// Extension to language table
    pub registry: Arc<LanguageRegistry>,
    /// Ignore file looked up in the root (`None` disables ignore rules)
    pub ignore_file: Option<String>,
    /// Hand-off queue capacities
    pub capacities: QueueCapacities,
    /// Runtime worker threads for [`count_directory`](crate::count_directory)
    /// (`None` = one per core)
    pub worker_threads: Option<usize>,
}

impl Default for CountOptions {
    fn default() -> Self {
        Self {
            filter: FilterConfig::new(),
            registry: Arc::new(LanguageRegistry::with_defaults()),
            ignore_file: Some(DEFAULT_IGNORE_FILE.to_string()),
            capacities: QueueCapacities::default(),
            worker_threads: None,
        }
    }
}

impl CountOptions {
    /// Create new default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set file filter.
    pub fn filter(mut self, filter: FilterConfig) -> Self {
        self.filter = filter;
        self
    }

    /// Use a custom language registry.
    pub fn registry(mut self, registry: LanguageRegistry) -> Self {
        self.registry = Arc::new(registry);
        self
    }

    /// Read ignore rules from a different file in the root.
    pub fn ignore_file(mut self, file_name: impl Into<String>) -> Self {
        self.ignore_file = Some(file_name.into());
        self
    }

    /// Do not consult any ignore file.
    pub fn no_ignore(mut self) -> Self {
        self.ignore_file = None;
        self
    }

    /// Set queue capacities.
    pub fn capacities(mut self, capacities: QueueCapacities) -> Self {
        self.capacities = capacities;
        self
    }

    /// Set the number of runtime worker threads.
    pub fn worker_threads(mut self, threads: usize) -> Self {
        self.worker_threads = Some(threads.max(1));
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capacities_follow_parallelism() {
        let caps = QueueCapacities::for_parallelism(4);

        assert_eq!(caps, QueueCapacities::new(80, 4, 80));
    }

    #[test]
    fn test_capacities_never_scale_from_zero() {
        let caps = QueueCapacities::for_parallelism(0);

        assert_eq!(caps, QueueCapacities::new(20, 1, 20));
    }

    #[test]
    fn test_default_options() {
        let options = CountOptions::new();

        assert_eq!(options.ignore_file.as_deref(), Some(".gitignore"));
        assert!(options.filter.exclude.is_empty());
        assert!(!options.registry.is_empty());
        assert!(options.worker_threads.is_none());
    }

    #[test]
    fn test_builder() {
        let options = CountOptions::new()
            .no_ignore()
            .registry(LanguageRegistry::new().with("go", "Go"))
            .capacities(QueueCapacities::uniform(1))
            .worker_threads(0);

        assert!(options.ignore_file.is_none());
        assert_eq!(options.registry.len(), 1);
        assert_eq!(options.capacities, QueueCapacities::uniform(1));
        assert_eq!(options.worker_threads, Some(1));
    }
}
