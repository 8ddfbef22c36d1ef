//! Parallelism mode selection.

use serde::{Deserialize, Serialize};

/// How aggressively the runtime parallelizes work.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum ParallelMode {
    /// Force single-threaded execution regardless of `max_concurrency`.
    None,
    /// Bounded parallelism at a conservative concurrency (default).
    #[default]
    Safe,
    /// Bounded parallelism at the configured maximum concurrency.
    Maximum,
}

impl ParallelMode {
    /// Resolves the effective worker count for this mode given the
    /// hardware thread count and a configured ceiling.
    pub fn effective_concurrency(self, hardware_threads: usize, configured_max: usize) -> usize {
        match self {
            ParallelMode::None => 1,
            ParallelMode::Safe => hardware_threads.min(configured_max).max(1),
            ParallelMode::Maximum => configured_max.max(1),
        }
    }
}
