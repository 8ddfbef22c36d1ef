//! Run configuration for the clone-detection pipeline.
//!
//! `DetectConfig` is a plain in-memory struct — there is no file-format
//! loader here, that lives outside this crate's scope. It follows the
//! `serde` + chainable `with_x` + `validate()` convention every stage
//! config in the workspace uses.

use std::path::PathBuf;

use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use runtime::ParallelMode;

/// A kind of clone this run should look for.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum CloneTypeOption {
    Exact,
    Near,
    Semantic,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DetectConfig {
    /// Minimum block length `B` for near-clone blocking (default 50).
    pub minimum_tokens: usize,
    /// Which clone kinds to look for (default: exact + near).
    pub clone_types: Vec<CloneTypeOption>,
    /// Minimum exact-Jaccard similarity `tau` a verified near-clone pair
    /// must meet (default 0.8).
    pub minimum_similarity: f64,
    /// Shingle window size `W` (default 5).
    pub shingle_size: usize,
    /// MinHash signature width `k` (default 128).
    pub num_hashes: usize,
    /// Shared determinism seed for shingling, MinHash, and LSH (default 42).
    pub seed: u64,
    /// How aggressively the runtime parallelizes extraction/blocking work.
    pub parallel_mode: ParallelMode,
    /// Ceiling on worker count; resolved against hardware threads by
    /// `parallel_mode` (default: the host's hardware thread count).
    pub max_concurrency: usize,
    /// Directory for the on-disk token cache. Unset disables incremental
    /// analysis: `detect_clones_incremental` degrades to analyzing every
    /// file every run.
    pub cache_directory: Option<PathBuf>,
    /// Source patterns to exclude from analysis entirely, matched against
    /// each file path.
    pub ignored_patterns: Vec<String>,
    /// Minimum subtree size for the semantic auxiliary (default
    /// `minimum_tokens / 5`, floored at 1). Only consulted when
    /// `clone_types` includes `Semantic` and the `semantic` feature is on.
    pub min_nodes: Option<usize>,
}

impl Default for DetectConfig {
    fn default() -> Self {
        Self {
            minimum_tokens: 50,
            clone_types: vec![CloneTypeOption::Exact, CloneTypeOption::Near],
            minimum_similarity: 0.8,
            shingle_size: 5,
            num_hashes: 128,
            seed: 42,
            parallel_mode: ParallelMode::Safe,
            max_concurrency: std::thread::available_parallelism().map(|n| n.get()).unwrap_or(1),
            cache_directory: None,
            ignored_patterns: Vec::new(),
            min_nodes: None,
        }
    }
}

impl DetectConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_minimum_tokens(mut self, minimum_tokens: usize) -> Self {
        self.minimum_tokens = minimum_tokens;
        self
    }

    pub fn with_clone_types(mut self, clone_types: Vec<CloneTypeOption>) -> Self {
        self.clone_types = clone_types;
        self
    }

    pub fn with_minimum_similarity(mut self, minimum_similarity: f64) -> Self {
        self.minimum_similarity = minimum_similarity;
        self
    }

    pub fn with_shingle_size(mut self, shingle_size: usize) -> Self {
        self.shingle_size = shingle_size;
        self
    }

    pub fn with_num_hashes(mut self, num_hashes: usize) -> Self {
        self.num_hashes = num_hashes;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_parallel_mode(mut self, parallel_mode: ParallelMode) -> Self {
        self.parallel_mode = parallel_mode;
        self
    }

    pub fn with_max_concurrency(mut self, max_concurrency: usize) -> Self {
        self.max_concurrency = max_concurrency;
        self
    }

    pub fn with_cache_directory(mut self, cache_directory: Option<PathBuf>) -> Self {
        self.cache_directory = cache_directory;
        self
    }

    pub fn with_ignored_patterns(mut self, ignored_patterns: Vec<String>) -> Self {
        self.ignored_patterns = ignored_patterns;
        self
    }

    pub fn with_min_nodes(mut self, min_nodes: Option<usize>) -> Self {
        self.min_nodes = min_nodes;
        self
    }

    /// Resolves the configured or default semantic minimum subtree size.
    pub fn effective_min_nodes(&self) -> usize {
        self.min_nodes.unwrap_or((self.minimum_tokens / 5).max(1))
    }

    /// Path the on-disk token cache is stored at, when incremental analysis
    /// is enabled.
    pub fn cache_file(&self) -> Option<PathBuf> {
        self.cache_directory.as_ref().map(|dir| dir.join("tokens.cache"))
    }

    /// Compiles `ignored_patterns`, failing fast on any pattern that isn't
    /// valid regex syntax.
    pub fn compiled_ignored_patterns(&self) -> Result<Vec<Regex>, ConfigError> {
        self.ignored_patterns
            .iter()
            .map(|pattern| {
                Regex::new(pattern).map_err(|err| ConfigError::InvalidIgnorePattern {
                    pattern: pattern.clone(),
                    reason: err.to_string(),
                })
            })
            .collect()
    }

    /// Validates the whole config up front, per the "fail fast before work
    /// begins" policy for `InvalidConfig`.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.minimum_tokens == 0 {
            return Err(ConfigError::InvalidMinimumTokens { value: self.minimum_tokens });
        }
        if self.clone_types.is_empty() {
            return Err(ConfigError::NoCloneTypesSelected);
        }
        if !(self.minimum_similarity > 0.0 && self.minimum_similarity <= 1.0) {
            return Err(ConfigError::InvalidMinimumSimilarity { value: self.minimum_similarity });
        }
        if self.shingle_size == 0 {
            return Err(ConfigError::InvalidShingleSize { value: self.shingle_size });
        }
        if self.num_hashes == 0 {
            return Err(ConfigError::InvalidNumHashes { value: self.num_hashes });
        }
        if self.max_concurrency == 0 {
            return Err(ConfigError::InvalidMaxConcurrency);
        }
        self.compiled_ignored_patterns()?;
        Ok(())
    }
}

/// Errors from an invalid [`DetectConfig`] — surfaced as `InvalidConfig`
/// before any pipeline work begins.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConfigError {
    #[error("invalid config: minimum_tokens must be >= 1 (got {value})")]
    InvalidMinimumTokens { value: usize },
    #[error("invalid config: at least one clone type must be selected")]
    NoCloneTypesSelected,
    #[error("invalid config: minimum_similarity must be in (0, 1] (got {value})")]
    InvalidMinimumSimilarity { value: f64 },
    #[error("invalid config: shingle_size must be >= 1 (got {value})")]
    InvalidShingleSize { value: usize },
    #[error("invalid config: num_hashes must be >= 1 (got {value})")]
    InvalidNumHashes { value: usize },
    #[error("invalid config: max_concurrency must be >= 1")]
    InvalidMaxConcurrency,
    #[error("invalid config: ignored pattern {pattern:?} does not compile: {reason}")]
    InvalidIgnorePattern { pattern: String, reason: String },
}
