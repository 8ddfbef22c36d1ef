//! Configuration for shingling and MinHash.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Parameters shared by the shingling and MinHash operations.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FingerprintConfig {
    /// Shingle window size `W` (default 5).
    pub shingle_size: usize,
    /// Minimum block token count `B`; also used as the stride basis
    /// `S = max(1, B/2)` (default 50, per `minimumTokens`).
    pub block_tokens: usize,
    /// MinHash signature width `k` (default 128).
    pub num_hashes: usize,
    /// Determinism seed shared by shingling, MinHash, and LSH for a run
    /// (default 42).
    pub seed: u64,
    /// Enable parallel MinHash computation across shingle sets.
    pub use_parallel: bool,
}

impl Default for FingerprintConfig {
    fn default() -> Self {
        Self {
            shingle_size: 5,
            block_tokens: 50,
            num_hashes: 128,
            seed: 42,
            use_parallel: false,
        }
    }
}

impl FingerprintConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_shingle_size(mut self, w: usize) -> Self {
        self.shingle_size = w;
        self
    }

    pub fn with_block_tokens(mut self, b: usize) -> Self {
        self.block_tokens = b;
        self
    }

    pub fn with_num_hashes(mut self, k: usize) -> Self {
        self.num_hashes = k;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_parallel(mut self, use_parallel: bool) -> Self {
        self.use_parallel = use_parallel;
        self
    }

    pub fn validate(&self) -> Result<(), FingerprintError> {
        if self.shingle_size < 1 {
            return Err(FingerprintError::InvalidShingleSize {
                w: self.shingle_size,
            });
        }
        if self.block_tokens < 1 {
            return Err(FingerprintError::InvalidBlockTokens {
                b: self.block_tokens,
            });
        }
        if self.num_hashes < 1 {
            return Err(FingerprintError::InvalidNumHashes { k: self.num_hashes });
        }
        Ok(())
    }
}

/// Errors from invalid fingerprinting configuration.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FingerprintError {
    #[error("invalid config: shingle size W must be >= 1 (got {w})")]
    InvalidShingleSize { w: usize },
    #[error("invalid config: block_tokens B must be >= 1 (got {b})")]
    InvalidBlockTokens { b: usize },
    #[error("invalid config: num_hashes k must be >= 1 (got {k})")]
    InvalidNumHashes { k: usize },
}
