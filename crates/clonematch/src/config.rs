//! Configuration shared by the verifier and similarity graph.

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MatchConfig {
    /// Minimum exact Jaccard similarity `τ` a candidate pair must meet.
    pub threshold: f64,
    /// Node count below which connected-components uses sequential BFS.
    pub min_parallel_size: usize,
    /// Batch size for `verify_streaming`.
    pub batch_size: usize,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            threshold: 0.7,
            min_parallel_size: crate::graph::DEFAULT_MIN_PARALLEL_SIZE,
            batch_size: 256,
        }
    }
}

impl MatchConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }

    pub fn with_min_parallel_size(mut self, n: usize) -> Self {
        self.min_parallel_size = n;
        self
    }

    pub fn with_batch_size(mut self, n: usize) -> Self {
        self.batch_size = n;
        self
    }

    pub fn validate(&self) -> Result<(), MatchError> {
        if !(self.threshold > 0.0 && self.threshold <= 1.0) {
            return Err(MatchError::InvalidThreshold { t: self.threshold });
        }
        if self.batch_size == 0 {
            return Err(MatchError::InvalidBatchSize);
        }
        Ok(())
    }
}

#[derive(Debug, Error, Clone, PartialEq)]
pub enum MatchError {
    #[error("invalid config: threshold must be in (0, 1] (got {t})")]
    InvalidThreshold { t: f64 },
    #[error("invalid config: batch_size must be >= 1")]
    InvalidBatchSize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert!(MatchConfig::default().validate().is_ok());
    }

    #[test]
    fn rejects_zero_threshold() {
        let cfg = MatchConfig::new().with_threshold(0.0);
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn rejects_zero_batch_size() {
        let cfg = MatchConfig::new().with_batch_size(0);
        assert_eq!(cfg.validate(), Err(MatchError::InvalidBatchSize));
    }
}
