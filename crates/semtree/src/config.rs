//! Configuration for semantic tree-fingerprinting.

use serde::{Deserialize, Serialize};

/// Parameters for the optional semantic auxiliary (C5 auxiliary). Disabled
/// by default at the orchestrator level; this crate itself always compiles.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SemanticConfig {
    /// Minimum AST subtree size (leaf count) to qualify for fingerprinting,
    /// default `minTokens / 5`.
    pub min_nodes: usize,
    /// Shared run seed, for consistency with shingling/MinHash.
    pub seed: u64,
}

impl SemanticConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Derives `min_nodes` from a run's `minTokens` (block length `B`),
    /// per the default `minTokens / 5` ratio.
    pub fn from_min_tokens(min_tokens: usize, seed: u64) -> Self {
        Self {
            min_nodes: (min_tokens / 5).max(1),
            seed,
        }
    }

    pub fn with_min_nodes(mut self, min_nodes: usize) -> Self {
        self.min_nodes = min_nodes;
        self
    }
}

impl Default for SemanticConfig {
    fn default() -> Self {
        Self { min_nodes: 10, seed: 42 }
    }
}
