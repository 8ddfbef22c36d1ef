//! Candidate verification, the similarity graph, and clone assembly
//! (C6 Verifier, C7 SimilarityGraph + ConnectedComponents, C8
//! CloneAssembler).
//!
//! ```
//! use clonematch::{CloneAssembler, MatchConfig, SimilarityGraph};
//! use lshindex::{CloneType, DocumentPair};
//! use std::collections::HashMap;
//!
//! let cfg = MatchConfig::default();
//! let graph = SimilarityGraph::build(4, &[DocumentPair::new(0, 1).unwrap()]);
//! let components = graph.connected_components(cfg.min_parallel_size);
//! assert_eq!(components, vec![vec![0, 1]]);
//!
//! let mut assembler = CloneAssembler::new();
//! let docs = Vec::new();
//! let sources: HashMap<String, Vec<u8>> = HashMap::new();
//! let groups = assembler.assemble(&components, &docs, &HashMap::new(), CloneType::Near, &sources);
//! assert!(groups.is_empty()); // no DocumentView entries to resolve ids against
//! ```

pub mod assembler;
pub mod config;
pub mod graph;
pub mod types;
pub mod verify;

pub use assembler::{sort_groups, CloneAssembler, SourceReader};
pub use config::{MatchConfig, MatchError};
pub use graph::{SimilarityGraph, DEFAULT_MIN_PARALLEL_SIZE};
pub use types::DocumentView;
pub use verify::{verify_pairs, verify_streaming, VerificationProgress, DEFAULT_CHANNEL_CAPACITY};
