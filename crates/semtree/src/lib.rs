//! Optional semantic clone detection (C5 auxiliary): regroups a file's flat
//! [`token::TokenSequence`] into a shallow bracket-nesting tree, fingerprints
//! every subtree of size `>= minNodes`, and groups subtrees sharing a
//! fingerprint into [`lshindex::CloneGroup`]s of
//! [`lshindex::CloneType::Semantic`].
//!
//! Identifier and literal leaves are already wildcard-folded by
//! [`token::normalize_lexeme`] upstream, so this auxiliary never needs its
//! own AST access — it consumes exactly what [`token::extract`] already
//! produced.
//!
//! ```
//! use semtree::{detect_semantic_clones, SemanticConfig};
//! use token::TokenSequence;
//!
//! let cfg = SemanticConfig::from_min_tokens(10, 42);
//! let groups = detect_semantic_clones(&Vec::<TokenSequence>::new(), &cfg);
//! assert!(groups.is_empty());
//! ```

pub mod config;
pub mod detect;
pub mod fingerprint;

pub use config::SemanticConfig;
pub use detect::detect_semantic_clones;
pub use fingerprint::{collect_subtree_fingerprints, SubtreeFingerprint};
