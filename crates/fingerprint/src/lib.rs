//! Shingling, block documents, and MinHash signatures.
//!
//! Given a [`token::TokenSequence`], this crate slices it into overlapping
//! [`ShingledDocument`] blocks (`blockDocuments`, C2) and reduces each
//! block's shingle sets to a fixed-width MinHash signature (`minHash`, C3)
//! for downstream LSH banding.
//!
//! ```
//! use fingerprint::{block_documents, minhash_signature, FingerprintConfig};
//! use token::{Span, Token, TokenKind, TokenSequence};
//!
//! let cfg = FingerprintConfig::default().with_block_tokens(2).with_shingle_size(1);
//! let seq = TokenSequence {
//!     file: "a.rs".to_string(),
//!     content_hash: 0,
//!     tokens: vec![
//!         Token {
//!             kind: TokenKind::Keyword,
//!             raw: "fn".to_string(),
//!             normalized: "KW_fn".to_string(),
//!             span: Span { byte_offset: 0, start_line: 1, start_col: 1, end_line: 1, end_col: 2 },
//!         },
//!         Token {
//!             kind: TokenKind::Identifier,
//!             raw: "main".to_string(),
//!             normalized: "ID".to_string(),
//!             span: Span { byte_offset: 3, start_line: 1, start_col: 4, end_line: 1, end_col: 7 },
//!         },
//!     ],
//! };
//! let blocks = block_documents(&seq, cfg.block_tokens, cfg.shingle_size, cfg.seed, 0);
//! for block in &blocks {
//!     let sig = minhash_signature(
//!         &block.normalized_shingles.iter().copied().collect::<Vec<_>>(),
//!         cfg.num_hashes,
//!         cfg.seed,
//!         cfg.use_parallel,
//!     );
//!     assert_eq!(sig.len(), cfg.num_hashes);
//! }
//! ```

pub mod block;
pub mod config;
pub mod minhash;
pub mod shingles;

pub use block::{block_count, block_documents, ShingledDocument};
pub use config::{FingerprintConfig, FingerprintError};
pub use minhash::{estimated_jaccard, exact_jaccard, minhash_signature};
pub use shingles::shingle_stream;
