//! Content-hash-keyed token cache with atomic disk persistence (C9
//! TokenCache + ChangeDetector).
//!
//! ```
//! use tokencache::{classify_files, FileStatus, TokenCache};
//! use token::{Span, Token, TokenKind, TokenSequence};
//!
//! let mut cache = TokenCache::new();
//! let seq = TokenSequence {
//!     file: "a.rs".to_string(),
//!     content_hash: 7,
//!     tokens: vec![Token {
//!         kind: TokenKind::Identifier,
//!         raw: "x".to_string(),
//!         normalized: "ID".to_string(),
//!         span: Span { byte_offset: 0, start_line: 1, start_col: 1, end_line: 1, end_col: 2 },
//!     }],
//! };
//! cache.put("a.rs", 7, seq);
//!
//! let classified = classify_files(&cache, [("a.rs", 7), ("b.rs", 1)]);
//! assert_eq!(classified[0].1, FileStatus::Cached);
//! assert_eq!(classified[1].1, FileStatus::ToAnalyze);
//! ```

pub mod cache;
pub mod change;
pub mod entry;
pub mod error;

pub use cache::TokenCache;
pub use change::{classify_files, FileStatus};
pub use entry::CachedTokenSequence;
pub use error::CacheError;
