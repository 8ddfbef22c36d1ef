//! [`CachedTokenSequence`]: the persisted `{file, contentHash, tokens}` value.

use serde::{Deserialize, Serialize};
use token::TokenSequence;

/// One cache entry: the content hash a [`TokenSequence`] was extracted
/// under, paired with the sequence itself.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CachedTokenSequence {
    pub content_hash: u64,
    pub tokens: TokenSequence,
}
