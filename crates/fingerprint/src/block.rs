//! `blockDocuments` (C2) and the [`ShingledDocument`] type.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use token::TokenSequence;

use crate::shingles::shingle_stream;

/// A contiguous token-window comparison unit ("Block" in the glossary).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ShingledDocument {
    pub id: usize,
    pub file: String,
    pub token_start: usize,
    pub token_end: usize,
    pub start_line: u32,
    pub end_line: u32,
    pub raw_shingles: HashSet<u64>,
    pub normalized_shingles: HashSet<u64>,
}

/// Number of blocks a sequence of `len` tokens yields for block length `b`
/// and stride `s = max(1, b/2)`: `max(0, (len - b)/s + 1)`.
pub fn block_count(len: usize, b: usize) -> usize {
    if b == 0 || len < b {
        return 0;
    }
    let s = (b / 2).max(1);
    (len - b) / s + 1
}

/// Produces the blocks for one sequence at offsets `0, S, 2S, ...` while
/// `offset + B <= len(tokens)`, assigning ids `start_id + block_index`.
///
/// Each block's shingle sets are built from the W-shingle hashes whose full
/// window lies inside `[offset, offset + b)` — a shingle starting at
/// `offset + b - w` is the last one fully contained in the block.
pub fn block_documents(
    sequence: &TokenSequence,
    b: usize,
    w: usize,
    seed: u64,
    start_id: usize,
) -> Vec<ShingledDocument> {
    let len = sequence.tokens.len();
    let count = block_count(len, b);
    if count == 0 {
        return Vec::new();
    }
    let s = (b / 2).max(1);

    let mut out = Vec::with_capacity(count);
    for block_index in 0..count {
        let offset = block_index * s;
        let end = offset + b;
        let block_tokens = &sequence.tokens[offset..end];

        let raw_shingles: HashSet<u64> = shingle_stream(block_tokens, w, false, seed)
            .into_iter()
            .collect();
        let normalized_shingles: HashSet<u64> = shingle_stream(block_tokens, w, true, seed)
            .into_iter()
            .collect();

        let start_line = block_tokens.first().map(|t| t.span.start_line).unwrap_or(0);
        let end_line = block_tokens.last().map(|t| t.span.end_line).unwrap_or(0);

        out.push(ShingledDocument {
            id: start_id + block_index,
            file: sequence.file.clone(),
            token_start: offset,
            token_end: end,
            start_line,
            end_line,
            raw_shingles,
            normalized_shingles,
        });
    }
    out
}
