//! `shingleStream` (C2): rolling-window hashing of a token sequence.

use token::{fnv1a_hash64, Token};

/// Rolling polynomial base. XORed with a seed-derived value so different
/// runs (and the raw vs. normalized streams) don't share rolling state.
const BASE: u64 = 1_000_003;

/// Produces the stream of W-token shingle hashes for `tokens`.
///
/// Each token contributes its FNV-1a hash (over the raw lexeme if
/// `normalized` is false, over the normalized form otherwise); the window
/// hash is a rolling polynomial combination of the last `w` per-token
/// hashes, so each new window reuses the prior window's accumulator in
/// O(1) instead of re-hashing the whole window. Windows shorter than `w`
/// (i.e. `tokens.len() < w`) yield nothing.
pub fn shingle_stream(tokens: &[Token], w: usize, normalized: bool, seed: u64) -> Vec<u64> {
    if w == 0 || tokens.len() < w {
        return Vec::new();
    }

    let per_token: Vec<u64> = tokens
        .iter()
        .map(|t| {
            let bytes = if normalized {
                t.normalized.as_bytes()
            } else {
                t.raw.as_bytes()
            };
            fnv1a_hash64(bytes)
        })
        .collect();

    let base = BASE ^ seed.wrapping_mul(0x9E37_79B9_7F4A_7C15);
    let base_pow_w_minus_1 = base.wrapping_pow(w.saturating_sub(1) as u32);

    let mut out = Vec::with_capacity(per_token.len() - w + 1);
    let mut h: u64 = 0;
    for (i, &v) in per_token.iter().enumerate().take(w) {
        h = h.wrapping_mul(base).wrapping_add(v);
        let _ = i;
    }
    out.push(h);

    for i in w..per_token.len() {
        let leaving = per_token[i - w];
        let entering = per_token[i];
        h = h.wrapping_sub(leaving.wrapping_mul(base_pow_w_minus_1));
        h = h.wrapping_mul(base).wrapping_add(entering);
        out.push(h);
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use token::{Span, TokenKind};

    fn tok(raw: &str, normalized: &str) -> Token {
        Token {
            kind: TokenKind::Identifier,
            raw: raw.to_string(),
            normalized: normalized.to_string(),
            span: Span {
                byte_offset: 0,
                start_line: 1,
                start_col: 1,
                end_line: 1,
                end_col: 1,
            },
        }
    }

    #[test]
    fn empty_for_short_sequence() {
        let tokens = vec![tok("a", "ID"), tok("b", "ID")];
        assert!(shingle_stream(&tokens, 5, false, 42).is_empty());
    }

    #[test]
    fn window_count_matches_formula() {
        let tokens: Vec<Token> = (0..10).map(|i| tok(&format!("t{i}"), "ID")).collect();
        let stream = shingle_stream(&tokens, 5, false, 42);
        assert_eq!(stream.len(), 10 - 5 + 1);
    }

    #[test]
    fn deterministic_for_same_seed() {
        let tokens: Vec<Token> = (0..8).map(|i| tok(&format!("t{i}"), "ID")).collect();
        let a = shingle_stream(&tokens, 3, false, 7);
        let b = shingle_stream(&tokens, 3, false, 7);
        assert_eq!(a, b);
    }

    #[test]
    fn different_seeds_diverge() {
        let tokens: Vec<Token> = (0..8).map(|i| tok(&format!("t{i}"), "ID")).collect();
        let a = shingle_stream(&tokens, 3, false, 1);
        let b = shingle_stream(&tokens, 3, false, 2);
        assert_ne!(a, b);
    }

    #[test]
    fn normalized_stream_ignores_renames() {
        let renamed: Vec<Token> = (0..6).map(|i| tok(&format!("var{i}"), "ID")).collect();
        let original: Vec<Token> = (0..6).map(|i| tok(&format!("name{i}"), "ID")).collect();
        let a = shingle_stream(&renamed, 3, true, 42);
        let b = shingle_stream(&original, 3, true, 42);
        assert_eq!(a, b);
    }

    #[test]
    fn raw_stream_is_sensitive_to_renames() {
        let renamed: Vec<Token> = (0..6).map(|i| tok(&format!("var{i}"), "ID")).collect();
        let original: Vec<Token> = (0..6).map(|i| tok(&format!("name{i}"), "ID")).collect();
        let a = shingle_stream(&renamed, 3, false, 42);
        let b = shingle_stream(&original, 3, false, 42);
        assert_ne!(a, b);
    }
}
