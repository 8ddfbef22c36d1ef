//! Subtree fingerprinting: groups a file's flat [`token::TokenSequence`]
//! into a shallow nesting tree by matching bracket punctuation, then
//! canonically serializes and hashes every subtree of size `>= min_nodes`.
//!
//! Identifier and literal leaves are already folded to `ID`/`NUM`/`STR` by
//! [`token::normalize_lexeme`] before they reach this crate, so treating
//! them as wildcards is simply a matter of hashing each token's
//! `normalized` form rather than its `raw` lexeme — no separate AST walk is
//! needed beyond the token stream `token::extract` already produced.

use token::{fnv1a_hash64, Token, TokenKind};

use crate::config::SemanticConfig;

const OPENERS: [&str; 3] = ["(", "[", "{"];
const CLOSERS: [&str; 3] = ["]", ")", "}"];

enum Node {
    Leaf(usize),
    Group(Vec<Node>),
}

/// Groups `tokens` into a shallow nesting tree by matching bracket
/// punctuation. Unmatched closers are treated as ordinary leaves; any
/// groups left open at end-of-stream are closed implicitly.
fn build_tree(tokens: &[Token]) -> Vec<Node> {
    let mut stack: Vec<Vec<Node>> = vec![Vec::new()];

    for (idx, token) in tokens.iter().enumerate() {
        let raw = token.raw.as_str();
        if token.kind == TokenKind::Punctuation && OPENERS.contains(&raw) {
            stack.push(Vec::new());
        } else if token.kind == TokenKind::Punctuation && CLOSERS.contains(&raw) && stack.len() > 1 {
            let group = stack.pop().expect("stack has more than one frame");
            stack.last_mut().expect("root frame always present").push(Node::Group(group));
        } else {
            stack.last_mut().expect("root frame always present").push(Node::Leaf(idx));
        }
    }

    while stack.len() > 1 {
        let group = stack.pop().expect("stack has more than one frame");
        stack.last_mut().expect("root frame always present").push(Node::Group(group));
    }

    stack.pop().unwrap_or_default()
}

/// One fingerprinted subtree within a file.
#[derive(Debug, Clone, PartialEq)]
pub struct SubtreeFingerprint {
    pub file: String,
    pub start_line: u32,
    pub end_line: u32,
    pub leaf_count: usize,
    pub fingerprint: u64,
}

struct WalkResult {
    bytes: Vec<u8>,
    leaf_count: usize,
    start_line: u32,
    end_line: u32,
}

const FIELD_SEP: u8 = 0x1f;

fn walk(
    node: &Node,
    tokens: &[Token],
    cfg: &SemanticConfig,
    file: &str,
    out: &mut Vec<SubtreeFingerprint>,
) -> WalkResult {
    match node {
        Node::Leaf(idx) => {
            let token = &tokens[*idx];
            WalkResult {
                bytes: token.normalized.clone().into_bytes(),
                leaf_count: 1,
                start_line: token.span.start_line,
                end_line: token.span.end_line,
            }
        }
        Node::Group(children) => {
            let mut bytes = Vec::new();
            let mut leaf_count = 0;
            let mut start_line = u32::MAX;
            let mut end_line = 0;

            for child in children {
                let result = walk(child, tokens, cfg, file, out);
                bytes.extend_from_slice(&result.bytes);
                bytes.push(FIELD_SEP);
                leaf_count += result.leaf_count;
                start_line = start_line.min(result.start_line);
                end_line = end_line.max(result.end_line);
            }

            if leaf_count >= cfg.min_nodes && leaf_count > 0 {
                let mut keyed = cfg.seed.to_le_bytes().to_vec();
                keyed.extend_from_slice(&bytes);
                out.push(SubtreeFingerprint {
                    file: file.to_string(),
                    start_line,
                    end_line,
                    leaf_count,
                    fingerprint: fnv1a_hash64(&keyed),
                });
            }

            WalkResult { bytes, leaf_count, start_line, end_line }
        }
    }
}

/// Collects every subtree fingerprint in `file`'s token sequence meeting
/// `cfg.min_nodes`.
pub fn collect_subtree_fingerprints(file: &str, tokens: &[Token], cfg: &SemanticConfig) -> Vec<SubtreeFingerprint> {
    let tree = build_tree(tokens);
    let mut out = Vec::new();
    // The implicit whole-file group is itself eligible, same as any nested one.
    let root = Node::Group(tree);
    walk(&root, tokens, cfg, file, &mut out);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use token::{normalize_lexeme, Span};

    fn tok(kind: TokenKind, raw: &str, line: u32) -> Token {
        Token {
            normalized: normalize_lexeme(kind, raw),
            kind,
            raw: raw.to_string(),
            span: Span { byte_offset: 0, start_line: line, start_col: 1, end_line: line, end_col: 1 + raw.len() as u32 },
        }
    }

    #[test]
    fn subtree_below_min_nodes_yields_nothing() {
        let tokens = vec![tok(TokenKind::Identifier, "x", 1)];
        let cfg = SemanticConfig::new().with_min_nodes(5);
        assert!(collect_subtree_fingerprints("a.rs", &tokens, &cfg).is_empty());
    }

    #[test]
    fn identical_shape_with_different_identifiers_shares_fingerprint() {
        let cfg = SemanticConfig::new().with_min_nodes(2);
        let a = vec![tok(TokenKind::Keyword, "let", 1), tok(TokenKind::Identifier, "foo", 1)];
        let b = vec![tok(TokenKind::Keyword, "let", 5), tok(TokenKind::Identifier, "bar", 5)];
        let fa = collect_subtree_fingerprints("a.rs", &a, &cfg);
        let fb = collect_subtree_fingerprints("b.rs", &b, &cfg);
        assert_eq!(fa.last().unwrap().fingerprint, fb.last().unwrap().fingerprint);
    }

    #[test]
    fn different_keywords_diverge() {
        let cfg = SemanticConfig::new().with_min_nodes(2);
        let a = vec![tok(TokenKind::Keyword, "let", 1), tok(TokenKind::Identifier, "foo", 1)];
        let b = vec![tok(TokenKind::Keyword, "const", 1), tok(TokenKind::Identifier, "foo", 1)];
        let fa = collect_subtree_fingerprints("a.rs", &a, &cfg);
        let fb = collect_subtree_fingerprints("b.rs", &b, &cfg);
        assert_ne!(fa.last().unwrap().fingerprint, fb.last().unwrap().fingerprint);
    }

    #[test]
    fn bracket_groups_form_nested_subtrees() {
        let cfg = SemanticConfig::new().with_min_nodes(1);
        // fn ( a )
        let tokens = vec![
            tok(TokenKind::Keyword, "fn", 1),
            tok(TokenKind::Punctuation, "(", 1),
            tok(TokenKind::Identifier, "a", 1),
            tok(TokenKind::Punctuation, ")", 1),
        ];
        let found = collect_subtree_fingerprints("a.rs", &tokens, &cfg);
        // the inner (a) group and the whole-file group both qualify at min_nodes=1.
        assert!(found.len() >= 2);
    }

    #[test]
    fn line_range_spans_leaves() {
        let cfg = SemanticConfig::new().with_min_nodes(2);
        let tokens = vec![tok(TokenKind::Keyword, "let", 3), tok(TokenKind::Identifier, "foo", 4)];
        let found = collect_subtree_fingerprints("a.rs", &tokens, &cfg);
        let whole = found.last().unwrap();
        assert_eq!(whole.start_line, 3);
        assert_eq!(whole.end_line, 4);
    }

    #[test]
    fn unmatched_closer_is_treated_as_a_leaf() {
        let cfg = SemanticConfig::new().with_min_nodes(1);
        let tokens = vec![tok(TokenKind::Punctuation, ")", 1), tok(TokenKind::Identifier, "x", 1)];
        let found = collect_subtree_fingerprints("a.rs", &tokens, &cfg);
        assert_eq!(found.last().unwrap().leaf_count, 2);
    }
}
