//! [`TokenSequence`] and the [`extract`] operation (C1 TokenExtractor).

use serde::{Deserialize, Serialize};

use crate::ast::{AstNode, LeafKind};
use crate::error::ExtractError;
use crate::hash::fnv1a_hash64;
use crate::token::{normalize_lexeme, Span, Token};

/// Ordered tokens for one file, plus the file's identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenSequence {
    pub file: String,
    pub content_hash: u64,
    pub tokens: Vec<Token>,
}

impl TokenSequence {
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

/// Walks `ast` in pre-order (source order, for any parser building children
/// left-to-right), excludes trivia (whitespace/comments/doc-comments/
/// ignore-directive markers), and emits a [`TokenSequence`] for `file`.
///
/// `source_bytes` is hashed with FNV-1a to produce the sequence's content
/// hash — the same value [`crate::hash::fnv1a_hash64`] would compute over
/// the file's raw bytes, so cache validity checks agree regardless of
/// whether the caller re-reads the file or reuses bytes it already had.
pub fn extract(
    file: &str,
    source_bytes: &[u8],
    ast: &dyn AstNode,
) -> Result<TokenSequence, ExtractError> {
    if file.trim().is_empty() {
        return Err(ExtractError::MissingFile);
    }

    let mut tokens = Vec::new();
    walk(ast, &mut tokens);

    Ok(TokenSequence {
        file: file.to_string(),
        content_hash: fnv1a_hash64(source_bytes),
        tokens,
    })
}

fn walk(node: &dyn AstNode, out: &mut Vec<Token>) {
    if let Some(leaf) = node.as_leaf() {
        if let LeafKind::Token(kind) = leaf.kind {
            let normalized = normalize_lexeme(kind, &leaf.lexeme);
            out.push(Token {
                kind,
                raw: leaf.lexeme,
                normalized,
                span: Span {
                    byte_offset: leaf.byte_offset,
                    start_line: leaf.start_line,
                    start_col: leaf.start_col,
                    end_line: leaf.end_line,
                    end_col: leaf.end_col,
                },
            });
        }
        return;
    }
    for child in node.children() {
        walk(child.as_ref(), out);
    }
}
