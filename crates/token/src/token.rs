//! The normalized [`Token`] type produced by [`crate::extract`].

use serde::{Deserialize, Serialize};

use crate::kind::TokenKind;

/// Source position of a token: 1-indexed line/column plus a byte offset for
/// callers that want a single comparable coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Span {
    pub byte_offset: usize,
    pub start_line: u32,
    pub start_col: u32,
    pub end_line: u32,
    pub end_col: u32,
}

/// A single token with its raw lexeme, normalized form, and span.
///
/// The normalized form is what shingling and MinHash hash for near-clone
/// detection: two tokens with different `raw` but equal `kind` and
/// `normalized` are interchangeable under identifier/literal renaming.
///
/// ```rust
/// use token::{normalize_lexeme, TokenKind};
///
/// assert_eq!(normalize_lexeme(TokenKind::Identifier, "total_count"), "ID");
/// assert_eq!(normalize_lexeme(TokenKind::Literal, "42"), "NUM");
/// assert_eq!(normalize_lexeme(TokenKind::Keyword, "while"), "KW_while");
/// assert_eq!(normalize_lexeme(TokenKind::Operator, "+="), "+=");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    pub kind: TokenKind,
    pub raw: String,
    pub normalized: String,
    pub span: Span,
}

/// Computes the normalized form of a lexeme given its kind.
///
/// Identifiers fold to `ID`, numeric/string/char literals fold to `NUM` or
/// `STR` depending on a simple leading-character sniff, keywords keep a
/// `KW_`-prefixed form (keywords are not renamable so collapsing them would
/// lose information the verifier needs), and punctuation/operators pass
/// through unchanged.
pub fn normalize_lexeme(kind: TokenKind, raw: &str) -> String {
    match kind {
        TokenKind::Identifier => "ID".to_string(),
        TokenKind::Literal => {
            if raw.starts_with('"') || raw.starts_with('\'') {
                "STR".to_string()
            } else {
                "NUM".to_string()
            }
        }
        TokenKind::Keyword => format!("KW_{raw}"),
        TokenKind::Punctuation | TokenKind::Operator | TokenKind::Other => raw.to_string(),
    }
}
