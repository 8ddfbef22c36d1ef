//! Token classification shared between the raw AST leaves a parser hands us
//! and the normalized tokens this crate produces.

use serde::{Deserialize, Serialize};

/// Coarse lexical category of a token.
///
/// This mirrors the categories a typical language front-end already
/// distinguishes (keyword vs. identifier vs. literal, ...); the extractor
/// does not reclassify tokens, it only trusts what the parser reports via
/// [`crate::ast::RawLeaf::kind`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TokenKind {
    Keyword,
    Identifier,
    Literal,
    Punctuation,
    Operator,
    Other,
}

impl TokenKind {
    /// True for kinds whose normalized form replaces the raw lexeme with a
    /// stable placeholder (`ID`, `NUM`, `STR`, `KW_<kw>`); punctuation and
    /// operators keep their raw lexeme as their normalized form since they
    /// carry no renaming/literal variance to tolerate.
    pub fn is_renamable(self) -> bool {
        matches!(self, TokenKind::Identifier | TokenKind::Literal)
    }
}
