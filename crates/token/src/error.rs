//! Errors surfaced while extracting tokens from an AST.

use thiserror::Error;

/// Failures the extraction stage itself can raise.
///
/// The parser's own failure to produce an AST at all (`ParseFailed` in the
/// wider error taxonomy) is the parser's error type, not this crate's — by
/// the time [`crate::extract`] runs, an AST already exists. What remains is
/// validating the caller gave us a sane `file` identifier.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ExtractError {
    #[error("extraction requires a non-empty file path")]
    MissingFile,
}
