//! Token extraction (C1): walks a parser-supplied AST and produces a
//! normalized, ordered [`TokenSequence`] per file.
//!
//! # Pipeline position
//!
//! ```text
//! source file ──▶ parser (external) ──▶ AST ──▶ extract() ──▶ TokenSequence
//! ```
//!
//! This crate does not parse source text — the surface parser is an
//! external collaborator reached purely through the [`AstNode`] trait: this
//! crate never depends on any concrete language grammar. What lives here is
//! the pre-order walk, the token normalization rules (`ID`/`NUM`/`STR`/
//! `KW_<kw>`), and the FNV-1a content hashing the cache layer keys on.
//!
//! # Quick start
//!
//! ```rust
//! use token::ast::{AstNode, LeafKind, RawLeaf};
//! use token::TokenKind;
//!
//! struct Leaf(RawLeaf);
//! impl AstNode for Leaf {
//!     fn as_leaf(&self) -> Option<RawLeaf> { Some(self.0.clone()) }
//!     fn children(&self) -> &[Box<dyn AstNode>] { &[] }
//! }
//! struct Branch(Vec<Box<dyn AstNode>>);
//! impl AstNode for Branch {
//!     fn as_leaf(&self) -> Option<RawLeaf> { None }
//!     fn children(&self) -> &[Box<dyn AstNode>] { &self.0 }
//! }
//!
//! let ast: Box<dyn AstNode> = Box::new(Branch(vec![
//!     Box::new(Leaf(RawLeaf {
//!         kind: LeafKind::Token(TokenKind::Identifier),
//!         lexeme: "x".into(),
//!         byte_offset: 0,
//!         start_line: 1,
//!         start_col: 1,
//!         end_line: 1,
//!         end_col: 2,
//!     })),
//! ]));
//!
//! let seq = token::extract("example.rs", b"x", ast.as_ref()).unwrap();
//! assert_eq!(seq.tokens.len(), 1);
//! assert_eq!(seq.tokens[0].normalized, "ID");
//! ```

pub mod ast;
mod error;
mod hash;
mod kind;
mod sequence;
mod token;

pub use ast::AstNode;
pub use error::ExtractError;
pub use hash::fnv1a_hash64;
pub use kind::TokenKind;
pub use sequence::{extract, TokenSequence};
pub use token::{normalize_lexeme, Span, Token};
