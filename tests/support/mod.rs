//! Shared fixtures for integration tests: a [`SourceParser`] that tokenizes
//! a fixed whitespace-separated body deterministically, without depending
//! on any real language grammar.

use std::collections::HashMap;

use clonescan::SourceParser;
use token::ast::{LeafKind, RawLeaf};
use token::{AstNode, TokenKind};

struct Leaf(RawLeaf);
impl AstNode for Leaf {
    fn as_leaf(&self) -> Option<RawLeaf> {
        Some(self.0.clone())
    }
    fn children(&self) -> &[Box<dyn AstNode>] {
        &[]
    }
}

struct Branch(Vec<Box<dyn AstNode>>);
impl AstNode for Branch {
    fn as_leaf(&self) -> Option<RawLeaf> {
        None
    }
    fn children(&self) -> &[Box<dyn AstNode>] {
        &self.0
    }
}

fn classify(word: &str) -> TokenKind {
    match word {
        "let" | "fn" | "if" | "else" => TokenKind::Keyword,
        "=" | "+" | "-" | "==" => TokenKind::Operator,
        ";" | "(" | ")" | "{" | "}" => TokenKind::Punctuation,
        _ if word.chars().next().is_some_and(|c| c.is_ascii_digit()) => TokenKind::Literal,
        _ => TokenKind::Identifier,
    }
}

fn leaf(word: &str, offset: usize) -> Box<dyn AstNode> {
    Box::new(Leaf(RawLeaf {
        kind: LeafKind::Token(classify(word)),
        lexeme: word.to_string(),
        byte_offset: offset,
        start_line: 1,
        start_col: (offset + 1) as u32,
        end_line: 1,
        end_col: (offset + 1 + word.len()) as u32,
    }))
}

/// A [`SourceParser`] backed by an in-memory map of file name to a
/// whitespace-separated token body, split on spaces at parse time.
pub struct FixedParser {
    sources: HashMap<String, String>,
}

impl FixedParser {
    pub fn new(files: &[(&str, &str)]) -> Self {
        Self { sources: files.iter().map(|(name, body)| (name.to_string(), body.to_string())).collect() }
    }

    /// `count` files, each containing `body` repeated twice (so near-clone
    /// blocking with small `minimum_tokens` has at least one qualifying
    /// window per file).
    pub fn duplicated_block(body: &str, count: usize) -> Self {
        let doubled = format!("{body} {body}");
        let files: Vec<(String, String)> =
            (0..count).map(|i| (format!("f{i}.src"), doubled.clone())).collect();
        Self { sources: files.into_iter().collect() }
    }
}

impl SourceParser for FixedParser {
    fn source(&self, file: &str) -> std::io::Result<Vec<u8>> {
        self.sources
            .get(file)
            .map(|body| body.clone().into_bytes())
            .ok_or_else(|| std::io::Error::new(std::io::ErrorKind::NotFound, "unknown file"))
    }

    fn parse(&self, file: &str, _source: &[u8]) -> Result<Box<dyn AstNode>, String> {
        let body = self.sources.get(file).ok_or_else(|| "unknown file".to_string())?;
        let mut offset = 0;
        let mut children: Vec<Box<dyn AstNode>> = Vec::new();
        for word in body.split_whitespace() {
            children.push(leaf(word, offset));
            offset += word.len() + 1;
        }
        Ok(Box::new(Branch(children)))
    }
}

/// Every file name this parser knows about, in insertion-stable order.
pub fn files_from(parser: &FixedParser) -> Vec<String> {
    let mut files: Vec<String> = parser.sources.keys().cloned().collect();
    files.sort();
    files
}
