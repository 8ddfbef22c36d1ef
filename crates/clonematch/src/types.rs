//! [`DocumentView`]: the verifier/assembler's read-only projection of a
//! [`fingerprint::ShingledDocument`].

use std::collections::HashSet;

use fingerprint::ShingledDocument;
use lshindex::Clone;

/// Everything downstream of LSH candidate generation needs about one block,
/// without re-deriving it from a [`ShingledDocument`] at every lookup.
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentView {
    pub id: usize,
    pub file: String,
    pub start_line: u32,
    pub end_line: u32,
    pub token_count: usize,
    pub normalized_shingles: HashSet<u64>,
}

impl DocumentView {
    /// Projects a [`Clone`] out of this view for line-overlap checks;
    /// `similarity` is not part of `Clone` itself, so this only exists for
    /// reusing [`lshindex::CloneGroup::lines_overlap`].
    pub fn as_clone(&self, _similarity: f64) -> Clone {
        Clone {
            file: self.file.clone(),
            start_line: self.start_line,
            end_line: self.end_line,
            token_count: self.token_count,
            snippet: None,
        }
    }
}

impl From<&ShingledDocument> for DocumentView {
    fn from(doc: &ShingledDocument) -> Self {
        Self {
            id: doc.id,
            file: doc.file.clone(),
            start_line: doc.start_line,
            end_line: doc.end_line,
            token_count: doc.token_end - doc.token_start,
            normalized_shingles: doc.normalized_shingles.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn converts_from_shingled_document() {
        let block = ShingledDocument {
            id: 3,
            file: "a.rs".to_string(),
            token_start: 0,
            token_end: 50,
            start_line: 1,
            end_line: 20,
            raw_shingles: HashSet::new(),
            normalized_shingles: [1, 2, 3].into_iter().collect(),
        };
        let view = DocumentView::from(&block);
        assert_eq!(view.id, 3);
        assert_eq!(view.token_count, 50);
        assert_eq!(view.normalized_shingles.len(), 3);
    }
}
