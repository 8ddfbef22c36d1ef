//! CloneAssembler (C8): maps verified components back to code regions,
//! attaches snippets, and orders the final clone groups.

use std::collections::HashMap;

use lshindex::{Clone, CloneGroup, CloneType};

use crate::types::DocumentView;

/// The I/O seam `CloneAssembler` reads file bytes through for snippet
/// attachment — it never touches the filesystem itself. Callers typically
/// adapt their own source-reading abstraction (or a pre-read
/// `HashMap<String, Vec<u8>>`, which implements this trait below) onto it.
pub trait SourceReader {
    fn read(&self, file: &str) -> Option<Vec<u8>>;
}

impl SourceReader for HashMap<String, Vec<u8>> {
    fn read(&self, file: &str) -> Option<Vec<u8>> {
        self.get(file).cloned()
    }
}

/// Builds [`CloneGroup`]s for near (or semantic) clones out of connected
/// components, memoizing file reads for snippet attachment across the run.
#[derive(Debug, Default)]
pub struct CloneAssembler {
    file_lines: HashMap<String, Vec<String>>,
}

impl CloneAssembler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Produces one [`CloneGroup`] per component. `pair_similarity` looks up
    /// a verified pair's exact Jaccard by `(min(id1,id2), max(id1,id2))`; a
    /// component's similarity is the mean over pairs present in the map
    /// (the edges the verifier actually confirmed, not every possible pair).
    /// `sources` is the sole seam used to read file bytes for snippet
    /// attachment.
    pub fn assemble(
        &mut self,
        components: &[Vec<usize>],
        documents: &[DocumentView],
        pair_similarity: &HashMap<(usize, usize), f64>,
        clone_type: CloneType,
        sources: &dyn SourceReader,
    ) -> Vec<CloneGroup> {
        let by_id: HashMap<usize, &DocumentView> = documents.iter().map(|d| (d.id, d)).collect();

        components
            .iter()
            .filter_map(|component| {
                let mut clones: Vec<Clone> = component
                    .iter()
                    .filter_map(|id| by_id.get(id))
                    .map(|doc| Clone {
                        file: doc.file.clone(),
                        start_line: doc.start_line,
                        end_line: doc.end_line,
                        token_count: doc.token_count,
                        snippet: self.snippet_for(&doc.file, doc.start_line, doc.end_line, sources),
                    })
                    .collect();

                if clones.len() < 2 {
                    return None;
                }
                clones.sort_by(|a, b| (a.file.clone(), a.start_line).cmp(&(b.file.clone(), b.start_line)));

                let similarity = match clone_type {
                    CloneType::Exact => 1.0,
                    _ => mean_pairwise_similarity(component, pair_similarity),
                };
                let fingerprint = CloneGroup::fingerprint_of(&clones);

                Some(CloneGroup {
                    clone_type,
                    similarity,
                    fingerprint,
                    clones,
                })
            })
            .collect()
    }

    /// Reads and memoizes `file`'s lines via `sources`, returning the
    /// snippet for `[start_line-1, end_line)` (1-indexed, inclusive). A
    /// missing file or invalid UTF-8 yields `None` rather than failing the
    /// clone report.
    fn snippet_for(&mut self, file: &str, start_line: u32, end_line: u32, sources: &dyn SourceReader) -> Option<String> {
        if !self.file_lines.contains_key(file) {
            let lines = sources
                .read(file)
                .and_then(|bytes| String::from_utf8(bytes).ok())
                .map(|text| text.lines().map(str::to_string).collect())
                .unwrap_or_default();
            self.file_lines.insert(file.to_string(), lines);
        }
        let lines = self.file_lines.get(file)?;
        let start = start_line.saturating_sub(1) as usize;
        let end = (end_line as usize).min(lines.len());
        if start >= end || lines.is_empty() {
            return None;
        }
        Some(lines[start..end].join("\n"))
    }
}

fn mean_pairwise_similarity(component: &[usize], pair_similarity: &HashMap<(usize, usize), f64>) -> f64 {
    let mut total = 0.0;
    let mut count = 0;
    for i in 0..component.len() {
        for j in (i + 1)..component.len() {
            let key = ordered(component[i], component[j]);
            if let Some(&sim) = pair_similarity.get(&key) {
                total += sim;
                count += 1;
            }
        }
    }
    if count == 0 {
        0.0
    } else {
        total / count as f64
    }
}

fn ordered(a: usize, b: usize) -> (usize, usize) {
    if a < b {
        (a, b)
    } else {
        (b, a)
    }
}

/// Final deterministic ordering: groups by `(type, -occurrences, fingerprint)`,
/// clones within each group by `(file, start_line)` (already applied by
/// [`CloneAssembler::assemble`]).
pub fn sort_groups(mut groups: Vec<CloneGroup>) -> Vec<CloneGroup> {
    groups.sort_by(|a, b| {
        type_rank(a.clone_type)
            .cmp(&type_rank(b.clone_type))
            .then(b.clones.len().cmp(&a.clones.len()))
            .then(a.fingerprint.cmp(&b.fingerprint))
    });
    groups
}

fn type_rank(clone_type: CloneType) -> u8 {
    match clone_type {
        CloneType::Exact => 0,
        CloneType::Near => 1,
        CloneType::Semantic => 2,
    }
}
