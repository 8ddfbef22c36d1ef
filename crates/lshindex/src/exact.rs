//! ExactCloneDetector (C5): suffix-array longest-common-substring scan over
//! raw per-token hash streams.

use token::TokenSequence;

use crate::suffix::{build_suffix_array, kasai_lcp};
use crate::types::{Clone, CloneGroup, CloneType};

struct FileBoundary {
    file_index: usize,
    start: usize,
    end: usize,
}

/// Concatenates every sequence's raw-token hashes into one stream, with a
/// unique sentinel (distinct from any real hash and from every other
/// sentinel) inserted between files so no suffix's common prefix can cross
/// a file boundary.
fn concatenate(sequences: &[TokenSequence]) -> (Vec<u64>, Vec<FileBoundary>) {
    let mut stream = Vec::new();
    let mut boundaries = Vec::with_capacity(sequences.len());
    for (file_index, seq) in sequences.iter().enumerate() {
        let start = stream.len();
        for token in &seq.tokens {
            stream.push(token_hash(token));
        }
        let end = stream.len();
        boundaries.push(FileBoundary { file_index, start, end });
        stream.push(u64::MAX - file_index as u64);
    }
    (stream, boundaries)
}

fn token_hash(token: &token::Token) -> u64 {
    token::fnv1a_hash64(token.raw.as_bytes())
}

fn locate(boundaries: &[FileBoundary], global_pos: usize) -> Option<(usize, usize)> {
    boundaries
        .iter()
        .find(|b| global_pos >= b.start && global_pos < b.end)
        .map(|b| (b.file_index, global_pos - b.start))
}

/// Runs the suffix-array scan and returns exact [`CloneGroup`]s, each with
/// similarity `1.0` and at least two non-overlapping [`Clone`]s.
///
/// An occurrence's prefix length is clamped to stay within its file (the
/// sentinel inserted by [`concatenate`] guarantees the raw LCP can't cross a
/// boundary, so this is a safety margin rather than a correction).
pub fn detect_exact_clones(sequences: &[TokenSequence], min_tokens: usize) -> Vec<CloneGroup> {
    if min_tokens == 0 || sequences.iter().all(|s| s.tokens.is_empty()) {
        return Vec::new();
    }

    let (stream, boundaries) = concatenate(sequences);
    if stream.is_empty() {
        return Vec::new();
    }

    let sa = build_suffix_array(&stream);
    let lcp = kasai_lcp(&stream, &sa);

    let mut raw_groups: Vec<(usize, Vec<usize>)> = Vec::new();
    let mut run_start = 1usize;
    let mut run_min = usize::MAX;
    let n = sa.len();

    let mut i = 1usize;
    while i <= n {
        let qualifies = i < n && lcp[i] >= min_tokens;
        if qualifies {
            run_min = run_min.min(lcp[i]);
            i += 1;
            continue;
        }
        if run_min != usize::MAX {
            let members: Vec<usize> = sa[(run_start - 1)..i].to_vec();
            raw_groups.push((run_min, members));
        }
        run_start = i + 1;
        run_min = usize::MAX;
        i += 1;
    }

    let mut groups: Vec<CloneGroup> = Vec::new();
    for (length, positions) in raw_groups {
        let mut clones: Vec<Clone> = Vec::new();
        let mut occurrences: Vec<(usize, usize, usize)> = positions
            .iter()
            .filter_map(|&pos| {
                let (file_index, local) = locate(&boundaries, pos)?;
                let file_len = sequences[file_index].tokens.len();
                if local + length > file_len {
                    return None;
                }
                Some((file_index, local, local + length))
            })
            .collect();
        occurrences.sort_unstable();
        occurrences.dedup();

        for (file_index, start, end) in occurrences {
            let seq = &sequences[file_index];
            let start_line = seq.tokens[start].span.start_line;
            let end_line = seq.tokens[end - 1].span.end_line;
            let candidate = Clone {
                file: seq.file.clone(),
                start_line,
                end_line,
                token_count: length,
                snippet: None,
            };
            if clones.iter().any(|c| CloneGroup::lines_overlap(c, &candidate)) {
                continue;
            }
            clones.push(candidate);
        }

        if clones.len() >= 2 {
            let fingerprint = CloneGroup::fingerprint_of(&clones);
            groups.push(CloneGroup {
                clone_type: CloneType::Exact,
                similarity: 1.0,
                fingerprint,
                clones,
            });
        }
    }

    dedup_contained_groups(groups)
}

/// Drops a group if every one of its clones is contained (same file,
/// `start_line >= other.start_line && end_line <= other.end_line`) within a
/// clone of some strictly longer kept group.
fn dedup_contained_groups(mut groups: Vec<CloneGroup>) -> Vec<CloneGroup> {
    groups.sort_by(|a, b| {
        let a_len = a.clones.first().map(|c| c.token_count).unwrap_or(0);
        let b_len = b.clones.first().map(|c| c.token_count).unwrap_or(0);
        b_len.cmp(&a_len)
    });

    let mut kept: Vec<CloneGroup> = Vec::new();
    'outer: for group in groups {
        for longer in &kept {
            let all_contained = group.clones.iter().all(|clone| {
                longer.clones.iter().any(|other| {
                    clone.file == other.file
                        && clone.start_line >= other.start_line
                        && clone.end_line <= other.end_line
                        && !(clone.start_line == other.start_line && clone.end_line == other.end_line)
                })
            });
            if all_contained {
                continue 'outer;
            }
        }
        kept.push(group);
    }
    kept
}
