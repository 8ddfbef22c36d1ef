//! Groups subtree fingerprints sharing a hash into semantic clone groups.

use std::collections::HashMap;

use lshindex::{Clone, CloneGroup, CloneType};
use token::TokenSequence;

use crate::config::SemanticConfig;
use crate::fingerprint::{collect_subtree_fingerprints, SubtreeFingerprint};

fn as_clone(fp: &SubtreeFingerprint) -> Clone {
    Clone {
        file: fp.file.clone(),
        start_line: fp.start_line,
        end_line: fp.end_line,
        token_count: fp.leaf_count,
        snippet: None,
    }
}

/// Detects semantic clones across a batch of files' token sequences: every
/// subtree meeting `cfg.min_nodes` is fingerprinted, and subtrees sharing a
/// fingerprint (after dropping same-file overlaps) form a [`CloneGroup`].
pub fn detect_semantic_clones(sequences: &[TokenSequence], cfg: &SemanticConfig) -> Vec<CloneGroup> {
    let mut by_fingerprint: HashMap<u64, Vec<SubtreeFingerprint>> = HashMap::new();

    for seq in sequences {
        for fp in collect_subtree_fingerprints(&seq.file, &seq.tokens, cfg) {
            by_fingerprint.entry(fp.fingerprint).or_default().push(fp);
        }
    }

    let mut groups: Vec<CloneGroup> = Vec::new();
    for (fingerprint, members) in by_fingerprint {
        if members.len() < 2 {
            continue;
        }
        let mut clones: Vec<Clone> = Vec::new();
        for member in &members {
            let candidate = as_clone(member);
            if clones.iter().any(|kept| CloneGroup::lines_overlap(kept, &candidate)) {
                continue;
            }
            clones.push(candidate);
        }
        if clones.len() < 2 {
            continue;
        }
        clones.sort_by(|a, b| a.file.cmp(&b.file).then(a.start_line.cmp(&b.start_line)));
        groups.push(CloneGroup {
            clone_type: CloneType::Semantic,
            similarity: 1.0,
            fingerprint,
            clones,
        });
    }

    groups.sort_by_key(|g| std::cmp::Reverse(g.clones.len()));
    groups
}
