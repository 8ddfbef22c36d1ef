//! Verifier (C6): exact-Jaccard confirmation of LSH candidate pairs.

use std::collections::HashMap;
use std::sync::mpsc::{sync_channel, Receiver};

use rayon::prelude::*;

use fingerprint::exact_jaccard;
use lshindex::{ClonePairInfo, CloneGroup, DocumentPair};

use crate::types::DocumentView;

/// Default bounded-channel capacity for [`verify_streaming`] — four
/// in-flight batches of backpressure before the producer blocks.
pub const DEFAULT_CHANNEL_CAPACITY: usize = 4;

/// Progress update emitted by [`verify_streaming`].
#[derive(Debug, Clone)]
pub struct VerificationProgress {
    pub processed: usize,
    pub total: usize,
    pub batch_results: Vec<ClonePairInfo>,
}

/// Verifies one pair: drops missing documents, drops same-file overlapping
/// pairs, keeps the rest if their exact Jaccard similarity (over normalized
/// shingles) meets `threshold`.
fn verify_one(
    pair: DocumentPair,
    documents: &HashMap<usize, &DocumentView>,
    threshold: f64,
) -> Option<ClonePairInfo> {
    let a = documents.get(&pair.id1)?;
    let b = documents.get(&pair.id2)?;

    if a.file == b.file && CloneGroup::lines_overlap(&a.as_clone(0.0), &b.as_clone(0.0)) {
        return None;
    }

    let similarity = exact_jaccard(&a.normalized_shingles, &b.normalized_shingles);
    if similarity >= threshold {
        Some(ClonePairInfo { pair, similarity })
    } else {
        None
    }
}

/// Verifies every candidate pair, chunked across workers and merged into one
/// list (order of `pairs` is not preserved — the result is treated as a set
/// downstream).
pub fn verify_pairs(
    pairs: &[DocumentPair],
    documents: &[DocumentView],
    threshold: f64,
) -> Vec<ClonePairInfo> {
    let index: HashMap<usize, &DocumentView> = documents.iter().map(|d| (d.id, d)).collect();
    pairs
        .par_iter()
        .filter_map(|&pair| verify_one(pair, &index, threshold))
        .collect()
}

/// Streaming variant: verifies `pairs` in chunks of `batch_size`, emitting a
/// [`VerificationProgress`] per batch through a bounded channel of capacity
/// [`DEFAULT_CHANNEL_CAPACITY`] for backpressure on very large candidate
/// sets. The producer runs on a background thread; the channel closing
/// signals completion.
pub fn verify_streaming(
    pairs: Vec<DocumentPair>,
    documents: Vec<DocumentView>,
    threshold: f64,
    batch_size: usize,
) -> Receiver<VerificationProgress> {
    let (tx, rx) = sync_channel(DEFAULT_CHANNEL_CAPACITY);
    std::thread::spawn(move || {
        let index: HashMap<usize, &DocumentView> = documents.iter().map(|d| (d.id, d)).collect();
        let total = pairs.len();
        let mut processed = 0;
        let batch_size = batch_size.max(1);

        for chunk in pairs.chunks(batch_size) {
            let batch_results: Vec<ClonePairInfo> = chunk
                .par_iter()
                .filter_map(|&pair| verify_one(pair, &index, threshold))
                .collect();
            processed += chunk.len();
            if tx
                .send(VerificationProgress {
                    processed,
                    total,
                    batch_results,
                })
                .is_err()
            {
                break;
            }
        }
    });
    rx
}
