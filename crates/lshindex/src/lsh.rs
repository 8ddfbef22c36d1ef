//! `LshIndex` (C4): insert MinHash signatures, emit candidate pairs.

use hashbrown::HashMap;
use rayon::prelude::*;

use crate::band::band_buckets;
use crate::config::BandConfig;

/// A banded LSH index over `usize` document ids and their MinHash signatures.
#[derive(Debug, Clone)]
pub struct LshIndex {
    cfg: BandConfig,
    /// `buckets[band_index][bucket_key] -> doc ids that hashed there`.
    buckets: Vec<HashMap<u64, Vec<usize>>>,
}

impl LshIndex {
    pub fn new(cfg: BandConfig) -> Self {
        Self {
            cfg,
            buckets: (0..cfg.bands).map(|_| HashMap::new()).collect(),
        }
    }

    pub fn bands(&self) -> usize {
        self.cfg.bands
    }

    /// Inserts `doc_id`'s signature into every band bucket it hashes to.
    pub fn insert(&mut self, doc_id: usize, signature: &[u64]) {
        let keys = band_buckets(signature, self.cfg);
        for (band_index, key) in keys.into_iter().enumerate() {
            self.buckets[band_index].entry(key).or_default().push(doc_id);
        }
    }

    /// Produces the deduplicated set of candidate pairs `(lo, hi)` with
    /// `lo < hi` that share at least one band bucket.
    ///
    /// Each band is scanned independently (in parallel) into a thread-local
    /// set of pairs; the per-band sets are then merged by union.
    pub fn candidate_pairs(&self) -> Vec<(usize, usize)> {
        let per_band: Vec<hashbrown::HashSet<(usize, usize)>> = self
            .buckets
            .par_iter()
            .map(|bucket| {
                let mut local = hashbrown::HashSet::new();
                for members in bucket.values() {
                    if members.len() < 2 {
                        continue;
                    }
                    for i in 0..members.len() {
                        for j in (i + 1)..members.len() {
                            let (lo, hi) = order_pair(members[i], members[j]);
                            local.insert((lo, hi));
                        }
                    }
                }
                local
            })
            .collect();

        let mut merged = hashbrown::HashSet::new();
        for set in per_band {
            merged.extend(set);
        }
        let mut pairs: Vec<(usize, usize)> = merged.into_iter().collect();
        pairs.sort_unstable();
        pairs
    }
}

fn order_pair(a: usize, b: usize) -> (usize, usize) {
    if a < b {
        (a, b)
    } else {
        (b, a)
    }
}
