//! Chunked frontier expansion: splits a BFS frontier into contiguous
//! sub-slices for parallel neighbor expansion, and flattens the results
//! back in a deterministic order.

use rayon::prelude::*;

/// Splits `len` items into `workers` contiguous, near-equal chunks (the
/// last chunk absorbs the remainder). Never returns more chunks than
/// items, and always returns at least one chunk for `len > 0`.
pub fn chunk_ranges(len: usize, workers: usize) -> Vec<std::ops::Range<usize>> {
    if len == 0 {
        return Vec::new();
    }
    let workers = workers.max(1).min(len);
    let base = len / workers;
    let remainder = len % workers;

    let mut ranges = Vec::with_capacity(workers);
    let mut start = 0;
    for w in 0..workers {
        let size = base + if w < remainder { 1 } else { 0 };
        ranges.push(start..start + size);
        start += size;
    }
    ranges
}

/// Expands every node in `frontier` via `neighbors_of` across `workers`
/// parallel chunks, flattening the per-node neighbor lists in frontier
/// order (chunk order, then within-chunk order) for deterministic output.
pub fn expand_frontier<F>(frontier: &[usize], workers: usize, neighbors_of: F) -> Vec<usize>
where
    F: Fn(usize) -> Vec<usize> + Sync,
{
    let ranges = chunk_ranges(frontier.len(), workers);
    ranges
        .par_iter()
        .map(|r| {
            frontier[r.clone()]
                .iter()
                .flat_map(|&node| neighbors_of(node))
                .collect::<Vec<usize>>()
        })
        .collect::<Vec<Vec<usize>>>()
        .into_iter()
        .flatten()
        .collect()
}
