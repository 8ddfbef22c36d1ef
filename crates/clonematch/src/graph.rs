//! SimilarityGraph + ConnectedComponents (C7): dense adjacency over
//! contiguous document ids, with a direction-optimizing parallel BFS for
//! large node counts.

use std::collections::VecDeque;

use lshindex::DocumentPair;
use runtime::{chunk_ranges, expand_frontier, AtomicBitmap};

/// Switch top-down → bottom-up when `frontier_edges * ALPHA > remaining_edges`.
const ALPHA: usize = 14;

/// Below this node count, always use sequential BFS.
pub const DEFAULT_MIN_PARALLEL_SIZE: usize = 100;

/// Undirected graph over document ids `0..n`, stored as dense adjacency
/// since ids are contiguous.
#[derive(Debug, Clone)]
pub struct SimilarityGraph {
    adjacency: Vec<Vec<usize>>,
}

impl SimilarityGraph {
    /// Builds the graph from `n` nodes and the verified pairs as edges.
    pub fn build(n: usize, pairs: &[DocumentPair]) -> Self {
        let mut adjacency = vec![Vec::new(); n];
        for pair in pairs {
            adjacency[pair.id1].push(pair.id2);
            adjacency[pair.id2].push(pair.id1);
        }
        Self { adjacency }
    }

    pub fn node_count(&self) -> usize {
        self.adjacency.len()
    }

    pub fn degree(&self, node: usize) -> usize {
        self.adjacency[node].len()
    }

    pub fn neighbors(&self, node: usize) -> &[usize] {
        &self.adjacency[node]
    }

    fn total_edges(&self) -> usize {
        self.adjacency.iter().map(|n| n.len()).sum::<usize>() / 2
    }

    /// Partitions nodes of degree ≥ 1 into connected components, discarding
    /// isolated nodes and singleton components. Dispatches to a sequential
    /// or direction-optimizing parallel BFS based on `min_parallel_size`.
    pub fn connected_components(&self, min_parallel_size: usize) -> Vec<Vec<usize>> {
        let n = self.node_count();
        if n == 0 {
            return Vec::new();
        }
        if n < min_parallel_size {
            self.sequential_components()
        } else {
            self.parallel_components()
        }
    }

    fn sequential_components(&self) -> Vec<Vec<usize>> {
        let n = self.node_count();
        let mut visited = vec![false; n];
        let mut components = Vec::new();

        for seed in 0..n {
            if visited[seed] || self.degree(seed) == 0 {
                continue;
            }
            let mut component = Vec::new();
            let mut queue = VecDeque::new();
            visited[seed] = true;
            queue.push_back(seed);
            while let Some(node) = queue.pop_front() {
                component.push(node);
                for &neighbor in self.neighbors(node) {
                    if !visited[neighbor] {
                        visited[neighbor] = true;
                        queue.push_back(neighbor);
                    }
                }
            }
            if component.len() >= 2 {
                component.sort_unstable();
                components.push(component);
            }
        }
        components
    }

    fn parallel_components(&self) -> Vec<Vec<usize>> {
        let n = self.node_count();
        let visited = AtomicBitmap::new(n);
        let total_edges = self.total_edges();
        let mut crossed_edges = 0usize;
        let workers = rayon::current_num_threads().max(1);
        let mut components = Vec::new();

        for seed in 0..n {
            if self.degree(seed) == 0 {
                continue;
            }
            if !visited.test_and_set(seed) {
                continue;
            }

            let mut component = vec![seed];
            let mut frontier = vec![seed];
            let mut top_down = true;

            while !frontier.is_empty() {
                let frontier_edges: usize = frontier.iter().map(|&n| self.degree(n)).sum();
                let remaining_edges = total_edges.saturating_sub(crossed_edges);
                if frontier.len() >= 2 * workers && frontier_edges.saturating_mul(ALPHA) > remaining_edges {
                    top_down = false;
                }

                crossed_edges += frontier_edges;

                let next_frontier = if top_down || frontier.len() < 2 * workers {
                    self.expand_top_down(&frontier, &visited, workers)
                } else {
                    self.expand_bottom_up(&frontier, &visited, workers)
                };

                component.extend(next_frontier.iter().copied());
                frontier = next_frontier;
            }

            if component.len() >= 2 {
                component.sort_unstable();
                component.dedup();
                components.push(component);
            }
        }
        components
    }

    fn expand_top_down(&self, frontier: &[usize], visited: &AtomicBitmap, workers: usize) -> Vec<usize> {
        let mut next = expand_frontier(frontier, workers, |node| {
            self.neighbors(node)
                .iter()
                .copied()
                .filter(|&neighbor| visited.test_and_set(neighbor))
                .collect()
        });
        next.sort_unstable();
        next.dedup();
        next
    }

    fn expand_bottom_up(&self, frontier: &[usize], visited: &AtomicBitmap, workers: usize) -> Vec<usize> {
        let frontier_set: std::collections::HashSet<usize> = frontier.iter().copied().collect();
        let n = self.node_count();
        let ranges = chunk_ranges(n, workers);
        use rayon::prelude::*;
        let mut next: Vec<usize> = ranges
            .par_iter()
            .flat_map_iter(|r| {
                r.clone()
                    .filter(|&node| !visited.test(node))
                    .filter(|&node| self.neighbors(node).iter().any(|p| frontier_set.contains(p)))
                    .filter(|&node| visited.test_and_set(node))
                    .collect::<Vec<usize>>()
            })
            .collect();
        next.sort_unstable();
        next
    }
}
