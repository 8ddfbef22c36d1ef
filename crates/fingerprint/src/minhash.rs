//! MinHash (C3): k-dimensional signatures over a shingle set using a
//! universal hash family `f_i(x) = (a_i*x + b_i) mod p`.

use rayon::prelude::*;

/// A large prime below 2^64 (2^61 - 1, a Mersenne prime) used as the
/// modulus; multiplication is carried out in `u128` so `a*x` never
/// overflows before the reduction.
const P: u64 = (1u64 << 61) - 1;

/// Deterministically expands `seed` into `k` non-degenerate `(a, b)`
/// coefficient pairs for the universal hash family.
fn hash_family(k: usize, seed: u64) -> Vec<(u64, u64)> {
    let mut state = seed;
    (0..k)
        .map(|_| {
            let a = loop {
                state = splitmix64(state);
                let candidate = state % P;
                if candidate != 0 {
                    break candidate;
                }
            };
            state = splitmix64(state);
            let b = state % P;
            (a, b)
        })
        .collect()
}

fn splitmix64(mut x: u64) -> u64 {
    x = x.wrapping_add(0x9E37_79B9_7F4A_7C15);
    let mut z = x;
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

fn apply(a: u64, b: u64, x: u64) -> u64 {
    let ax = (a as u128) * ((x % P) as u128);
    ((ax + b as u128) % P as u128) as u64
}

/// Computes the k-dimensional MinHash signature of a shingle set.
///
/// `sig[i] = min_{h in shingles} f_i(h)`. An empty shingle set yields a
/// signature of all-`u64::MAX` (the identity for a min-reduction), and
/// `k == 0` yields an empty signature.
pub fn minhash_signature(shingles: &[u64], k: usize, seed: u64, use_parallel: bool) -> Vec<u64> {
    if k == 0 {
        return Vec::new();
    }
    if shingles.is_empty() {
        return vec![u64::MAX; k];
    }

    let family = hash_family(k, seed);
    let compute = |&(a, b): &(u64, u64)| shingles.iter().map(|&h| apply(a, b, h)).min().unwrap();

    if use_parallel {
        family.par_iter().map(compute).collect()
    } else {
        family.iter().map(compute).collect()
    }
}

/// Fraction of slots where two signatures agree — the MinHash estimator of
/// Jaccard similarity.
pub fn estimated_jaccard(sig_a: &[u64], sig_b: &[u64]) -> f64 {
    if sig_a.is_empty() || sig_b.is_empty() || sig_a.len() != sig_b.len() {
        return 0.0;
    }
    let agree = sig_a
        .iter()
        .zip(sig_b.iter())
        .filter(|(a, b)| a == b)
        .count();
    agree as f64 / sig_a.len() as f64
}

/// Exact Jaccard similarity `|H1 ∩ H2| / |H1 ∪ H2|` over the original sets.
pub fn exact_jaccard(a: &std::collections::HashSet<u64>, b: &std::collections::HashSet<u64>) -> f64 {
    if a.is_empty() && b.is_empty() {
        return 1.0;
    }
    let intersection = a.intersection(b).count();
    let union = a.union(b).count();
    if union == 0 {
        0.0
    } else {
        intersection as f64 / union as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn deterministic_for_same_seed() {
        let shingles = vec![1, 2, 3, 4, 5];
        let a = minhash_signature(&shingles, 16, 42, false);
        let b = minhash_signature(&shingles, 16, 42, false);
        assert_eq!(a, b);
    }

    #[test]
    fn parallel_matches_sequential() {
        let shingles: Vec<u64> = (0..500).collect();
        let seq = minhash_signature(&shingles, 32, 7, false);
        let par = minhash_signature(&shingles, 32, 7, true);
        assert_eq!(seq, par);
    }

    #[test]
    fn different_seeds_diverge() {
        let shingles = vec![10, 20, 30];
        let a = minhash_signature(&shingles, 8, 1, false);
        let b = minhash_signature(&shingles, 8, 2, false);
        assert_ne!(a, b);
    }

    #[test]
    fn empty_shingles_yield_max_sentinel() {
        let sig = minhash_signature(&[], 4, 42, false);
        assert_eq!(sig, vec![u64::MAX; 4]);
    }

    #[test]
    fn zero_k_yields_empty_signature() {
        assert!(minhash_signature(&[1, 2, 3], 0, 42, false).is_empty());
    }

    #[test]
    fn identical_sets_estimate_full_similarity() {
        let shingles = vec![1, 2, 3, 4, 5, 6, 7, 8];
        let sig = minhash_signature(&shingles, 64, 42, false);
        assert_eq!(estimated_jaccard(&sig, &sig), 1.0);
    }

    #[test]
    fn disjoint_sets_estimate_lower_similarity_than_identical() {
        let a = minhash_signature(&(0..50).collect::<Vec<_>>(), 128, 42, false);
        let b = minhash_signature(&(1000..1050).collect::<Vec<_>>(), 128, 42, false);
        let sim = estimated_jaccard(&a, &b);
        assert!(sim < 1.0);
    }

    #[test]
    fn exact_jaccard_matches_definition() {
        let a: HashSet<u64> = [1, 2, 3, 4].into_iter().collect();
        let b: HashSet<u64> = [3, 4, 5, 6].into_iter().collect();
        assert_eq!(exact_jaccard(&a, &b), 2.0 / 6.0);
    }

    #[test]
    fn exact_jaccard_of_identical_sets_is_one() {
        let a: HashSet<u64> = [1, 2, 3].into_iter().collect();
        assert_eq!(exact_jaccard(&a, &a), 1.0);
    }
}
