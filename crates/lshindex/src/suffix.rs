//! Suffix array construction (prefix doubling) and the Kasai LCP array.
//!
//! Operates over a stream of `u64` symbols rather than bytes so it can run
//! directly on per-token hash values, with no fixed alphabet bound.

/// Builds the suffix array of `text` in `O(n log^2 n)`: ranks are refined by
/// doubling the compared prefix length each round until every suffix has a
/// distinct rank or the prefix length reaches `text.len()`.
pub fn build_suffix_array(text: &[u64]) -> Vec<usize> {
    let n = text.len();
    if n == 0 {
        return Vec::new();
    }

    let mut sa: Vec<usize> = (0..n).collect();
    let mut rank: Vec<i64> = {
        let mut sorted: Vec<usize> = (0..n).collect();
        sorted.sort_by_key(|&i| text[i]);
        let mut r = vec![0i64; n];
        let mut cur = 0i64;
        for w in 1..n {
            if text[sorted[w]] != text[sorted[w - 1]] {
                cur += 1;
            }
            r[sorted[w]] = cur;
        }
        r
    };
    let mut tmp = vec![0i64; n];

    let mut k = 1usize;
    while k < n {
        let key = |i: &usize| {
            let i = *i;
            let second = if i + k < n { rank[i + k] } else { -1 };
            (rank[i], second)
        };
        sa.sort_by_key(key);

        tmp[sa[0]] = 0;
        for w in 1..n {
            let prev = key(&sa[w - 1]);
            let cur = key(&sa[w]);
            tmp[sa[w]] = tmp[sa[w - 1]] + if cur > prev { 1 } else { 0 };
        }
        std::mem::swap(&mut rank, &mut tmp);

        if rank[sa[n - 1]] as usize == n - 1 {
            break;
        }
        k *= 2;
    }

    sa
}

/// Kasai's algorithm: the LCP array where `lcp[i]` is the length of the
/// longest common prefix between `sa[i-1]` and `sa[i]` (`lcp[0] == 0`).
pub fn kasai_lcp(text: &[u64], sa: &[usize]) -> Vec<usize> {
    let n = text.len();
    if n == 0 {
        return Vec::new();
    }
    let mut rank = vec![0usize; n];
    for (i, &s) in sa.iter().enumerate() {
        rank[s] = i;
    }

    let mut lcp = vec![0usize; n];
    let mut h = 0usize;
    for i in 0..n {
        if rank[i] == 0 {
            h = 0;
            continue;
        }
        let j = sa[rank[i] - 1];
        while i + h < n && j + h < n && text[i + h] == text[j + h] {
            h += 1;
        }
        lcp[rank[i]] = h;
        h = h.saturating_sub(1);
    }
    lcp
}
