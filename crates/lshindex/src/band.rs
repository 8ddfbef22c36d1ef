//! Splits a MinHash signature into band buckets.

use token::fnv1a_hash64;

use crate::config::BandConfig;

/// Hashes the `r` signature values of band `band_index` into one bucket key.
///
/// Values are serialized little-endian and hashed with FNV-1a so two
/// signatures agree on a band iff all `r` of that band's rows are equal.
pub fn band_bucket(signature: &[u64], cfg: BandConfig, band_index: usize) -> u64 {
    let start = band_index * cfg.rows;
    let end = start + cfg.rows;
    let mut bytes = Vec::with_capacity(cfg.rows * 8);
    for &v in &signature[start..end] {
        bytes.extend_from_slice(&v.to_le_bytes());
    }
    fnv1a_hash64(&bytes)
}

/// Computes the bucket key for every band of `signature`.
pub fn band_buckets(signature: &[u64], cfg: BandConfig) -> Vec<u64> {
    (0..cfg.bands)
        .map(|band_index| band_bucket(signature, cfg, band_index))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identical_signatures_share_every_bucket() {
        let sig = vec![1, 2, 3, 4, 5, 6];
        let cfg = BandConfig { bands: 3, rows: 2 };
        assert_eq!(band_buckets(&sig, cfg), band_buckets(&sig, cfg));
    }

    #[test]
    fn changing_one_row_changes_only_its_band() {
        let cfg = BandConfig { bands: 3, rows: 2 };
        let a = vec![1, 2, 3, 4, 5, 6];
        let mut b = a.clone();
        b[2] = 999;
        let bucket_a = band_buckets(&a, cfg);
        let bucket_b = band_buckets(&b, cfg);
        assert_eq!(bucket_a[0], bucket_b[0]);
        assert_ne!(bucket_a[1], bucket_b[1]);
        assert_eq!(bucket_a[2], bucket_b[2]);
    }
}
