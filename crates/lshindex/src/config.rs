//! LSH banding parameters (C4).

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Band count `b` and rows-per-band `r` for a MinHash signature of width
/// `k = b * r` (or less; trailing rows beyond `b*r` are unused).
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct BandConfig {
    pub bands: usize,
    pub rows: usize,
}

impl BandConfig {
    /// Number of signature slots this configuration actually consumes.
    pub fn slots_used(&self) -> usize {
        self.bands * self.rows
    }
}

/// Errors from LSH configuration.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LshError {
    #[error("invalid config: num_hashes k must be >= 1 (got {k})")]
    InvalidNumHashes { k: usize },
    #[error("invalid config: threshold must be in (0, 1] (got {t})")]
    InvalidThreshold { t: String },
}

/// Picks `(b, r)` minimizing `|(1/b)^(1/r) - threshold|` subject to
/// `b * r <= k`, `b >= 1`, `r >= 1`. The "S-curve" `(1/b)^(1/r)` estimates
/// the similarity at which a pair has 50% chance of sharing a band, so
/// choosing `(b, r)` close to it tunes the index toward `threshold`.
pub fn choose_band_config(k: usize, threshold: f64) -> Result<BandConfig, LshError> {
    if k == 0 {
        return Err(LshError::InvalidNumHashes { k });
    }
    if !(threshold > 0.0 && threshold <= 1.0) {
        return Err(LshError::InvalidThreshold {
            t: threshold.to_string(),
        });
    }

    let mut best = BandConfig { bands: 1, rows: k };
    let mut best_diff = f64::INFINITY;

    for b in 1..=k {
        let r = k / b;
        if r == 0 {
            continue;
        }
        let estimate = (1.0 / b as f64).powf(1.0 / r as f64);
        let diff = (estimate - threshold).abs();
        if diff < best_diff {
            best_diff = diff;
            best = BandConfig { bands: b, rows: r };
        }
    }

    Ok(best)
}
