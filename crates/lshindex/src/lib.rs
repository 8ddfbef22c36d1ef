//! Banded LSH candidate generation (C4) and suffix-array exact clone
//! detection (C5).
//!
//! This crate sits between [`fingerprint`]'s per-block signatures and the
//! verification/assembly stage: [`LshIndex`] turns MinHash signatures into a
//! candidate [`DocumentPair`] set for near-clone verification, while
//! [`detect_exact_clones`] finds Type-1 clones directly from raw token
//! streams without going through MinHash at all.
//!
//! ```
//! use lshindex::{choose_band_config, LshIndex};
//!
//! let cfg = choose_band_config(128, 0.8).unwrap();
//! let mut index = LshIndex::new(cfg);
//! index.insert(0, &vec![1u64; 128]);
//! index.insert(1, &vec![1u64; 128]);
//! assert_eq!(index.candidate_pairs().len(), 1);
//! ```

pub mod band;
pub mod config;
pub mod exact;
pub mod lsh;
pub mod suffix;
pub mod types;

pub use config::{choose_band_config, BandConfig, LshError};
pub use exact::detect_exact_clones;
pub use lsh::LshIndex;
pub use suffix::{build_suffix_array, kasai_lcp};
pub use types::{Clone, ClonePairInfo, CloneGroup, CloneType, DocumentPair};
