//! Bounded-concurrency task fan-out, atomic bitmaps, and chunked frontier
//! expansion (C10 ParallelRuntime) — the concurrency primitives shared by
//! every other stage of the pipeline.
//!
//! ```
//! use runtime::{map, CancelToken, ParallelMode};
//!
//! let items = vec![1, 2, 3, 4];
//! let cancel = CancelToken::new();
//! let doubled = map(&items, 4, ParallelMode::Safe, &cancel, |x| Ok::<_, ()>(x * 2)).unwrap();
//! assert_eq!(doubled, vec![2, 4, 6, 8]);
//! ```

pub mod bitmap;
pub mod chunk;
pub mod mode;
pub mod taskpool;

pub use bitmap::AtomicBitmap;
pub use chunk::{chunk_ranges, expand_frontier};
pub use mode::ParallelMode;
pub use taskpool::{for_each, map, CancelToken, RuntimeError};
