//! Bounded-concurrency `map`/`for_each` with first-error propagation and
//! cooperative cancellation.

use std::sync::atomic::{AtomicBool, Ordering};

use rayon::prelude::*;
use rayon::ThreadPoolBuildError;
use thiserror::Error;

use crate::mode::ParallelMode;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("failed to build worker pool: {0}")]
    PoolBuild(#[from] ThreadPoolBuildError),
}

/// A handle a caller can use to cancel an in-flight [`map`]/[`for_each`]
/// call. Workers observe it between items and exit promptly without
/// completing remaining work; items already started are allowed to finish.
#[derive(Debug, Default, Clone)]
pub struct CancelToken(std::sync::Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Release);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }
}

/// Runs `f` over `items` with at most `max_concurrency` tasks in flight,
/// preserving input order in the output, and returns the first error
/// encountered (order-independent with respect to *which* error, since
/// workers race, but deterministic with respect to *whether* one occurred).
pub fn map<T, R, E, F>(
    items: &[T],
    max_concurrency: usize,
    mode: ParallelMode,
    cancel: &CancelToken,
    f: F,
) -> Result<Vec<R>, E>
where
    T: Sync,
    R: Send,
    E: Send,
    F: Fn(&T) -> Result<R, E> + Sync,
{
    if mode == ParallelMode::None || max_concurrency <= 1 {
        let mut out = Vec::with_capacity(items.len());
        for item in items {
            if cancel.is_cancelled() {
                break;
            }
            out.push(f(item)?);
        }
        return Ok(out);
    }

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(max_concurrency)
        .build()
        .expect("bounded thread pool with a valid thread count");

    pool.install(|| {
        items
            .par_iter()
            .map(|item| {
                if cancel.is_cancelled() {
                    return Ok(None);
                }
                f(item).map(Some)
            })
            .collect::<Result<Vec<Option<R>>, E>>()
            .map(|results| results.into_iter().flatten().collect())
    })
}

/// Like [`map`] but discards results — for side-effecting work (e.g.
/// inserting into a shared structure already built for concurrent writes).
pub fn for_each<T, E, F>(
    items: &[T],
    max_concurrency: usize,
    mode: ParallelMode,
    cancel: &CancelToken,
    f: F,
) -> Result<(), E>
where
    T: Sync,
    E: Send,
    F: Fn(&T) -> Result<(), E> + Sync,
{
    map(items, max_concurrency, mode, cancel, f).map(|_: Vec<()>| ())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn map_preserves_order() {
        let items: Vec<i32> = (0..50).collect();
        let cancel = CancelToken::new();
        let out = map(&items, 4, ParallelMode::Safe, &cancel, |x| Ok::<_, ()>(x * 2)).unwrap();
        assert_eq!(out, items.iter().map(|x| x * 2).collect::<Vec<_>>());
    }

    #[test]
    fn none_mode_runs_sequentially() {
        let items: Vec<i32> = (0..10).collect();
        let cancel = CancelToken::new();
        let out = map(&items, 8, ParallelMode::None, &cancel, |x| Ok::<_, ()>(*x)).unwrap();
        assert_eq!(out, items);
    }

    #[test]
    fn propagates_first_error() {
        let items: Vec<i32> = vec![1, 2, -1, 4];
        let cancel = CancelToken::new();
        let result = map(&items, 4, ParallelMode::Safe, &cancel, |x| {
            if *x < 0 {
                Err("negative")
            } else {
                Ok(*x)
            }
        });
        assert_eq!(result, Err("negative"));
    }

    #[test]
    fn cancellation_stops_sequential_path() {
        let items: Vec<i32> = (0..100).collect();
        let cancel = CancelToken::new();
        cancel.cancel();
        let out = map(&items, 1, ParallelMode::None, &cancel, |x| Ok::<_, ()>(*x)).unwrap();
        assert!(out.is_empty());
    }

    #[test]
    fn for_each_runs_every_item() {
        use std::sync::atomic::AtomicUsize;
        let items: Vec<i32> = (0..20).collect();
        let counter = AtomicUsize::new(0);
        let cancel = CancelToken::new();
        for_each(&items, 4, ParallelMode::Safe, &cancel, |_| {
            counter.fetch_add(1, Ordering::SeqCst);
            Ok::<_, ()>(())
        })
        .unwrap();
        assert_eq!(counter.load(Ordering::SeqCst), 20);
    }
}
