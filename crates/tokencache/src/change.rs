//! ChangeDetector: classifies files as cache hits or needing analysis.

use crate::cache::TokenCache;

/// A file's cache status for this run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileStatus {
    Cached,
    ToAnalyze,
}

/// Classifies each `(file, content_hash)` pair against `cache`.
pub fn classify_files<'a>(
    cache: &TokenCache,
    files: impl IntoIterator<Item = (&'a str, u64)>,
) -> Vec<(&'a str, FileStatus)> {
    files
        .into_iter()
        .map(|(file, hash)| {
            let status = if cache.is_valid(file, hash) {
                FileStatus::Cached
            } else {
                FileStatus::ToAnalyze
            };
            (file, status)
        })
        .collect()
}
