//! Orchestrates the clone-detection pipeline: tokenize, shingle and
//! MinHash, band into LSH candidates, verify by exact Jaccard, assemble
//! connected components into clone groups, and (optionally) cache tokens
//! across runs.
//!
//! ## Quick start
//!
//! The surface parser is an external collaborator reached through
//! [`SourceParser`] — this crate never parses source text itself.
//!
//! ```ignore
//! use clonescan::{detect_clones, DetectConfig, SourceParser};
//!
//! struct MyParser;
//! impl SourceParser for MyParser {
//!     fn source(&self, file: &str) -> std::io::Result<Vec<u8>> {
//!         std::fs::read(file)
//!     }
//!     fn parse(&self, file: &str, source: &[u8]) -> Result<Box<dyn token::AstNode>, String> {
//!         todo!("plug in a real language parser")
//!     }
//! }
//!
//! let cfg = DetectConfig::default();
//! let cancel = clonescan::CancelToken::new();
//! let groups = detect_clones(&["a.rs".to_string(), "b.rs".to_string()], &MyParser, &cfg, &cancel).unwrap();
//! ```
//!
//! ## Observability
//!
//! Metrics and structured logs can be captured by installing a
//! [`DetectionMetrics`] recorder via [`set_detection_metrics`] and/or a
//! [`DetectionEventLogger`] with [`set_detection_logger`]. Library code
//! itself never calls `tracing_subscriber::fmt().init()`; [`init_tracing`]
//! is an opt-in helper for binaries embedding this crate.
//!
//! ## Errors
//!
//! Failures from any stage converge on [`DetectError`], which preserves the
//! offending file (where applicable) alongside the source error.

pub mod config;

pub use config::{CloneTypeOption, ConfigError, DetectConfig};
pub use lshindex::{Clone, CloneGroup, CloneType};
pub use runtime::CancelToken;

#[cfg(feature = "semantic")]
pub use semtree::SemanticConfig;

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, OnceLock, RwLock};
use std::time::{Duration, Instant};

use fingerprint::{block_count, block_documents, minhash_signature, FingerprintError};
use lshindex::{choose_band_config, detect_exact_clones, DocumentPair, LshError, LshIndex};
use clonematch::{sort_groups, verify_pairs, CloneAssembler, DocumentView, MatchError, SourceReader};
use runtime::{map, ParallelMode, RuntimeError};
use token::{fnv1a_hash64, AstNode, ExtractError, TokenSequence};
use tokencache::{classify_files, FileStatus, TokenCache};

/// The parser this crate consumes: turns source bytes into an [`AstNode`]
/// tree. An external collaborator — this crate never owns a grammar.
pub trait SourceParser: Send + Sync {
    /// Reads the raw bytes of `file` from whatever storage backs it.
    fn source(&self, file: &str) -> std::io::Result<Vec<u8>>;
    /// Parses `source` (the bytes just read for `file`) into an AST.
    fn parse(&self, file: &str, source: &[u8]) -> Result<Box<dyn AstNode>, String>;
}

/// Adapts a [`SourceParser`] onto [`clonematch::SourceReader`] so
/// [`CloneAssembler`] reads snippet bytes through the same I/O seam every
/// other stage uses, rather than touching the filesystem on its own.
struct ParserSourceReader<'a> {
    parser: &'a dyn SourceParser,
}

impl SourceReader for ParserSourceReader<'_> {
    fn read(&self, file: &str) -> Option<Vec<u8>> {
        self.parser.source(file).ok()
    }
}

/// Errors surfaced while detecting clones, converging every stage's error
/// type plus the file-level failure policy from the pipeline's error
/// taxonomy (`ParseFailed`/`FileIoError` are recorded per file and do not
/// abort the run; `InvalidConfig` and fatal stage errors do).
#[derive(Debug, Clone)]
pub enum DetectError {
    InvalidConfig(ConfigError),
    Fingerprint(FingerprintError),
    Lsh(LshError),
    Match(MatchError),
    Cache(String),
    Runtime(String),
    Cancelled,
}

impl fmt::Display for DetectError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DetectError::InvalidConfig(err) => write!(f, "invalid config: {err}"),
            DetectError::Fingerprint(err) => write!(f, "fingerprinting failure: {err}"),
            DetectError::Lsh(err) => write!(f, "lsh configuration failure: {err}"),
            DetectError::Match(err) => write!(f, "match configuration failure: {err}"),
            DetectError::Cache(msg) => write!(f, "cache io error: {msg}"),
            DetectError::Runtime(msg) => write!(f, "runtime error: {msg}"),
            DetectError::Cancelled => write!(f, "run was cancelled"),
        }
    }
}

impl std::error::Error for DetectError {}

impl From<ConfigError> for DetectError {
    fn from(value: ConfigError) -> Self {
        DetectError::InvalidConfig(value)
    }
}

impl From<FingerprintError> for DetectError {
    fn from(value: FingerprintError) -> Self {
        DetectError::Fingerprint(value)
    }
}

impl From<LshError> for DetectError {
    fn from(value: LshError) -> Self {
        DetectError::Lsh(value)
    }
}

impl From<MatchError> for DetectError {
    fn from(value: MatchError) -> Self {
        DetectError::Match(value)
    }
}

impl From<RuntimeError> for DetectError {
    fn from(value: RuntimeError) -> Self {
        DetectError::Runtime(value.to_string())
    }
}

/// A per-file failure recorded rather than fatal: `ParseFailed` or
/// `FileIoError` from the error taxonomy. The run continues without the
/// offending file.
#[derive(Debug, Clone)]
pub struct FileDiagnostic {
    pub file: String,
    pub message: String,
}

/// Stage captured in observability events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DetectStage {
    Extract,
    Exact,
    Lsh,
    Cache,
}

impl fmt::Display for DetectStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DetectStage::Extract => "extract",
            DetectStage::Exact => "exact",
            DetectStage::Lsh => "lsh",
            DetectStage::Cache => "cache",
        };
        f.write_str(name)
    }
}

/// Metrics observer for detection stages.
pub trait DetectionMetrics: Send + Sync {
    fn record_stage(&self, stage: DetectStage, latency: Duration, failed: bool);
}

/// Structured observation describing the outcome of a pipeline stage.
#[derive(Debug, Clone)]
pub struct DetectionEvent {
    pub stage: DetectStage,
    pub run_id: String,
    pub latency: Duration,
    pub failed: bool,
    pub detail: Option<String>,
}

/// Hook for emitting structured events per detection stage.
pub trait DetectionEventLogger: Send + Sync {
    fn log(&self, event: &DetectionEvent);
}

/// Install or clear the global detection metrics recorder.
pub fn set_detection_metrics(recorder: Option<Arc<dyn DetectionMetrics>>) {
    let lock = metrics_lock();
    let mut guard = lock.write().expect("detection metrics lock poisoned");
    *guard = recorder;
}

fn metrics_lock() -> &'static RwLock<Option<Arc<dyn DetectionMetrics>>> {
    static METRICS: OnceLock<RwLock<Option<Arc<dyn DetectionMetrics>>>> = OnceLock::new();
    METRICS.get_or_init(|| RwLock::new(None))
}

fn metrics_recorder() -> Option<Arc<dyn DetectionMetrics>> {
    metrics_lock().read().unwrap_or_else(|poisoned| poisoned.into_inner()).clone()
}

/// Install or clear the structured detection event logger.
pub fn set_detection_logger(logger: Option<Arc<dyn DetectionEventLogger>>) {
    let lock = logger_lock();
    let mut guard = lock.write().expect("detection logger lock poisoned");
    *guard = logger;
}

fn logger_lock() -> &'static RwLock<Option<Arc<dyn DetectionEventLogger>>> {
    static LOGGER: OnceLock<RwLock<Option<Arc<dyn DetectionEventLogger>>>> = OnceLock::new();
    LOGGER.get_or_init(|| RwLock::new(None))
}

fn detection_logger() -> Option<Arc<dyn DetectionEventLogger>> {
    logger_lock().read().unwrap_or_else(|poisoned| poisoned.into_inner()).clone()
}

struct MetricsSpan {
    recorder: Option<Arc<dyn DetectionMetrics>>,
    logger: Option<Arc<dyn DetectionEventLogger>>,
    stage: DetectStage,
    run_id: String,
    start: Instant,
}

impl MetricsSpan {
    fn start(stage: DetectStage, run_id: &str) -> Option<Self> {
        let recorder = metrics_recorder();
        let logger = detection_logger();
        if recorder.is_none() && logger.is_none() {
            return None;
        }
        Some(Self { recorder, logger, stage, run_id: run_id.to_string(), start: Instant::now() })
    }

    fn finish(self, failed: bool, detail: Option<String>) {
        let latency = self.start.elapsed();
        if let Some(logger) = self.logger.as_ref() {
            logger.log(&DetectionEvent { stage: self.stage, run_id: self.run_id.clone(), latency, failed, detail });
        }
        if let Some(recorder) = self.recorder {
            recorder.record_stage(self.stage, latency, failed);
        }
    }
}

/// Installs a `tracing_subscriber::fmt` subscriber driven by `RUST_LOG`.
/// Opt-in only — library code never calls this itself.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt().with_env_filter(tracing_subscriber::EnvFilter::from_default_env()).try_init();
}

/// Aggregate counts over a finished run's clone groups.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CloneReport {
    pub total_groups: usize,
    pub total_clones: usize,
    pub exact_groups: usize,
    pub near_groups: usize,
    pub semantic_groups: usize,
    /// `total_clones / total_files_analyzed`, or `0.0` with no files.
    pub duplication_ratio: f64,
}

impl CloneReport {
    pub fn summarize(groups: &[CloneGroup], files_analyzed: usize) -> Self {
        let mut report = CloneReport { total_groups: groups.len(), ..Default::default() };
        for group in groups {
            report.total_clones += group.clones.len();
            match group.clone_type {
                CloneType::Exact => report.exact_groups += 1,
                CloneType::Near => report.near_groups += 1,
                CloneType::Semantic => report.semantic_groups += 1,
            }
        }
        report.duplication_ratio =
            if files_analyzed == 0 { 0.0 } else { report.total_clones as f64 / files_analyzed as f64 };
        report
    }
}

/// Result of [`detect_clones_incremental`].
#[derive(Debug, Clone)]
pub struct IncrementalOutcome {
    pub clone_groups: Vec<CloneGroup>,
    pub analyzed_files: usize,
    pub cached_files: usize,
}

fn extract_one(
    file: &str,
    parser: &dyn SourceParser,
) -> Result<(TokenSequence, u64), FileDiagnostic> {
    let bytes = parser
        .source(file)
        .map_err(|err| FileDiagnostic { file: file.to_string(), message: format!("io error: {err}") })?;
    let ast = parser
        .parse(file, &bytes)
        .map_err(|err| FileDiagnostic { file: file.to_string(), message: format!("parse failed: {err}") })?;
    let sequence = token::extract(file, &bytes, ast.as_ref())
        .map_err(|err: ExtractError| FileDiagnostic { file: file.to_string(), message: err.to_string() })?;
    Ok((sequence, fnv1a_hash64(&bytes)))
}

/// Extracts token sequences for every file that isn't excluded by
/// `ignored_patterns`, recording (not failing on) per-file parse/IO errors.
fn extract_all(
    files: &[String],
    parser: &dyn SourceParser,
    config: &DetectConfig,
    cancel: &CancelToken,
) -> Result<(Vec<TokenSequence>, Vec<FileDiagnostic>), DetectError> {
    let patterns = config.compiled_ignored_patterns()?;
    let kept: Vec<String> = files
        .iter()
        .filter(|file| !patterns.iter().any(|pattern| pattern.is_match(file)))
        .cloned()
        .collect();

    let effective_concurrency = config.parallel_mode.effective_concurrency(
        std::thread::available_parallelism().map(|n| n.get()).unwrap_or(1),
        config.max_concurrency,
    );

    let results: Vec<Result<(TokenSequence, u64), FileDiagnostic>> =
        map(&kept, effective_concurrency, config.parallel_mode, cancel, |file| {
            Ok::<_, std::convert::Infallible>(extract_one(file, parser))
        })
        .expect("extraction closure never fails");

    let mut sequences = Vec::with_capacity(results.len());
    let mut diagnostics = Vec::new();
    for result in results {
        match result {
            Ok((sequence, _hash)) => sequences.push(sequence),
            Err(diagnostic) => {
                tracing::warn!(file = %diagnostic.file, reason = %diagnostic.message, "skipping file");
                diagnostics.push(diagnostic);
            }
        }
    }
    Ok((sequences, diagnostics))
}

/// Detects near-clones: blocks every sequence, MinHashes each block,
/// bands into LSH candidates, verifies by exact Jaccard, and assembles
/// connected components into [`CloneGroup`]s.
fn detect_near_clones(
    sequences: &[TokenSequence],
    config: &DetectConfig,
    parser: &dyn SourceParser,
) -> Result<Vec<CloneGroup>, DetectError> {
    let counts: Vec<usize> = sequences.iter().map(|seq| block_count(seq.tokens.len(), config.minimum_tokens)).collect();
    let mut offsets = Vec::with_capacity(counts.len());
    let mut running = 0usize;
    for count in &counts {
        offsets.push(running);
        running += count;
    }

    let blocks: Vec<fingerprint::ShingledDocument> = sequences
        .iter()
        .zip(offsets)
        .flat_map(|(seq, start_id)| block_documents(seq, config.minimum_tokens, config.shingle_size, config.seed, start_id))
        .collect();

    if blocks.len() < 2 {
        return Ok(Vec::new());
    }

    let use_parallel = config.parallel_mode != ParallelMode::None;
    let signatures: Vec<Vec<u64>> = blocks
        .iter()
        .map(|block| {
            let shingles: Vec<u64> = block.normalized_shingles.iter().copied().collect();
            minhash_signature(&shingles, config.num_hashes, config.seed, use_parallel)
        })
        .collect();

    let band_cfg = choose_band_config(config.num_hashes, config.minimum_similarity)?;
    let mut index = LshIndex::new(band_cfg);
    for (doc_id, signature) in signatures.iter().enumerate() {
        index.insert(doc_id, signature);
    }

    let pairs: Vec<DocumentPair> =
        index.candidate_pairs().into_iter().filter_map(|(a, b)| DocumentPair::new(a, b)).collect();

    let documents: Vec<DocumentView> = blocks.iter().map(DocumentView::from).collect();
    let confirmed = verify_pairs(&pairs, &documents, config.minimum_similarity);

    let pair_similarity: HashMap<(usize, usize), f64> =
        confirmed.iter().map(|info| ((info.pair.id1, info.pair.id2), info.similarity)).collect();
    let confirmed_pairs: Vec<DocumentPair> = confirmed.iter().map(|info| info.pair).collect();

    let graph = clonematch::SimilarityGraph::build(documents.len(), &confirmed_pairs);
    let components = graph.connected_components(clonematch::DEFAULT_MIN_PARALLEL_SIZE);

    let mut assembler = CloneAssembler::new();
    let sources = ParserSourceReader { parser };
    Ok(assembler.assemble(&components, &documents, &pair_similarity, CloneType::Near, &sources))
}

#[cfg(feature = "semantic")]
fn detect_semantic_clones_stage(sequences: &[TokenSequence], config: &DetectConfig) -> Vec<CloneGroup> {
    let cfg = semtree::SemanticConfig::from_min_tokens(config.minimum_tokens, config.seed)
        .with_min_nodes(config.effective_min_nodes());
    semtree::detect_semantic_clones(sequences, &cfg)
}

#[cfg(not(feature = "semantic"))]
fn detect_semantic_clones_stage(_sequences: &[TokenSequence], _config: &DetectConfig) -> Vec<CloneGroup> {
    Vec::new()
}

fn run_pipeline(
    sequences: &[TokenSequence],
    config: &DetectConfig,
    parser: &dyn SourceParser,
    cancel: &CancelToken,
    run_id: &str,
) -> Result<Vec<CloneGroup>, DetectError> {
    let mut groups = Vec::new();

    if config.clone_types.contains(&CloneTypeOption::Exact) {
        let span = MetricsSpan::start(DetectStage::Exact, run_id);
        let exact = detect_exact_clones(sequences, config.minimum_tokens);
        if let Some(span) = span {
            span.finish(false, None);
        }
        groups.extend(exact);
    }

    if cancel.is_cancelled() {
        tracing::warn!(run_id, "cancelled after exact-clone stage; returning partial results");
        return Ok(sort_groups(groups));
    }

    if config.clone_types.contains(&CloneTypeOption::Near) {
        let span = MetricsSpan::start(DetectStage::Lsh, run_id);
        match detect_near_clones(sequences, config, parser) {
            Ok(near) => {
                if let Some(span) = span {
                    span.finish(false, None);
                }
                groups.extend(near);
            }
            Err(err) => {
                if let Some(span) = span {
                    span.finish(true, Some(err.to_string()));
                }
                return Err(err);
            }
        }
    }

    if cancel.is_cancelled() {
        tracing::warn!(run_id, "cancelled after near-clone stage; returning partial results");
        return Ok(sort_groups(groups));
    }

    if config.clone_types.contains(&CloneTypeOption::Semantic) {
        groups.extend(detect_semantic_clones_stage(sequences, config));
    }

    Ok(sort_groups(groups))
}

/// Detects clones across `files`, analyzing every file fresh (no cache).
///
/// `cancel` is the caller's handle onto the run: calling
/// [`CancelToken::cancel`] from another thread stops extraction and
/// in-flight stages promptly. Cancelling before any stage has produced a
/// result yields [`DetectError::Cancelled`]; cancelling after at least one
/// clone-type stage has completed returns whatever groups were already
/// computed instead of discarding them.
pub fn detect_clones(
    files: &[String],
    parser: &dyn SourceParser,
    config: &DetectConfig,
    cancel: &CancelToken,
) -> Result<Vec<CloneGroup>, DetectError> {
    config.validate()?;
    if cancel.is_cancelled() {
        return Err(DetectError::Cancelled);
    }
    let (sequences, _diagnostics) = extract_all(files, parser, config, cancel)?;
    if cancel.is_cancelled() {
        return Err(DetectError::Cancelled);
    }
    run_pipeline(&sequences, config, parser, cancel, "detect_clones")
}

/// Detects clones across `files`, reusing cached token sequences for any
/// file whose content hash is unchanged since the last run. Files are
/// analyzed fresh whenever `config.cache_directory` is unset. See
/// [`detect_clones`] for `cancel`'s semantics.
pub fn detect_clones_incremental(
    files: &[String],
    parser: &dyn SourceParser,
    config: &DetectConfig,
    cancel: &CancelToken,
) -> Result<IncrementalOutcome, DetectError> {
    config.validate()?;
    if cancel.is_cancelled() {
        return Err(DetectError::Cancelled);
    }

    let Some(cache_path) = config.cache_file() else {
        let groups = detect_clones(files, parser, config, cancel)?;
        return Ok(IncrementalOutcome { clone_groups: groups, analyzed_files: files.len(), cached_files: 0 });
    };

    let mut cache = TokenCache::load(&cache_path);

    let hashes: Vec<(String, u64)> = files
        .iter()
        .filter_map(|file| parser.source(file).ok().map(|bytes| (file.clone(), fnv1a_hash64(&bytes))))
        .collect();
    let classification = classify_files(&cache, hashes.iter().map(|(file, hash)| (file.as_str(), *hash)));

    let mut to_analyze = Vec::new();
    let mut sequences = Vec::new();
    let mut cached_files = 0usize;
    for ((file, hash), (_, status)) in hashes.iter().zip(classification.iter()) {
        match status {
            FileStatus::Cached => {
                if let Some(entry) = cache.get(file, *hash) {
                    sequences.push(entry.tokens.clone());
                    cached_files += 1;
                }
            }
            FileStatus::ToAnalyze => to_analyze.push(file.clone()),
        }
    }

    let (fresh_sequences, _diagnostics) = extract_all(&to_analyze, parser, config, cancel)?;
    if cancel.is_cancelled() {
        return Err(DetectError::Cancelled);
    }
    for (file, sequence) in to_analyze.iter().zip(fresh_sequences.iter()) {
        if let Some((_, hash)) = hashes.iter().find(|(f, _)| f == file) {
            cache.put(file, *hash, sequence.clone());
        }
    }
    let analyzed_files = fresh_sequences.len();
    sequences.extend(fresh_sequences);

    let span = MetricsSpan::start(DetectStage::Cache, "detect_clones_incremental");
    let save_result = cache.save(&cache_path);
    if let Some(span) = span {
        span.finish(save_result.is_err(), save_result.as_ref().err().map(|e| e.to_string()));
    }
    if let Err(err) = save_result {
        tracing::warn!(error = %err, "failed to persist token cache; returning results anyway");
    }

    let clone_groups = run_pipeline(&sequences, config, parser, cancel, "detect_clones_incremental")?;
    Ok(IncrementalOutcome { clone_groups, analyzed_files, cached_files })
}

/// Streams verification progress for a precomputed candidate pair set —
/// a thin re-export of [`clonematch::verify_streaming`], the shape the
/// public interface names.
pub use clonematch::{verify_streaming, VerificationProgress};

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap as StdHashMap;
    use token::ast::{LeafKind, RawLeaf};
    use token::TokenKind;

    struct Leaf(RawLeaf);
    impl AstNode for Leaf {
        fn as_leaf(&self) -> Option<RawLeaf> {
            Some(self.0.clone())
        }
        fn children(&self) -> &[Box<dyn AstNode>] {
            &[]
        }
    }
    struct Branch(Vec<Box<dyn AstNode>>);
    impl AstNode for Branch {
        fn as_leaf(&self) -> Option<RawLeaf> {
            None
        }
        fn children(&self) -> &[Box<dyn AstNode>] {
            &self.0
        }
    }

    fn leaf(kind: TokenKind, lexeme: &str, offset: usize) -> Box<dyn AstNode> {
        Box::new(Leaf(RawLeaf {
            kind: LeafKind::Token(kind),
            lexeme: lexeme.to_string(),
            byte_offset: offset,
            start_line: 1,
            start_col: (offset + 1) as u32,
            end_line: 1,
            end_col: (offset + 1 + lexeme.len()) as u32,
        }))
    }

    /// Parses each file as identical fixed token content: `let x = 1 ; let y = 2 ;`
    /// (10 tokens), repeated twice so every supplied file clears the
    /// default 50-token minimum block when `minimum_tokens` is lowered to
    /// match the fixture.
    struct FixedParser {
        sources: StdHashMap<String, Vec<u8>>,
    }

    impl FixedParser {
        fn new(files: &[&str]) -> Self {
            let body = b"let x = 1 ; let y = 2 ;".to_vec();
            Self { sources: files.iter().map(|f| (f.to_string(), body.clone())).collect() }
        }
    }

    impl SourceParser for FixedParser {
        fn source(&self, file: &str) -> std::io::Result<Vec<u8>> {
            self.sources
                .get(file)
                .cloned()
                .ok_or_else(|| std::io::Error::new(std::io::ErrorKind::NotFound, "unknown file"))
        }

        fn parse(&self, _file: &str, _source: &[u8]) -> Result<Box<dyn AstNode>, String> {
            let words = ["let", "x", "=", "1", ";", "let", "y", "=", "2", ";"];
            let mut offset = 0;
            let mut children: Vec<Box<dyn AstNode>> = Vec::new();
            for word in words {
                let kind = match word {
                    "let" => TokenKind::Keyword,
                    "x" | "y" => TokenKind::Identifier,
                    "1" | "2" => TokenKind::Literal,
                    "=" => TokenKind::Operator,
                    ";" => TokenKind::Punctuation,
                    _ => unreachable!(),
                };
                children.push(leaf(kind, word, offset));
                offset += word.len() + 1;
            }
            Ok(Box::new(Branch(children)))
        }
    }

    #[test]
    fn exact_duplicate_files_form_one_group() {
        let parser = FixedParser::new(&["a.rs", "b.rs"]);
        let files = vec!["a.rs".to_string(), "b.rs".to_string()];
        let config = DetectConfig::new()
            .with_minimum_tokens(5)
            .with_clone_types(vec![CloneTypeOption::Exact]);
        let groups = detect_clones(&files, &parser, &config, &CancelToken::new()).unwrap();
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].clone_type, CloneType::Exact);
        assert_eq!(groups[0].clones.len(), 2);
    }

    #[test]
    fn invalid_config_fails_fast() {
        let parser = FixedParser::new(&["a.rs"]);
        let files = vec!["a.rs".to_string()];
        let config = DetectConfig::new().with_minimum_tokens(0);
        assert!(matches!(detect_clones(&files, &parser, &config, &CancelToken::new()), Err(DetectError::InvalidConfig(_))));
    }

    #[test]
    fn unparseable_file_is_skipped_not_fatal() {
        struct FailingParser;
        impl SourceParser for FailingParser {
            fn source(&self, _file: &str) -> std::io::Result<Vec<u8>> {
                Err(std::io::Error::new(std::io::ErrorKind::NotFound, "missing"))
            }
            fn parse(&self, _file: &str, _source: &[u8]) -> Result<Box<dyn AstNode>, String> {
                unreachable!()
            }
        }

        let files = vec!["missing.rs".to_string()];
        let config = DetectConfig::new();
        let groups = detect_clones(&files, &FailingParser, &config, &CancelToken::new()).unwrap();
        assert!(groups.is_empty());
    }

    #[test]
    fn ignored_pattern_excludes_matching_files() {
        let parser = FixedParser::new(&["a.rs", "a_test.rs"]);
        let files = vec!["a.rs".to_string(), "a_test.rs".to_string()];
        let config = DetectConfig::new()
            .with_minimum_tokens(5)
            .with_clone_types(vec![CloneTypeOption::Exact])
            .with_ignored_patterns(vec!["_test\\.rs$".to_string()]);
        let groups = detect_clones(&files, &parser, &config, &CancelToken::new()).unwrap();
        assert!(groups.is_empty());
    }

    #[test]
    fn incremental_without_cache_directory_analyzes_everything() {
        let parser = FixedParser::new(&["a.rs", "b.rs"]);
        let files = vec!["a.rs".to_string(), "b.rs".to_string()];
        let config = DetectConfig::new()
            .with_minimum_tokens(5)
            .with_clone_types(vec![CloneTypeOption::Exact]);
        let outcome = detect_clones_incremental(&files, &parser, &config, &CancelToken::new()).unwrap();
        assert_eq!(outcome.analyzed_files, 2);
        assert_eq!(outcome.cached_files, 0);
        assert_eq!(outcome.clone_groups.len(), 1);
    }

    #[test]
    fn incremental_second_run_hits_cache() {
        let dir = tempfile::tempdir().unwrap();
        let parser = FixedParser::new(&["a.rs", "b.rs"]);
        let files = vec!["a.rs".to_string(), "b.rs".to_string()];
        let config = DetectConfig::new()
            .with_minimum_tokens(5)
            .with_clone_types(vec![CloneTypeOption::Exact])
            .with_cache_directory(Some(dir.path().to_path_buf()));

        let first = detect_clones_incremental(&files, &parser, &config, &CancelToken::new()).unwrap();
        assert_eq!(first.analyzed_files, 2);

        let second = detect_clones_incremental(&files, &parser, &config, &CancelToken::new()).unwrap();
        assert_eq!(second.cached_files, 2);
        assert_eq!(second.analyzed_files, 0);
        assert_eq!(second.clone_groups.len(), 1);
    }

    #[test]
    fn cancelling_before_the_run_starts_yields_cancelled() {
        let parser = FixedParser::new(&["a.rs"]);
        let files = vec!["a.rs".to_string()];
        let config = DetectConfig::new().with_minimum_tokens(5).with_clone_types(vec![CloneTypeOption::Exact]);
        let cancel = CancelToken::new();
        cancel.cancel();
        assert!(matches!(detect_clones(&files, &parser, &config, &cancel), Err(DetectError::Cancelled)));
    }

    #[test]
    fn cancelling_from_another_thread_stops_the_run() {
        let parser = FixedParser::new(&["a.rs", "b.rs"]);
        let files = vec!["a.rs".to_string(), "b.rs".to_string()];
        let config = DetectConfig::new().with_minimum_tokens(5).with_clone_types(vec![CloneTypeOption::Exact]);
        let cancel = CancelToken::new();
        let handle = cancel.clone();
        handle.cancel();
        let result = detect_clones(&files, &parser, &config, &cancel);
        assert!(matches!(result, Err(DetectError::Cancelled)));
    }

    #[test]
    fn clone_report_counts_by_type() {
        let groups = vec![CloneGroup {
            clone_type: CloneType::Exact,
            similarity: 1.0,
            fingerprint: 1,
            clones: vec![
                Clone { file: "a.rs".to_string(), start_line: 1, end_line: 5, token_count: 10, snippet: None },
                Clone { file: "b.rs".to_string(), start_line: 1, end_line: 5, token_count: 10, snippet: None },
            ],
        }];
        let report = CloneReport::summarize(&groups, 2);
        assert_eq!(report.total_groups, 1);
        assert_eq!(report.exact_groups, 1);
        assert_eq!(report.total_clones, 2);
        assert_eq!(report.duplication_ratio, 1.0);
    }
}
