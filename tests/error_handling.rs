//! Error taxonomy behavior (spec §7): `InvalidConfig` fails fast,
//! `ParseFailed`/`FileIoError` are recorded per file without aborting the
//! run.

mod support;

use clonescan::{detect_clones, CloneTypeOption, DetectConfig, DetectError, SourceParser};
use support::{files_from, FixedParser};
use token::AstNode;

#[test]
fn invalid_config_fails_before_any_work_begins() {
    let parser = FixedParser::duplicated_block("let a = 1 ;", 1);
    let files = files_from(&parser);
    let config = DetectConfig::new().with_minimum_similarity(0.0);
    let err = detect_clones(&files, &parser, &config, &clonescan::CancelToken::new()).unwrap_err();
    assert!(matches!(err, DetectError::InvalidConfig(_)));
}

#[test]
fn empty_clone_types_is_invalid_config() {
    let parser = FixedParser::duplicated_block("let a = 1 ;", 1);
    let files = files_from(&parser);
    let config = DetectConfig::new().with_clone_types(Vec::new());
    assert!(matches!(detect_clones(&files, &parser, &config, &clonescan::CancelToken::new()), Err(DetectError::InvalidConfig(_))));
}

struct IoFailingParser;
impl SourceParser for IoFailingParser {
    fn source(&self, _file: &str) -> std::io::Result<Vec<u8>> {
        Err(std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"))
    }
    fn parse(&self, _file: &str, _source: &[u8]) -> Result<Box<dyn AstNode>, String> {
        unreachable!("source() always fails first")
    }
}

#[test]
fn file_io_error_is_recorded_and_run_continues() {
    let files = vec!["unreadable.src".to_string()];
    let config = DetectConfig::new();
    // Does not return an error: the file is skipped, the run still succeeds.
    let groups = detect_clones(&files, &IoFailingParser, &config, &clonescan::CancelToken::new()).unwrap();
    assert!(groups.is_empty());
}

struct ParseFailingParser;
impl SourceParser for ParseFailingParser {
    fn source(&self, _file: &str) -> std::io::Result<Vec<u8>> {
        Ok(b"whatever bytes".to_vec())
    }
    fn parse(&self, _file: &str, _source: &[u8]) -> Result<Box<dyn AstNode>, String> {
        Err("syntax error at byte 0".to_string())
    }
}

#[test]
fn parse_failure_is_recorded_and_run_continues() {
    let files = vec!["bad.src".to_string()];
    let config = DetectConfig::new();
    let groups = detect_clones(&files, &ParseFailingParser, &config, &clonescan::CancelToken::new()).unwrap();
    assert!(groups.is_empty());
}

#[test]
fn one_bad_file_does_not_block_clones_in_the_rest_of_the_batch() {
    struct MixedParser {
        good: FixedParser,
    }
    impl SourceParser for MixedParser {
        fn source(&self, file: &str) -> std::io::Result<Vec<u8>> {
            if file == "broken.src" {
                return Err(std::io::Error::new(std::io::ErrorKind::NotFound, "gone"));
            }
            self.good.source(file)
        }
        fn parse(&self, file: &str, source: &[u8]) -> Result<Box<dyn AstNode>, String> {
            self.good.parse(file, source)
        }
    }

    let good = FixedParser::duplicated_block("let a = 1 ; let b = 2 ; let c = 3 ;", 2);
    let mut files = files_from(&good);
    files.push("broken.src".to_string());
    let parser = MixedParser { good };

    let config = DetectConfig::new().with_minimum_tokens(5).with_clone_types(vec![CloneTypeOption::Exact]);
    let groups = detect_clones(&files, &parser, &config, &clonescan::CancelToken::new()).unwrap();
    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0].clones.len(), 2);
}
