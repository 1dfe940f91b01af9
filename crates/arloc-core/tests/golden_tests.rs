//! Golden tests for the transform engine
//!
//! Each fixture under `tests/golden/` is a JSON document holding the entity,
//! language, optional override rules and input data, together with either the
//! `expected` result tree or the `error` kind the transform must fail with.

use arloc_core::{Error, Localizer, RuleTable};
use pretty_assertions::assert_eq;
use serde::Deserialize;
use serde_json::Value;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize)]
struct GoldenCase {
    #[allow(dead_code)]
    description: String,
    entity: String,
    language: String,
    #[serde(default)]
    rules: Option<Value>,
    input: Value,
    #[serde(default)]
    expected: Option<Value>,
    #[serde(default)]
    error: Option<String>,
}

fn corpus_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests").join("golden")
}

fn error_kind(error: &Error) -> &'static str {
    match error {
        Error::MissingReplacement { .. } => "missing_replacement",
        Error::InvalidEntity { .. } => "invalid_entity",
        Error::InvalidLanguage { .. } => "invalid_language",
        Error::RuleConfiguration { .. } => "rule_configuration",
        _ => "other",
    }
}

fn run_case(path: &Path) {
    let raw = std::fs::read_to_string(path)
        .unwrap_or_else(|e| panic!("failed to read {}: {}", path.display(), e));
    let case: GoldenCase = serde_json::from_str(&raw)
        .unwrap_or_else(|e| panic!("invalid golden case {}: {}", path.display(), e));

    let localizer = match &case.rules {
        Some(doc) => Localizer::with_rules(&RuleTable::from_document(doc).unwrap()),
        None => Localizer::new(),
    };
    let outcome = localizer.transform_value(&case.entity, &case.language, &case.input);

    match (outcome, &case.expected, &case.error) {
        (Ok(actual), Some(expected), None) => {
            assert_eq!(&actual, expected, "golden mismatch in {}", path.display());
        }
        (Err(err), None, Some(kind)) => {
            assert_eq!(error_kind(&err), kind.as_str(), "wrong error in {}: {}", path.display(), err);
        }
        (outcome, _, _) => panic!(
            "golden case {} must set exactly one of 'expected' or 'error', got {:?}",
            path.display(),
            outcome
        ),
    }
}

fn run_batch(category: &str) -> usize {
    let dir = corpus_dir().join(category);
    let mut paths: Vec<PathBuf> = std::fs::read_dir(&dir)
        .unwrap_or_else(|e| panic!("failed to list {}: {}", dir.display(), e))
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|p| p.extension().is_some_and(|ext| ext == "json"))
        .collect();
    paths.sort();

    for path in &paths {
        run_case(path);
    }
    paths.len()
}

macro_rules! golden_test {
    ($name:ident, $case:literal) => {
        #[test]
        fn $name() {
            run_case(&corpus_dir().join(concat!($case, ".json")));
        }
    };
}

golden_test!(test_post_model, "basic/post-model");
golden_test!(test_attribute_errors, "basic/attribute-errors");
golden_test!(test_custom_rules, "basic/custom-rules");
golden_test!(test_unbound_token, "edge-cases/unbound-token");

#[test]
fn golden_basic_batch() {
    assert!(run_batch("basic") >= 3);
}

#[test]
fn golden_edge_cases_batch() {
    assert!(run_batch("edge-cases") >= 4);
}
