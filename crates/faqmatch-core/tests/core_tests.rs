use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

use faqmatch_core::config::{Config, EngineConfig};
use faqmatch_core::corpus::{Corpus, LoadStrategy, VariantKind};
use faqmatch_core::error::Error;
use faqmatch_core::types::QueryClass;

const SMALL_DOC: &str = r#"{
  "faqs": [
    {"category": "Admissions", "original_question": "What are the admission requirements?",
     "answer": "Bring your transcripts.", "possible_questions": ["admission criteria", "how to apply"]},
    {"category": "Fees", "original_question": "What is the fee structure?",
     "answer": "See the fee schedule.", "possible_questions": ["tuition fee"]},
    {"category": "Admissions", "original_question": "When do admissions open?",
     "answer": "Twice a year."}
  ]
}"#;

fn write_corpus(dir: &TempDir, name: &str, bytes: &[u8]) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, bytes).unwrap();
    path
}

#[test]
fn load_valid_document_keeps_order_and_groups_categories() {
    let tmp = TempDir::new().unwrap();
    let path = write_corpus(&tmp, "faq.json", SMALL_DOC.as_bytes());

    let corpus = Corpus::load(&path).expect("load");
    assert_eq!(corpus.len(), 3);
    assert_eq!(corpus.source(), &LoadStrategy::Primary(path.clone()));
    assert_eq!(corpus.by_category("Admissions"), &[0, 2]);
    assert_eq!(corpus.by_category("Fees"), &[1]);
    assert!(corpus.by_category("Hostel").is_empty());
    assert_eq!(
        corpus.categories(),
        vec![("Admissions".to_string(), 2), ("Fees".to_string(), 1)],
        "categories in first-seen order with counts"
    );
}

#[test]
fn variants_start_with_canonical_question() {
    let tmp = TempDir::new().unwrap();
    let path = write_corpus(&tmp, "faq.json", SMALL_DOC.as_bytes());
    let corpus = Corpus::load(&path).unwrap();

    assert_eq!(
        corpus.question_variants_of(0),
        vec!["What are the admission requirements?", "admission criteria", "how to apply"]
    );
    assert_eq!(corpus.question_variants_of(2), vec!["When do admissions open?"], "missing variants default to empty");
    assert!(corpus.question_variants_of(99).is_empty());
    assert_eq!(corpus.combined_question_text(1), "What is the fee structure? tuition fee");
    assert_eq!(corpus.total_questions(), 6);

    let flat: Vec<_> = corpus.questions().collect();
    assert_eq!(flat.len(), 6);
    assert_eq!(flat[0].kind, VariantKind::Original);
    assert_eq!(flat[1].kind, VariantKind::Possible);
    assert_eq!(flat[5].record, 2);
}

#[test]
fn malformed_sources_are_data_errors() {
    let tmp = TempDir::new().unwrap();
    let bad_json = write_corpus(&tmp, "bad.json", b"{ not json");
    let no_faqs = write_corpus(&tmp, "other.json", br#"{"entries": []}"#);
    let empty = write_corpus(&tmp, "empty.json", br#"{"faqs": []}"#);
    let missing = tmp.path().join("missing.json");

    for path in [bad_json, no_faqs, empty, missing] {
        match Corpus::load(&path) {
            Err(Error::Data(_)) => {}
            other => panic!("expected data error for {}, got {:?}", path.display(), other.map(|c| c.len())),
        }
    }
}

#[test]
fn nonexistent_source_falls_back_to_sample() {
    let tmp = TempDir::new().unwrap();
    let corpus = Corpus::load_or_sample(&tmp.path().join("nope.json"));
    assert_eq!(corpus.source(), &LoadStrategy::BuiltinSample);
    assert_eq!(corpus.len(), 3);
    let names: Vec<String> = corpus.categories().into_iter().map(|(c, _)| c).collect();
    assert_eq!(names, vec!["General", "Admissions", "Academic"]);
}

#[test]
fn invalid_utf8_is_recovered_by_lossy_decode() {
    let tmp = TempDir::new().unwrap();
    let mut bytes = b"\xEF\xBB\xBF".to_vec();
    bytes.extend_from_slice(
        br#"{"faqs":[{"category":"Fees","original_question":"Fee caf"#,
    );
    bytes.push(0xE9);
    bytes.extend_from_slice(br#"?","answer":"Rs. 100","possible_questions":[]}]}"#);
    let path = write_corpus(&tmp, "latin.json", &bytes);

    let corpus = Corpus::load(&path).expect("lossy strategy succeeds");
    assert_eq!(corpus.source(), &LoadStrategy::LossyDecode(path));
    assert_eq!(corpus.len(), 1);
    assert!(corpus.get(0).unwrap().canonical_question.starts_with("Fee caf"));
}

#[test]
fn default_engine_config_is_valid() {
    let config = EngineConfig::default();
    config.validate().expect("defaults validate");
    assert_eq!(config.thresholds.direct, 0.3);
    assert_eq!(config.thresholds.clarify, 0.15);
    assert_eq!(config.thresholds.fast_path, 0.5);
    assert_eq!(config.weights.for_class(QueryClass::Short).keyword, 0.40);
    assert_eq!(config.weights.for_class(QueryClass::Complex).semantic, 0.50);
    assert!(config.category_keywords("Admissions").is_some(), "plural category matches singular-ish key");
    assert!(config.category_keywords("Unknown").is_none());
}

#[test]
fn toml_overrides_merge_over_defaults() {
    let config = Config::from_toml_str(
        r#"
        max_suggestions = 5
        [thresholds]
        direct = 0.4
        [data]
        corpus_path = "data/faq.json"
        "#,
    );
    let engine = config.engine().expect("engine config");
    assert_eq!(engine.thresholds.direct, 0.4);
    assert_eq!(engine.thresholds.clarify, 0.15, "untouched keys keep defaults");
    assert_eq!(engine.max_suggestions, 5);
    let path: String = config.get("data.corpus_path").unwrap();
    assert_eq!(path, "data/faq.json");
    assert_eq!(engine.data.resolved_corpus_path(std::path::Path::new("/srv")), PathBuf::from("/srv/data/faq.json"));
}

#[test]
fn inconsistent_settings_are_rejected() {
    let weights = Config::from_toml_str("[weights.normal]\nsemantic = 0.9\nfuzzy = 0.25\nkeyword = 0.25\ncategory = 0.1\n");
    assert!(matches!(weights.engine(), Err(Error::InvalidConfig(_))));

    let thresholds = Config::from_toml_str("[thresholds]\nclarify = 0.5\ndirect = 0.3\n");
    assert!(matches!(thresholds.engine(), Err(Error::InvalidConfig(_))));
}
