use faqmatch_core::config::SemanticConfig;
use faqmatch_core::corpus::{Corpus, LoadStrategy};
use faqmatch_core::traits::Normalizer;
use faqmatch_core::types::FaqRecord;
use faqmatch_text::BasicNormalizer;
use faqmatch_vector::SemanticIndex;

fn corpus() -> Corpus {
    let records = vec![
        FaqRecord::new("Fees", "What is the fee structure?", "Fees are listed online.", &["How much is tuition fee"]),
        FaqRecord::new("Hostel", "Is hostel accommodation available?", "Yes, for all students.", &["Where can I stay on campus"]),
        FaqRecord::new("Transport", "Does the university provide transport?", "Buses run daily.", &["Is there a bus service"]),
    ];
    Corpus::from_records(records, LoadStrategy::BuiltinSample)
}

#[test]
fn ranks_the_related_record_first() {
    let corpus = corpus();
    let normalizer = BasicNormalizer;
    let index = SemanticIndex::build(&corpus, &normalizer, &SemanticConfig::default());
    assert!(index.is_available());
    assert!(index.vocabulary_len() > 0);

    let ranked = index.rank(&normalizer.normalize("hostel accommodation for students"));
    assert_eq!(ranked.len(), 3);
    assert_eq!(ranked[0].0, 1);
    assert!(ranked[0].1 > 0.0);
    assert!(ranked.windows(2).all(|w| w[0].1 >= w[1].1));
}

#[test]
fn scores_stay_in_unit_range_and_align_with_records() {
    let corpus = corpus();
    let normalizer = BasicNormalizer;
    let index = SemanticIndex::build(&corpus, &normalizer, &SemanticConfig::default());
    let scores = index.scores(&normalizer.normalize("bus fee"));
    assert_eq!(scores.len(), corpus.len());
    assert!(scores.iter().all(|s| (0.0..=1.0).contains(s)));
}

#[test]
fn unknown_terms_score_zero() {
    let corpus = corpus();
    let normalizer = BasicNormalizer;
    let index = SemanticIndex::build(&corpus, &normalizer, &SemanticConfig::default());
    assert_eq!(index.scores(&normalizer.normalize("zzzz qqqq")), vec![0.0; 3]);
}

#[test]
fn single_record_corpus_is_unavailable_but_harmless() {
    let records = vec![FaqRecord::new("Admissions", "What are the admission requirements?", "Intermediate with 60%.", &[])];
    let corpus = Corpus::from_records(records, LoadStrategy::BuiltinSample);
    let normalizer = BasicNormalizer;
    let index = SemanticIndex::build(&corpus, &normalizer, &SemanticConfig::default());
    assert!(!index.is_available());
    assert!(index.unavailable_reason().is_some());
    assert_eq!(index.scores(&normalizer.normalize("admission requirements")), vec![0.0]);
    assert_eq!(index.rank(&normalizer.normalize("admission")), vec![(0, 0.0)]);
}

#[test]
fn disabled_semantic_scoring_yields_zero_scores() {
    let corpus = corpus();
    let normalizer = BasicNormalizer;
    let config = SemanticConfig { enabled: false, ..SemanticConfig::default() };
    let index = SemanticIndex::build(&corpus, &normalizer, &config);
    assert!(!index.is_available());
    assert_eq!(index.len(), 3);
    assert!(index.scores(&normalizer.normalize("hostel")).iter().all(|s| *s == 0.0));
    assert!(index.unavailable_reason().is_some_and(|r| r.contains("disabled")), "{:?}", index.unavailable_reason());
    assert!(index.vocabulary().is_none());
}

#[test]
fn feature_cap_limits_vocabulary() {
    let corpus = corpus();
    let normalizer = BasicNormalizer;
    let config = SemanticConfig { max_features: 4, ..SemanticConfig::default() };
    let index = SemanticIndex::build(&corpus, &normalizer, &config);
    assert_eq!(index.vocabulary_len(), 4);
}

#[test]
fn terms_in_nearly_every_record_are_dropped_and_bigrams_kept() {
    let records: Vec<FaqRecord> = (0..10)
        .map(|i| FaqRecord::new("General", &format!("common fee topic{i}"), "Answer.", &[]))
        .collect();
    let corpus = Corpus::from_records(records, LoadStrategy::BuiltinSample);
    let normalizer = BasicNormalizer;
    let index = SemanticIndex::build(&corpus, &normalizer, &SemanticConfig::default());
    assert!(index.is_available());
    // topicN and "fee topicN" for each record
    assert_eq!(index.vocabulary_len(), 20);
    let vocabulary = index.vocabulary().expect("vocabulary");
    assert!(vocabulary.contains("topic3"));
    assert!(vocabulary.contains("fee topic3"));
    for dropped in ["common", "fee", "common fee"] {
        assert!(!vocabulary.contains(dropped), "{dropped}");
    }
    assert_eq!(index.scores(&normalizer.normalize("common fee")), vec![0.0; 10]);
    assert_eq!(index.rank(&normalizer.normalize("fee topic7"))[0].0, 7);
}
