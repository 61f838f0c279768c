use faqmatch_core::config::EngineConfig;
use faqmatch_core::corpus::{Corpus, LoadStrategy};
use faqmatch_core::types::{FaqRecord, MatchKind};
use faqmatch_text::keyword::{extract_keywords, KeywordIndex, CURATED_WEIGHT, EXTRACTED_WEIGHT};

fn corpus() -> Corpus {
    Corpus::from_records(
        vec![
            FaqRecord::new(
                "Admissions",
                "What are the admission requirements?",
                "Bring transcripts.",
                &["admission criteria", "how to apply"],
            ),
            FaqRecord::new("Transport", "Is there a university bus service?", "Yes, 12 routes.", &["Transport", "bus timings"]),
            FaqRecord::new("Library", "What are the library hours?", "8am to 10pm.", &["library timing"]),
        ],
        LoadStrategy::BuiltinSample,
    )
}

#[test]
fn exact_variant_wins_with_full_confidence() {
    let index = KeywordIndex::build(&corpus(), &EngineConfig::default());
    let hit = index.short_query_match("transport");
    assert_eq!(hit.record, Some(1));
    assert_eq!(hit.confidence, 1.0);
    assert_eq!(hit.match_kind, MatchKind::Exact);

    let hit = index.short_query_match("  How to APPLY? ");
    assert_eq!((hit.record, hit.match_kind), (Some(0), MatchKind::Exact), "case and punctuation are ignored");
}

#[test]
fn long_variants_are_not_exact_keys() {
    let index = KeywordIndex::build(&corpus(), &EngineConfig::default());
    let hit = index.short_query_match("what are the library hours");
    assert_ne!(hit.match_kind, MatchKind::Exact);
    // five short variants; the canonical questions are all too long
    assert_eq!(index.exact_len(), 5);
    assert!(index.keyword_len() > 0);
    assert_eq!(index.postings("library").first().map(|p| p.record), Some(2));
}

#[test]
fn curated_keywords_outrank_extracted_ones() {
    let index = KeywordIndex::build(&corpus(), &EngineConfig::default());
    let hit = index.short_query_match("admission");
    assert_eq!(hit.record, Some(0));
    assert_eq!(hit.match_kind, MatchKind::Keyword);
    assert_eq!(hit.confidence, CURATED_WEIGHT);

    // "library" has no curated vocabulary and is only an extracted token.
    let hit = index.short_query_match("library");
    assert_eq!((hit.record, hit.confidence), (Some(2), EXTRACTED_WEIGHT));
    assert_eq!(index.postings("library").len(), 1);
}

#[test]
fn partial_probe_scales_by_edit_similarity() {
    let index = KeywordIndex::build(&corpus(), &EngineConfig::default());
    let hit = index.short_query_match("librar");
    assert_eq!(hit.record, Some(2));
    assert_eq!(hit.match_kind, MatchKind::Keyword);
    assert!(hit.confidence > 0.5 && hit.confidence < EXTRACTED_WEIGHT, "scaled confidence {}", hit.confidence);
}

#[test]
fn unknown_and_empty_queries_do_not_match() {
    let index = KeywordIndex::build(&corpus(), &EngineConfig::default());
    for q in ["", "?", "zz", "xylophone"] {
        let hit = index.short_query_match(q);
        assert_eq!(hit.match_kind, MatchKind::None, "{q:?}");
        assert_eq!(hit.record, None);
        assert_eq!(hit.confidence, 0.0);
    }
}

#[test]
fn keyword_extraction_skips_noise() {
    assert_eq!(extract_keywords("What is the GPA and how is GPA computed?"), vec!["gpa", "computed"]);
}
