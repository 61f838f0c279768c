//! Per-candidate signals and their weighted combination.

use std::collections::HashSet;

use faqmatch_core::config::{EngineConfig, SignalWeights};
use faqmatch_core::corpus::Corpus;
use faqmatch_core::types::{clamp_unit, CandidateScore, NormalizedText, RecordId};
use faqmatch_text::fuzzy;
use faqmatch_text::word_tokens;

const MIN_CATEGORY_WORD_LEN: usize = 3;

/// What the combiner needs to know about one record, computed once at build time.
#[derive(Debug, Clone)]
pub struct RecordProfile {
    pub combined_text: String,
    pub normalized: NormalizedText,
    pub category_lower: String,
}

/// The query in every form the signals consume.
#[derive(Debug, Clone)]
pub struct QueryView<'a> {
    pub raw: &'a str,
    pub words: Vec<String>,
    pub normalized: NormalizedText,
}

impl<'a> QueryView<'a> {
    pub fn new(raw: &'a str, normalized: NormalizedText) -> Self {
        Self { raw, words: word_tokens(raw), normalized }
    }
}

/// `|query ∩ candidate| / |distinct query tokens|` over normalized tokens.
pub fn keyword_overlap(query: &NormalizedText, candidate: &NormalizedText) -> f32 {
    let q: HashSet<&str> = query.tokens().iter().map(String::as_str).collect();
    if q.is_empty() {
        return 0.0;
    }
    let c: HashSet<&str> = candidate.tokens().iter().map(String::as_str).collect();
    q.intersection(&c).count() as f32 / q.len() as f32
}

/// 1.0 when the category name, or one of its longer words, appears among the
/// query's words (a trailing plural `s` is ignored); otherwise the share of
/// query words found in the category's curated vocabulary.
pub fn category_match(query: &QueryView<'_>, category_lower: &str, vocabulary: Option<&[String]>) -> f32 {
    let category_words = word_tokens(category_lower);
    if category_words.is_empty() || query.words.is_empty() {
        return 0.0;
    }
    let padded_query = format!(" {} ", query.words.join(" "));
    if padded_query.contains(&format!(" {} ", category_words.join(" "))) {
        return 1.0;
    }
    if category_words
        .iter()
        .filter(|w| w.chars().count() >= MIN_CATEGORY_WORD_LEN)
        .any(|c| query.words.iter().any(|q| singular(q) == singular(c)))
    {
        return 1.0;
    }
    let Some(words) = vocabulary else { return 0.0 };
    let hits = query.words.iter().filter(|w| words.iter().any(|v| v == *w)).count();
    hits as f32 / query.words.len() as f32
}

fn singular(word: &str) -> &str {
    word.strip_suffix('s').filter(|w| !w.is_empty()).unwrap_or(word)
}

/// Weighted sum of the four signals; non-finite inputs count as 0.
pub fn combine(weights: &SignalWeights, semantic: f32, fuzzy: f32, keyword: f32, category: f32) -> f32 {
    let total = weights.semantic * finite(semantic)
        + weights.fuzzy * finite(fuzzy)
        + weights.keyword * finite(keyword)
        + weights.category * finite(category);
    clamp_unit(total)
}

fn finite(value: f32) -> f32 { if value.is_finite() { clamp_unit(value) } else { 0.0 } }

/// Score one record. `semantic` comes precomputed from the semantic index.
pub fn score_candidate(
    record: RecordId,
    query: &QueryView<'_>,
    profile: &RecordProfile,
    semantic: f32,
    weights: &SignalWeights,
    config: &EngineConfig,
) -> CandidateScore {
    let fuzzy = fuzzy::score(query.raw, &profile.combined_text).combined();
    let keyword = keyword_overlap(&query.normalized, &profile.normalized);
    let category = category_match(query, &profile.category_lower, config.category_keywords(&profile.category_lower));
    let combined = combine(weights, semantic, fuzzy, keyword, category);
    CandidateScore {
        record,
        semantic: finite(semantic),
        fuzzy: finite(fuzzy),
        keyword: finite(keyword),
        category: finite(category),
        combined,
    }
}

/// Descending by combined score; equal scores keep the first-loaded record first.
pub fn rank(mut scores: Vec<CandidateScore>) -> Vec<CandidateScore> {
    scores.sort_by(|a, b| b.combined.total_cmp(&a.combined).then(a.record.cmp(&b.record)));
    scores
}

/// The record's variant closest to the query (first variant on ties).
pub fn best_variant<'c>(corpus: &'c Corpus, record: RecordId, query: &str) -> Option<&'c str> {
    let mut best: Option<(&str, f32)> = None;
    for variant in corpus.question_variants_of(record) {
        let s = fuzzy::score(query, variant).combined();
        if best.is_none_or(|(_, b)| s > b) {
            best = Some((variant, s));
        }
    }
    best.map(|(v, _)| v)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn view(raw: &str) -> QueryView<'_> {
        let normalized = NormalizedText::new(word_tokens(raw));
        QueryView::new(raw, normalized)
    }

    #[test]
    fn overlap_counts_distinct_query_tokens() {
        let q = NormalizedText::new(vec!["fee".into(), "fee".into(), "hostel".into()]);
        let c = NormalizedText::new(vec!["hostel".into(), "room".into()]);
        assert_eq!(keyword_overlap(&q, &c), 0.5);
        assert_eq!(keyword_overlap(&NormalizedText::default(), &c), 0.0);
    }

    #[test]
    fn category_name_in_query_scores_one() {
        for category in ["admissions", "fees", "hostel", "student affairs"] {
            let query = format!("tell me about {category} please");
            assert_eq!(category_match(&view(&query), category, None), 1.0, "{category}");
        }
        assert_eq!(category_match(&view("affairs office"), "student affairs", None), 1.0);
        assert_eq!(category_match(&view("admission deadline"), "admissions", None), 1.0);
        assert_eq!(category_match(&view("hostel fee"), "fees", None), 1.0);
    }

    #[test]
    fn category_words_must_match_whole_query_words() {
        assert_eq!(category_match(&view("feedback form"), "fees", None), 0.0);
        assert_eq!(category_match(&view("feedback form"), "fee", None), 0.0);
        assert_eq!(category_match(&view("hostelry nearby"), "hostel", None), 0.0);
        assert_eq!(category_match(&view("student affairsoffice"), "student affairs", None), 1.0);
    }

    #[test]
    fn category_falls_back_to_vocabulary_share() {
        let vocab = vec!["bus".to_string(), "route".to_string()];
        assert_eq!(category_match(&view("which bus route"), "transport", Some(&vocab)), 2.0 / 3.0);
        assert_eq!(category_match(&view("which bus route"), "transport", None), 0.0);
    }

    #[test]
    fn combine_ignores_non_finite_and_clamps() {
        let w = SignalWeights::new(0.4, 0.25, 0.25, 0.1);
        assert_eq!(combine(&w, f32::NAN, 0.0, 0.0, 0.0), 0.0);
        assert!((combine(&w, f32::INFINITY, 1.0, 1.0, 1.0) - 0.6).abs() < 1e-6);
        assert!((combine(&w, 1.0, 1.0, 1.0, 1.0) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn ties_go_to_first_loaded_record() {
        let mk = |record, combined| CandidateScore { record, semantic: 0.0, fuzzy: 0.0, keyword: 0.0, category: 0.0, combined };
        let ranked = rank(vec![mk(2, 0.5), mk(0, 0.2), mk(1, 0.5)]);
        let order: Vec<_> = ranked.iter().map(|c| c.record).collect();
        assert_eq!(order, vec![1, 2, 0]);
    }
}
