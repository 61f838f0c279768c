//! Exact-phrase and keyword lookup tables for the short-query fast path.

use std::collections::{BTreeMap, HashMap};

use faqmatch_core::config::EngineConfig;
use faqmatch_core::corpus::Corpus;
use faqmatch_core::types::{MatchKind, MatchResult, RecordId};
use tracing::info;

use crate::fuzzy::edit_similarity;
use crate::normalizer::word_tokens;
use crate::stopwords::{is_interrogative, is_stopword};

pub const CURATED_WEIGHT: f32 = 1.0;
pub const EXTRACTED_WEIGHT: f32 = 0.8;
/// Variants with at most this many words go into the exact map.
pub const EXACT_MAX_TOKENS: usize = 3;
const MIN_PARTIAL_LEN: usize = 3;

/// Lowercased words joined by single spaces, punctuation removed.
pub fn canonical_key(text: &str) -> String { word_tokens(text).join(" ") }

/// Significant words of `text`, first-seen order, no duplicates.
///
/// Stopwords, interrogatives and words shorter than three characters are
/// skipped. Words are not stemmed.
pub fn extract_keywords(text: &str) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for token in word_tokens(text) {
        if token.chars().count() < 3 || is_stopword(&token) || is_interrogative(&token) { continue; }
        if !out.contains(&token) { out.push(token); }
    }
    out
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Posting {
    pub record: RecordId,
    pub weight: f32,
}

#[derive(Debug, Default)]
pub struct KeywordIndex {
    exact: HashMap<String, RecordId>,
    keywords: BTreeMap<String, Vec<Posting>>,
}

impl KeywordIndex {
    pub fn build(corpus: &Corpus, config: &EngineConfig) -> Self {
        let mut index = Self::default();
        for (id, record) in corpus.for_each_record() {
            for variant in corpus.question_variants_of(id) {
                let key = canonical_key(variant);
                if !key.is_empty() && key.split(' ').count() <= EXACT_MAX_TOKENS {
                    index.exact.entry(key).or_insert(id);
                }
            }
            if let Some(words) = config.category_keywords(&record.category) {
                for word in words { index.add(canonical_key(word), id, CURATED_WEIGHT); }
            }
            for token in extract_keywords(&corpus.combined_question_text(id)) {
                index.add(token, id, EXTRACTED_WEIGHT);
            }
        }
        for postings in index.keywords.values_mut() {
            postings.sort_by(|a, b| b.weight.total_cmp(&a.weight).then(a.record.cmp(&b.record)));
        }
        info!(exact = index.exact.len(), keywords = index.keywords.len(), "keyword index built");
        index
    }

    fn add(&mut self, keyword: String, record: RecordId, weight: f32) {
        if keyword.is_empty() { return; }
        let postings = self.keywords.entry(keyword).or_default();
        match postings.iter_mut().find(|p| p.record == record) {
            Some(existing) => existing.weight = existing.weight.max(weight),
            None => postings.push(Posting { record, weight }),
        }
    }

    pub fn exact_len(&self) -> usize { self.exact.len() }

    pub fn keyword_len(&self) -> usize { self.keywords.len() }

    pub fn postings(&self, keyword: &str) -> &[Posting] {
        self.keywords.get(keyword).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Exact phrase, then whole-query keyword, then best substring keyword.
    pub fn short_query_match(&self, text: &str) -> MatchResult {
        let key = canonical_key(text);
        if key.is_empty() {
            return MatchResult::none();
        }
        if let Some(&record) = self.exact.get(&key) {
            return MatchResult::new(record, 1.0, MatchKind::Exact);
        }
        if let Some(best) = self.postings(&key).first() {
            return MatchResult::new(best.record, best.weight, MatchKind::Keyword);
        }
        if key.chars().count() < MIN_PARTIAL_LEN {
            return MatchResult::none();
        }

        let mut best: Option<(RecordId, f32)> = None;
        for (keyword, postings) in &self.keywords {
            if keyword.chars().count() < MIN_PARTIAL_LEN { continue; }
            if !(key.contains(keyword.as_str()) || keyword.contains(key.as_str())) { continue; }
            let Some(top) = postings.first() else { continue };
            let confidence = top.weight * edit_similarity(&key, keyword);
            if best.is_none_or(|(_, c)| confidence > c) {
                best = Some((top.record, confidence));
            }
        }
        match best {
            Some((record, confidence)) if confidence > 0.0 => MatchResult::new(record, confidence, MatchKind::Keyword),
            _ => MatchResult::none(),
        }
    }
}
