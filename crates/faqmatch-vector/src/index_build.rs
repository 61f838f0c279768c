//! TF-IDF vocabulary and per-record vectors.

use std::collections::HashMap;

use faqmatch_core::config::SemanticConfig;
use faqmatch_core::corpus::Corpus;
use faqmatch_core::error::{Error, Result};
use faqmatch_core::traits::Normalizer;
use faqmatch_core::types::NormalizedText;
use tracing::{info, warn};

use crate::sparse::SparseVector;

/// Unigrams followed by n-grams up to `ngram_max`, joined with spaces.
pub fn terms(tokens: &NormalizedText, ngram_max: usize) -> Vec<String> {
    let tokens = tokens.tokens();
    let mut out: Vec<String> = tokens.to_vec();
    for n in 2..=ngram_max.max(1) {
        out.extend(tokens.windows(n).map(|w| w.join(" ")));
    }
    out
}

#[derive(Debug, Clone)]
pub struct Vocabulary {
    ids: HashMap<String, u32>,
    idf: Vec<f32>,
    ngram_max: usize,
}

impl Vocabulary {
    pub fn len(&self) -> usize { self.idf.len() }

    pub fn is_empty(&self) -> bool { self.idf.is_empty() }

    pub fn contains(&self, term: &str) -> bool { self.ids.contains_key(term) }

    /// L2-normalized TF-IDF vector; terms outside the vocabulary are ignored.
    pub fn vectorize(&self, tokens: &NormalizedText) -> SparseVector {
        let mut counts: HashMap<u32, f32> = HashMap::new();
        for term in terms(tokens, self.ngram_max) {
            if let Some(&id) = self.ids.get(&term) {
                *counts.entry(id).or_insert(0.0) += 1.0;
            }
        }
        let weighted = counts.into_iter().map(|(id, tf)| (id, tf * self.idf[id as usize])).collect();
        SparseVector::from_unsorted(weighted).normalized()
    }
}

pub(crate) struct BuiltSpace {
    pub vocabulary: Vocabulary,
    pub vectors: Vec<SparseVector>,
}

/// Fit the vocabulary over every record's combined question text and vectorize each record.
///
/// Fails with `CapabilityUnavailable` when scoring is switched off and with
/// `Data` when the corpus leaves nothing to index.
pub(crate) fn build_space(corpus: &Corpus, normalizer: &dyn Normalizer, config: &SemanticConfig) -> Result<BuiltSpace> {
    if !config.enabled {
        return Err(Error::CapabilityUnavailable("semantic scoring disabled by configuration".to_string()));
    }
    let n = corpus.len();
    if n == 0 {
        return Err(Error::Data("empty corpus".to_string()));
    }

    let docs: Vec<NormalizedText> = corpus
        .for_each_record()
        .map(|(id, _)| normalizer.normalize(&corpus.combined_question_text(id)))
        .collect();
    let doc_terms: Vec<Vec<String>> = docs.iter().map(|d| terms(d, config.ngram_max)).collect();

    let mut doc_freq: HashMap<&str, usize> = HashMap::new();
    let mut total_freq: HashMap<&str, usize> = HashMap::new();
    for doc in &doc_terms {
        let mut seen: Vec<&str> = Vec::new();
        for term in doc {
            *total_freq.entry(term.as_str()).or_insert(0) += 1;
            if !seen.contains(&term.as_str()) {
                seen.push(term.as_str());
                *doc_freq.entry(term.as_str()).or_insert(0) += 1;
            }
        }
    }

    let max_doc_count = config.max_df * n as f32;
    let mut kept: Vec<(&str, usize)> = total_freq
        .into_iter()
        .filter(|(term, _)| doc_freq.get(term).is_some_and(|&df| df as f32 <= max_doc_count))
        .collect();
    kept.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(b.0)));
    kept.truncate(config.max_features);
    if kept.is_empty() {
        return Err(Error::Data("no informative terms after document-frequency pruning".to_string()));
    }
    let mut kept: Vec<&str> = kept.into_iter().map(|(term, _)| term).collect();
    kept.sort_unstable();

    let mut ids = HashMap::with_capacity(kept.len());
    let mut idf = Vec::with_capacity(kept.len());
    for (id, term) in kept.iter().enumerate() {
        let df = doc_freq.get(term).copied().unwrap_or(0) as f32;
        ids.insert(term.to_string(), id as u32);
        idf.push(((1.0 + n as f32) / (1.0 + df)).ln() + 1.0);
    }
    let vocabulary = Vocabulary { ids, idf, ngram_max: config.ngram_max.max(1) };
    let vectors = docs.iter().map(|d| vocabulary.vectorize(d)).collect();
    Ok(BuiltSpace { vocabulary, vectors })
}

pub(crate) fn log_outcome(result: &Result<BuiltSpace>) {
    match result {
        Ok(space) => info!(terms = space.vocabulary.len(), records = space.vectors.len(), "semantic index built"),
        Err(error) => warn!(%error, "semantic index unavailable, semantic scores will be zero"),
    }
}
