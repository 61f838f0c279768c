use faqmatch_core::config::SemanticConfig;
use faqmatch_core::corpus::Corpus;
use faqmatch_core::traits::Normalizer;
use faqmatch_core::types::{NormalizedText, RecordId};

use crate::index_build::{build_space, log_outcome, Vocabulary};
use crate::sparse::SparseVector;

enum IndexState {
	Ready { vocabulary: Vocabulary, vectors: Vec<SparseVector> },
	Unavailable { reason: String, records: usize },
}

/// Cosine similarity between a normalized query and every record's combined question text.
///
/// When no vocabulary can be built the index stays usable and scores every record 0.
pub struct SemanticIndex { state: IndexState }

impl SemanticIndex {
	pub fn build(corpus: &Corpus, normalizer: &dyn Normalizer, config: &SemanticConfig) -> Self {
		let built = build_space(corpus, normalizer, config);
		log_outcome(&built);
		let state = match built {
			Ok(space) => IndexState::Ready { vocabulary: space.vocabulary, vectors: space.vectors },
			Err(e) => IndexState::Unavailable { reason: e.to_string(), records: corpus.len() },
		};
		Self { state }
	}

	pub fn is_available(&self) -> bool { matches!(self.state, IndexState::Ready { .. }) }

	pub fn unavailable_reason(&self) -> Option<&str> {
		match &self.state { IndexState::Unavailable { reason, .. } => Some(reason.as_str()), IndexState::Ready { .. } => None }
	}

	pub fn vocabulary(&self) -> Option<&Vocabulary> {
		match &self.state { IndexState::Ready { vocabulary, .. } => Some(vocabulary), IndexState::Unavailable { .. } => None }
	}

	pub fn vocabulary_len(&self) -> usize {
		match &self.state { IndexState::Ready { vocabulary, .. } => vocabulary.len(), IndexState::Unavailable { .. } => 0 }
	}

	pub fn len(&self) -> usize {
		match &self.state { IndexState::Ready { vectors, .. } => vectors.len(), IndexState::Unavailable { records, .. } => *records }
	}

	pub fn is_empty(&self) -> bool { self.len() == 0 }

	/// One score in [0,1] per record, aligned with record ids.
	pub fn scores(&self, query: &NormalizedText) -> Vec<f32> {
		match &self.state {
			IndexState::Unavailable { records, .. } => vec![0.0; *records],
			IndexState::Ready { vocabulary, vectors } => {
				let q = vocabulary.vectorize(query);
				if q.is_empty() { return vec![0.0; vectors.len()]; }
				vectors.iter().map(|v| { let s = q.cosine(v); if s.is_finite() { s.clamp(0.0, 1.0) } else { 0.0 } }).collect()
			}
		}
	}

	/// Records sorted by descending score; equal scores keep corpus order.
	pub fn rank(&self, query: &NormalizedText) -> Vec<(RecordId, f32)> {
		let mut ranked: Vec<(RecordId, f32)> = self.scores(query).into_iter().enumerate().collect();
		ranked.sort_by(|a, b| b.1.total_cmp(&a.1).then(a.0.cmp(&b.0)));
		ranked
	}
}
