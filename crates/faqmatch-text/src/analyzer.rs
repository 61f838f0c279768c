use tantivy::tokenizer::{Language, LowerCaser, SimpleTokenizer, Stemmer, StopWordFilter, TextAnalyzer};

use crate::stopwords;

/// Tokenize, lowercase, drop stopwords (interrogatives kept) and stem.
pub fn build_analyzer() -> TextAnalyzer {
	TextAnalyzer::builder(SimpleTokenizer::default())
		.filter(LowerCaser)
		.filter(StopWordFilter::remove(stopwords::filter_list()))
		.filter(Stemmer::new(Language::English))
		.build()
}
