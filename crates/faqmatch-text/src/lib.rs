//! faqmatch-text
//!
//! Text-side building blocks of the matcher: normalizers (tantivy analyzer
//! behind the `linguistics` feature), the LRU normalization cache, the
//! keyword index and the fuzzy scores.

#[cfg(feature = "linguistics")]
pub mod analyzer;
pub mod cache;
pub mod fuzzy;
pub mod keyword;
pub mod normalizer;
pub mod stopwords;

pub use cache::{CacheStats, CachedNormalizer, NormalizationCache};
pub use fuzzy::FuzzyScore;
pub use keyword::KeywordIndex;
#[cfg(feature = "linguistics")]
pub use normalizer::LinguisticNormalizer;
pub use normalizer::{canonicalize, select_normalizer, word_tokens, BasicNormalizer};
