use faqmatch_core::config::{ClassWeights, SignalWeights};
use faqmatch_core::types::QueryClass;

pub const SHORT_MAX_TOKENS: usize = 2;
pub const NORMAL_MAX_TOKENS: usize = 6;

/// Bucket a raw query by its whitespace token count, before normalization.
pub fn classify(raw: &str) -> QueryClass {
    match raw.split_whitespace().count() {
        0..=SHORT_MAX_TOKENS => QueryClass::Short,
        n if n <= NORMAL_MAX_TOKENS => QueryClass::Normal,
        _ => QueryClass::Complex,
    }
}

pub fn weights_for(weights: &ClassWeights, class: QueryClass) -> SignalWeights { *weights.for_class(class) }
