use crate::types::NormalizedText;

/// Turns raw text into the token sequence every index consumes.
///
/// Implementations must be pure: the same input always yields the same
/// output for a given implementation.
pub trait Normalizer: Send + Sync {
    /// Short identifier reported by health checks (`linguistic`, `basic`).
    fn name(&self) -> &'static str;
    fn normalize(&self, text: &str) -> NormalizedText;
}

impl<N: Normalizer + ?Sized> Normalizer for Box<N> {
    fn name(&self) -> &'static str { (**self).name() }
    fn normalize(&self, text: &str) -> NormalizedText { (**self).normalize(text) }
}

impl<N: Normalizer + ?Sized> Normalizer for std::sync::Arc<N> {
    fn name(&self) -> &'static str { (**self).name() }
    fn normalize(&self, text: &str) -> NormalizedText { (**self).normalize(text) }
}
