//! Text normalizers.
//!
//! Both variants share [`canonicalize`]. The linguistic variant then runs the
//! tantivy analyzer (stopwords + English stemming); the basic variant only
//! splits on whitespace. The variant is picked once by [`select_normalizer`].

use faqmatch_core::config::LinguisticsConfig;
use faqmatch_core::error::{Error, Result};
use faqmatch_core::traits::Normalizer;
use faqmatch_core::types::NormalizedText;
use tracing::{info, warn};

/// Lowercase, replace everything except alphanumerics, whitespace, `-`, `?`
/// and `!` with spaces, and collapse whitespace.
///
/// `?` and `!` are kept as standalone tokens so they never glue onto words.
pub fn canonicalize(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars().flat_map(char::to_lowercase) {
        match ch {
            '?' | '!' => {
                out.push(' ');
                out.push(ch);
                out.push(' ');
            }
            c if c.is_alphanumeric() || c == '-' => out.push(c),
            _ => out.push(' '),
        }
    }
    out.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Canonical words of `text`: punctuation-only pieces and edge hyphens removed.
pub fn word_tokens(text: &str) -> Vec<String> {
    canonicalize(text)
        .split_whitespace()
        .map(|t| t.trim_matches('-'))
        .filter(|t| !t.is_empty() && *t != "?" && *t != "!")
        .map(str::to_string)
        .collect()
}

fn keep_token(token: &str) -> bool { token.chars().count() > 1 }

/// Whitespace split with single-character tokens removed.
#[derive(Debug, Default, Clone, Copy)]
pub struct BasicNormalizer;

impl Normalizer for BasicNormalizer {
    fn name(&self) -> &'static str { "basic" }

    fn normalize(&self, text: &str) -> NormalizedText {
        let tokens = canonicalize(text)
            .split_whitespace()
            .filter(|t| keep_token(t))
            .map(str::to_string)
            .collect();
        NormalizedText::new(tokens)
    }
}

#[cfg(feature = "linguistics")]
pub use linguistic::LinguisticNormalizer;

#[cfg(feature = "linguistics")]
mod linguistic {
    use tantivy::tokenizer::{TextAnalyzer, TokenStream};

    use super::{canonicalize, keep_token};
    use faqmatch_core::traits::Normalizer;
    use faqmatch_core::types::NormalizedText;

    /// Tokenize, drop stopwords (interrogatives kept), stem.
    #[derive(Clone)]
    pub struct LinguisticNormalizer {
        analyzer: TextAnalyzer,
    }

    impl LinguisticNormalizer {
        pub fn new() -> Self { Self { analyzer: crate::analyzer::build_analyzer() } }
    }

    impl Default for LinguisticNormalizer {
        fn default() -> Self { Self::new() }
    }

    impl Normalizer for LinguisticNormalizer {
        fn name(&self) -> &'static str { "linguistic" }

        fn normalize(&self, text: &str) -> NormalizedText {
            let canonical = canonicalize(text);
            let mut analyzer = self.analyzer.clone();
            let mut stream = analyzer.token_stream(&canonical);
            let mut tokens = Vec::new();
            while stream.advance() {
                let token = &stream.token().text;
                if keep_token(token) { tokens.push(token.clone()); }
            }
            NormalizedText::new(tokens)
        }
    }
}

/// The linguistic normalizer, if this build carries it.
pub fn linguistic_normalizer() -> Result<Box<dyn Normalizer>> {
    #[cfg(feature = "linguistics")]
    {
        Ok(Box::new(LinguisticNormalizer::new()))
    }
    #[cfg(not(feature = "linguistics"))]
    {
        Err(Error::CapabilityUnavailable("built without the `linguistics` feature".to_string()))
    }
}

/// Pick the normalizer variant once, at startup.
pub fn select_normalizer(config: &LinguisticsConfig) -> Box<dyn Normalizer> {
    let selected = if config.enabled {
        linguistic_normalizer()
    } else {
        Err(Error::CapabilityUnavailable("disabled by linguistics.enabled".to_string()))
    };
    match selected {
        Ok(normalizer) => {
            info!(normalizer = normalizer.name(), "text normalizer selected");
            normalizer
        }
        Err(e) => {
            warn!(error = %e, "using basic text normalizer");
            Box::new(BasicNormalizer)
        }
    }
}
