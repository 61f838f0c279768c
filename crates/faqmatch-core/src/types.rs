//! Domain types shared by the normalizer, the indices and the engine.

use serde::{Deserialize, Serialize};

/// Stable position of a record inside a loaded corpus.
pub type RecordId = usize;

/// One stored question/answer unit.
///
/// - `category`: topic label ("Admissions", "Fees", ...)
/// - `canonical_question`: the question as written by the FAQ author
/// - `answer`: returned verbatim on a confident match
/// - `question_variants`: paraphrases of the canonical question
///
/// The JSON field names follow the scraped dataset (`original_question`,
/// `possible_questions`).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FaqRecord {
    pub category: String,
    #[serde(rename = "original_question")]
    pub canonical_question: String,
    pub answer: String,
    #[serde(rename = "possible_questions", default)]
    pub question_variants: Vec<String>,
}

impl FaqRecord {
    pub fn new(category: &str, canonical_question: &str, answer: &str, variants: &[&str]) -> Self {
        Self {
            category: category.to_string(),
            canonical_question: canonical_question.to_string(),
            answer: answer.to_string(),
            question_variants: variants.iter().map(|v| v.to_string()).collect(),
        }
    }
}

/// Output of a normalizer: an ordered token sequence.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NormalizedText {
    tokens: Vec<String>,
}

impl NormalizedText {
    pub fn new(tokens: Vec<String>) -> Self { Self { tokens } }

    pub fn tokens(&self) -> &[String] { &self.tokens }

    pub fn is_empty(&self) -> bool { self.tokens.is_empty() }

    pub fn len(&self) -> usize { self.tokens.len() }

    /// Tokens joined by single spaces.
    pub fn as_text(&self) -> String { self.tokens.join(" ") }
}

/// Which lookup produced a match.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum MatchKind {
    Exact,
    Keyword,
    Semantic,
    None,
}

/// The engine's match contract.
///
/// `confidence` is always within `[0, 1]`; a `MatchKind::None` result never
/// carries a record and always has zero confidence.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct MatchResult {
    pub record: Option<RecordId>,
    pub confidence: f32,
    pub match_kind: MatchKind,
}

impl MatchResult {
    pub fn none() -> Self {
        Self { record: None, confidence: 0.0, match_kind: MatchKind::None }
    }

    pub fn new(record: RecordId, confidence: f32, match_kind: MatchKind) -> Self {
        if match_kind == MatchKind::None {
            return Self::none();
        }
        Self { record: Some(record), confidence: clamp_unit(confidence), match_kind }
    }

    pub fn is_none(&self) -> bool { self.match_kind == MatchKind::None }
}

/// Per-candidate signal breakdown, recomputed for every query.
#[derive(Debug, Clone, Copy, Serialize, PartialEq)]
pub struct CandidateScore {
    pub record: RecordId,
    pub semantic: f32,
    pub fuzzy: f32,
    pub keyword: f32,
    pub category: f32,
    pub combined: f32,
}

/// Token-count bucket driving the signal weights.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum QueryClass {
    Short,
    Normal,
    Complex,
}

/// Reported shape of the query in a response.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum QueryType {
    Empty,
    General,
    Short,
    Normal,
    Complex,
}

impl From<QueryClass> for QueryType {
    fn from(class: QueryClass) -> Self {
        match class {
            QueryClass::Short => QueryType::Short,
            QueryClass::Normal => QueryType::Normal,
            QueryClass::Complex => QueryType::Complex,
        }
    }
}

/// Terminal state of the response cascade.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ResponseState {
    Empty,
    SmallTalk,
    Direct,
    Clarify,
    ContextualHelp,
    NoMatch,
}

/// What the request layer receives for one `(message, user_id)` pair.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChatResponse {
    pub response: String,
    pub category: String,
    pub confidence: f32,
    pub matched_question: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestions: Option<Vec<String>>,
    pub query_type: QueryType,
    pub state: ResponseState,
    pub match_kind: MatchKind,
}

/// Clamp into `[0, 1]`, mapping NaN to zero.
pub fn clamp_unit(value: f32) -> f32 {
    if value.is_nan() { 0.0 } else { value.clamp(0.0, 1.0) }
}
