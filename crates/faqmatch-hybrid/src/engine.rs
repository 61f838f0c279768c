//! The FAQ engine: owns the read-only indices, the per-user context and the
//! usage counters, and turns `(message, user_id)` into a [`ChatResponse`].

use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;
use tracing::{debug, info};

use faqmatch_core::config::EngineConfig;
use faqmatch_core::corpus::{Corpus, VariantKind};
use faqmatch_core::error::Result;
use faqmatch_core::traits::Normalizer;
use faqmatch_core::types::{CandidateScore, ChatResponse, MatchKind, MatchResult, QueryClass, QueryType, RecordId, ResponseState};
use faqmatch_text::keyword::extract_keywords;
use faqmatch_text::{select_normalizer, CachedNormalizer, KeywordIndex};
use faqmatch_vector::SemanticIndex;

use crate::classifier::{classify, weights_for};
use crate::combiner::{best_variant, rank, score_candidate, QueryView, RecordProfile};
use crate::context::ContextTracker;
use crate::selector::{cascade, clarify_text, contextual_help_text, no_match_text, EMPTY_PROMPT, GENERAL_CATEGORY, NO_MATCH_QUESTION};
use crate::small_talk;

/// Questions offered to people trying the engine out.
pub const TEST_QUESTIONS: &[&str] = &[
    "Hi there!",
    "What is GPA?",
    "How can I get admission in UMT for software engineering?",
    "What are the admission requirements?",
    "Are there any scholarships available?",
    "What is the fee structure?",
];

/// Result of scoring one query, before any response text is produced.
#[derive(Debug, Clone)]
pub struct MatchOutcome {
    pub result: MatchResult,
    pub class: QueryClass,
    /// Empty when the short-query fast path answered.
    pub ranked: Vec<CandidateScore>,
    pub fast_path: bool,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct EngineStats {
    pub total_queries: u64,
    pub short_queries: u64,
    pub short_fraction: f64,
    pub cache_hits: u64,
    pub cache_misses: u64,
    pub active_users: usize,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct HealthReport {
    pub status: &'static str,
    pub total_faqs: usize,
    pub total_questions: usize,
    pub normalizer: &'static str,
    pub semantic_available: bool,
    pub semantic_terms: usize,
    pub source: String,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct CategoryCount {
    pub name: String,
    pub count: usize,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct DebugQuestion {
    pub index: usize,
    pub text: String,
    pub original: String,
    pub category: String,
    pub kind: VariantKind,
}

#[derive(Debug, Default)]
struct Counters {
    total: AtomicU64,
    short: AtomicU64,
}

pub struct FaqEngine {
    config: EngineConfig,
    corpus: Corpus,
    normalizer: CachedNormalizer<Box<dyn Normalizer>>,
    keywords: KeywordIndex,
    semantic: SemanticIndex,
    profiles: Vec<RecordProfile>,
    context: ContextTracker,
    counters: Counters,
}

impl FaqEngine {
    /// Build every index over `corpus`, picking the normalizer from config.
    pub fn new(config: EngineConfig, corpus: Corpus) -> Result<Self> {
        let normalizer = select_normalizer(&config.linguistics);
        Self::with_normalizer(config, corpus, normalizer)
    }

    pub fn with_normalizer(config: EngineConfig, corpus: Corpus, normalizer: Box<dyn Normalizer>) -> Result<Self> {
        config.validate()?;
        let normalizer = CachedNormalizer::new(normalizer, config.cache.capacity);
        let keywords = KeywordIndex::build(&corpus, &config);
        let semantic = SemanticIndex::build(&corpus, &normalizer, &config.semantic);
        let profiles = corpus
            .for_each_record()
            .map(|(id, record)| {
                let combined_text = corpus.combined_question_text(id);
                let normalized = normalizer.normalize(&combined_text);
                RecordProfile { combined_text, normalized, category_lower: record.category.trim().to_lowercase() }
            })
            .collect();
        info!(
            records = corpus.len(),
            questions = corpus.total_questions(),
            normalizer = normalizer.name(),
            semantic = semantic.is_available(),
            "faq engine ready"
        );
        Ok(Self { config, corpus, normalizer, keywords, semantic, profiles, context: ContextTracker::new(), counters: Counters::default() })
    }

    /// Load the corpus named by `config.data.corpus_path`, falling back to
    /// the built-in sample when it cannot be read.
    pub fn from_config(config: EngineConfig) -> Result<Self> {
        config.validate()?;
        let path = config.data.resolved_corpus_path(&std::env::current_dir()?);
        let corpus = Corpus::load_or_sample(&path);
        Self::new(config, corpus)
    }

    pub fn config(&self) -> &EngineConfig { &self.config }

    pub fn corpus(&self) -> &Corpus { &self.corpus }

    /// Score `message` against the corpus without touching any user state.
    pub fn match_query(&self, message: &str) -> MatchOutcome {
        let class = classify(message);
        if class == QueryClass::Short {
            let fast = self.keywords.short_query_match(message);
            if fast.confidence > self.config.thresholds.fast_path {
                debug!(?fast, "short-query fast path");
                return MatchOutcome { result: fast, class, ranked: Vec::new(), fast_path: true };
            }
        }

        let view = QueryView::new(message, self.normalizer.normalize(message));
        let weights = weights_for(&self.config.weights, class);
        let semantic = self.semantic.scores(&view.normalized);
        let scores = self
            .profiles
            .iter()
            .enumerate()
            .map(|(id, profile)| {
                let s = semantic.get(id).copied().unwrap_or(0.0);
                score_candidate(id, &view, profile, s, &weights, &self.config)
            })
            .collect();
        let ranked = rank(scores);

        let result = match ranked.first() {
            Some(best) if best.combined > self.config.thresholds.clarify => {
                MatchResult::new(best.record, best.combined, MatchKind::Semantic)
            }
            _ => MatchResult::none(),
        };
        debug!(?class, best = ranked.first().map(|c| c.combined), "ranked candidates");
        MatchOutcome { result, class, ranked, fast_path: false }
    }

    /// Answer one message for one user, updating that user's context.
    pub fn respond(&self, message: &str, user_id: &str) -> ChatResponse {
        let message = message.trim();
        if message.is_empty() {
            return ChatResponse {
                response: EMPTY_PROMPT.to_string(),
                category: GENERAL_CATEGORY.to_string(),
                confidence: 0.0,
                matched_question: String::new(),
                suggestions: None,
                query_type: QueryType::Empty,
                state: ResponseState::Empty,
                match_kind: MatchKind::None,
            };
        }
        self.counters.total.fetch_add(1, Ordering::Relaxed);

        if let Some(intent) = small_talk::detect(message) {
            let discussed = self.context.discussed_categories(user_id);
            let reply = small_talk::reply(intent, &discussed, &self.config.help_topics);
            self.context.note(user_id, message, MatchResult::none(), None);
            debug!(?intent, "small talk");
            return ChatResponse {
                response: reply,
                category: GENERAL_CATEGORY.to_string(),
                confidence: 1.0,
                matched_question: message.to_string(),
                suggestions: None,
                query_type: QueryType::General,
                state: ResponseState::SmallTalk,
                match_kind: MatchKind::None,
            };
        }

        let outcome = self.match_query(message);
        if outcome.class == QueryClass::Short {
            self.counters.short.fetch_add(1, Ordering::Relaxed);
        }
        let last_category = self.context.last_category(user_id);
        let state = cascade(outcome.result.confidence, &self.config.thresholds, last_category.is_some());
        let query_type = QueryType::from(outcome.class);

        let response = match (state, outcome.result.record.and_then(|id| self.corpus.get(id).map(|r| (id, r)))) {
            (ResponseState::Direct | ResponseState::Clarify, Some((id, record))) => {
                let matched = best_variant(&self.corpus, id, message).unwrap_or(record.canonical_question.as_str()).to_string();
                let (text, suggestions) = if state == ResponseState::Direct {
                    (record.answer.clone(), None)
                } else {
                    (clarify_text(&matched, &record.answer), self.alternatives(&outcome.ranked, id))
                };
                self.context.note(user_id, message, outcome.result, Some(&record.category));
                ChatResponse {
                    response: text,
                    category: record.category.clone(),
                    confidence: outcome.result.confidence,
                    matched_question: matched,
                    suggestions,
                    query_type,
                    state,
                    match_kind: outcome.result.match_kind,
                }
            }
            (ResponseState::ContextualHelp, _) => {
                let category = last_category.unwrap_or_default();
                let related = self.questions_in(&category);
                self.context.note(user_id, message, MatchResult::none(), None);
                self.fallback(contextual_help_text(&category, &related), Some(related), query_type, ResponseState::ContextualHelp)
            }
            _ => {
                let concepts = extract_keywords(message);
                self.context.note(user_id, message, MatchResult::none(), None);
                let topics = (!self.config.help_topics.is_empty()).then(|| self.config.help_topics.clone());
                self.fallback(no_match_text(&concepts, &self.config.help_topics), topics, query_type, ResponseState::NoMatch)
            }
        };
        debug!(state = ?response.state, confidence = response.confidence, "responded");
        response
    }

    fn fallback(&self, response: String, suggestions: Option<Vec<String>>, query_type: QueryType, state: ResponseState) -> ChatResponse {
        ChatResponse {
            response,
            category: GENERAL_CATEGORY.to_string(),
            confidence: 0.0,
            matched_question: NO_MATCH_QUESTION.to_string(),
            suggestions,
            query_type,
            state,
            match_kind: MatchKind::None,
        }
    }

    /// Canonical questions of other candidates above the suggestion floor.
    fn alternatives(&self, ranked: &[CandidateScore], chosen: RecordId) -> Option<Vec<String>> {
        let floor = self.config.thresholds.suggestion_floor;
        let out: Vec<String> = ranked
            .iter()
            .filter(|c| c.record != chosen && c.combined > floor)
            .filter_map(|c| self.corpus.get(c.record))
            .map(|r| r.canonical_question.clone())
            .take(self.config.max_suggestions)
            .collect();
        (!out.is_empty()).then_some(out)
    }

    fn questions_in(&self, category: &str) -> Vec<String> {
        self.corpus
            .by_category(category)
            .iter()
            .filter_map(|id| self.corpus.get(*id))
            .map(|r| r.canonical_question.clone())
            .take(self.config.max_suggestions)
            .collect()
    }

    pub fn reset_user(&self, user_id: &str) -> bool { self.context.reset(user_id) }

    pub fn context(&self) -> &ContextTracker { &self.context }

    pub fn categories(&self) -> Vec<CategoryCount> {
        self.corpus.categories().into_iter().map(|(name, count)| CategoryCount { name, count }).collect()
    }

    pub fn stats(&self) -> EngineStats {
        let total = self.counters.total.load(Ordering::Relaxed);
        let short = self.counters.short.load(Ordering::Relaxed);
        let cache = self.normalizer.cache_stats();
        EngineStats {
            total_queries: total,
            short_queries: short,
            short_fraction: if total == 0 { 0.0 } else { short as f64 / total as f64 },
            cache_hits: cache.hits,
            cache_misses: cache.misses,
            active_users: self.context.user_count(),
        }
    }

    pub fn health(&self) -> HealthReport {
        HealthReport {
            status: "healthy",
            total_faqs: self.corpus.len(),
            total_questions: self.corpus.total_questions(),
            normalizer: self.normalizer.name(),
            semantic_available: self.semantic.is_available(),
            semantic_terms: self.semantic.vocabulary_len(),
            source: self.corpus.source().label(),
        }
    }

    /// The first `limit` flattened questions with their normalized form.
    pub fn debug_questions(&self, limit: usize) -> Vec<DebugQuestion> {
        self.corpus
            .questions()
            .take(limit)
            .enumerate()
            .map(|(index, q)| DebugQuestion {
                index,
                text: self.normalizer.normalize(q.text).as_text(),
                original: q.text.to_string(),
                category: self.corpus.get(q.record).map(|r| r.category.clone()).unwrap_or_default(),
                kind: q.kind,
            })
            .collect()
    }

    pub fn sample_questions(&self) -> &'static [&'static str] { TEST_QUESTIONS }
}
