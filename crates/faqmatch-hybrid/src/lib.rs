//! faqmatch-hybrid
//!
//! Combines the keyword, fuzzy and semantic signals into one ranking and
//! runs the response cascade on top of it.

pub mod classifier;
pub mod combiner;
pub mod context;
pub mod engine;
pub mod selector;
pub mod small_talk;

pub use context::{ContextTracker, ConversationState, HistoryEntry};
pub use engine::{CategoryCount, DebugQuestion, EngineStats, FaqEngine, HealthReport, MatchOutcome, TEST_QUESTIONS};
pub use small_talk::SmallTalk;
