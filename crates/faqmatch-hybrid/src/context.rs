//! Per-user conversation state.
//!
//! Each user key owns its own mutex, so updates for one user are serialized
//! while different users never contend beyond the map shard.

use std::sync::Arc;

use dashmap::DashMap;
use parking_lot::Mutex;
use serde::Serialize;

use faqmatch_core::types::MatchResult;

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct HistoryEntry {
    pub query: String,
    pub result: MatchResult,
    pub category: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct ConversationState {
    pub last_category: Option<String>,
    pub history: Vec<HistoryEntry>,
}

#[derive(Debug, Default)]
pub struct ContextTracker {
    users: DashMap<String, Arc<Mutex<ConversationState>>>,
}

impl ContextTracker {
    pub fn new() -> Self { Self::default() }

    fn state_for(&self, user: &str) -> Arc<Mutex<ConversationState>> {
        if let Some(existing) = self.users.get(user) {
            return Arc::clone(existing.value());
        }
        Arc::clone(self.users.entry(user.to_string()).or_default().value())
    }

    /// Append to history; `last_category` only moves when a record matched.
    pub fn note(&self, user: &str, query: &str, result: MatchResult, category: Option<&str>) {
        let state = self.state_for(user);
        let mut state = state.lock();
        let category = if result.record.is_some() { category.map(str::to_string) } else { None };
        if let Some(c) = &category {
            state.last_category = Some(c.clone());
        }
        state.history.push(HistoryEntry { query: query.to_string(), result, category });
    }

    pub fn last_category(&self, user: &str) -> Option<String> {
        self.users.get(user).and_then(|s| s.value().lock().last_category.clone())
    }

    /// Forget everything about `user`. Returns whether any state existed.
    pub fn reset(&self, user: &str) -> bool { self.users.remove(user).is_some() }

    pub fn snapshot(&self, user: &str) -> Option<ConversationState> {
        self.users.get(user).map(|s| s.value().lock().clone())
    }

    /// Categories seen in the user's history, first-seen order, no duplicates.
    pub fn discussed_categories(&self, user: &str) -> Vec<String> {
        let Some(state) = self.snapshot(user) else { return Vec::new() };
        let mut out: Vec<String> = Vec::new();
        for category in state.history.into_iter().filter_map(|h| h.category) {
            if !out.contains(&category) {
                out.push(category);
            }
        }
        out
    }

    pub fn user_count(&self) -> usize { self.users.len() }
}

#[cfg(test)]
mod tests {
    use super::*;
    use faqmatch_core::types::MatchKind;

    #[test]
    fn last_category_only_tracks_matches() {
        let tracker = ContextTracker::new();
        tracker.note("u1", "fees?", MatchResult::new(3, 0.8, MatchKind::Semantic), Some("Fees"));
        tracker.note("u1", "blah", MatchResult::none(), Some("Fees"));
        let state = tracker.snapshot("u1").expect("state");
        assert_eq!(state.last_category.as_deref(), Some("Fees"));
        assert_eq!(state.history.len(), 2);
        assert_eq!(state.history[1].category, None);
    }

    #[test]
    fn reset_clears_one_user_only() {
        let tracker = ContextTracker::new();
        tracker.note("a", "q", MatchResult::new(0, 0.9, MatchKind::Exact), Some("Hostel"));
        tracker.note("b", "q", MatchResult::new(1, 0.9, MatchKind::Exact), Some("Transport"));
        assert!(tracker.reset("a"));
        assert!(!tracker.reset("a"));
        assert_eq!(tracker.last_category("a"), None);
        assert_eq!(tracker.last_category("b").as_deref(), Some("Transport"));
    }

    #[test]
    fn discussed_categories_are_deduplicated_in_order() {
        let tracker = ContextTracker::new();
        for (i, c) in ["Fees", "Hostel", "Fees", "Academic"].iter().enumerate() {
            tracker.note("u", "q", MatchResult::new(i, 0.5, MatchKind::Semantic), Some(c));
        }
        assert_eq!(tracker.discussed_categories("u"), vec!["Fees", "Hostel", "Academic"]);
        assert!(tracker.discussed_categories("nobody").is_empty());
    }
}
