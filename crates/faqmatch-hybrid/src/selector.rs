//! The confidence cascade and the text of each terminal state.

use faqmatch_core::config::Thresholds;
use faqmatch_core::types::ResponseState;

pub const EMPTY_PROMPT: &str = "Please type your question and I'll do my best to help.";
pub const NO_MATCH_QUESTION: &str = "No match found";
pub const GENERAL_CATEGORY: &str = "General";

/// Map the best combined score to a terminal state. Every comparison is strict.
///
/// A score of exactly `thresholds.direct` is `Clarify`; exactly
/// `thresholds.clarify` falls through to the low-confidence states.
pub fn cascade(score: f32, thresholds: &Thresholds, has_context: bool) -> ResponseState {
    if score > thresholds.direct {
        ResponseState::Direct
    } else if score > thresholds.clarify {
        ResponseState::Clarify
    } else if has_context {
        ResponseState::ContextualHelp
    } else {
        ResponseState::NoMatch
    }
}

pub fn clarify_text(matched_question: &str, answer: &str) -> String {
    format!("I think you're asking about \"{matched_question}\". Here's what I found:\n\n{answer}")
}

pub fn contextual_help_text(category: &str, related: &[String]) -> String {
    let mut out = format!(
        "I'm not sure I understood that. Since we were talking about {category}, you might find these helpful:\n"
    );
    for question in related {
        out.push_str("- ");
        out.push_str(question);
        out.push('\n');
    }
    out.push_str("\nOr feel free to ask about anything else.");
    out
}

pub fn no_match_text(concepts: &[String], help_topics: &[String]) -> String {
    let lead = if concepts.is_empty() {
        "I'm sorry, I couldn't find a specific answer to your question.".to_string()
    } else {
        format!("I'm sorry, I couldn't find a specific answer about {}.", concepts.join(", "))
    };
    if help_topics.is_empty() {
        return format!("{lead} Could you please rephrase it?");
    }
    format!("{lead} Could you please rephrase it or ask about {}?", join_or(help_topics))
}

fn join_or(items: &[String]) -> String {
    match items {
        [] => String::new(),
        [one] => one.clone(),
        [init @ .., last] => format!("{}, or {}", init.join(", "), last),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn boundaries_are_strict() {
        let t = Thresholds::default();
        assert_eq!(cascade(0.31, &t, false), ResponseState::Direct);
        assert_eq!(cascade(0.3, &t, false), ResponseState::Clarify);
        assert_eq!(cascade(0.151, &t, true), ResponseState::Clarify);
        assert_eq!(cascade(0.15, &t, true), ResponseState::ContextualHelp);
        assert_eq!(cascade(0.15, &t, false), ResponseState::NoMatch);
        assert_eq!(cascade(0.0, &t, false), ResponseState::NoMatch);
    }

    #[test]
    fn no_match_lists_topics() {
        let topics: Vec<String> = ["admissions", "fees", "examinations"].iter().map(|s| s.to_string()).collect();
        let text = no_match_text(&["parking".to_string()], &topics);
        assert!(text.contains("about parking"));
        assert!(text.ends_with("admissions, fees, or examinations?"));
    }
}
