//! Conversational messages answered without touching the corpus.

use faqmatch_text::keyword::{canonical_key, extract_keywords};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SmallTalk {
    Greeting,
    Thanks,
    Farewell,
    Wellbeing,
    Identity,
    Capabilities,
    Joke,
    Acknowledgement,
    Summary,
}

struct Rule {
    intent: SmallTalk,
    max_words: usize,
    phrases: &'static [&'static str],
}

// Checked in order; the first hit wins.
const RULES: &[Rule] = &[
    Rule { intent: SmallTalk::Summary, max_words: 8, phrases: &["what have we discussed", "what did we discuss", "what did we talk about", "what have we talked about", "conversation summary"] },
    Rule { intent: SmallTalk::Joke, max_words: 8, phrases: &["joke", "make me laugh", "something funny"] },
    Rule { intent: SmallTalk::Wellbeing, max_words: 6, phrases: &["how are you", "how r u", "how are u", "how is it going", "kya haal hai", "kaise ho"] },
    Rule { intent: SmallTalk::Identity, max_words: 6, phrases: &["who are you", "what are you", "what is your name", "whats your name", "are you a bot", "are you human"] },
    Rule { intent: SmallTalk::Capabilities, max_words: 7, phrases: &["what can you do", "how can you help", "what can i ask", "what do you know", "help me"] },
    Rule { intent: SmallTalk::Thanks, max_words: 5, phrases: &["thank you", "thanks", "thank", "thx", "shukriya", "jazakallah"] },
    Rule { intent: SmallTalk::Farewell, max_words: 4, phrases: &["bye", "goodbye", "good bye", "see you", "allah hafiz", "khuda hafiz", "take care"] },
    Rule { intent: SmallTalk::Greeting, max_words: 3, phrases: &["hi", "hello", "hey", "salam", "assalam", "assalam o alaikum", "assalamualaikum", "aoa", "good morning", "good afternoon", "good evening"] },
    Rule { intent: SmallTalk::Acknowledgement, max_words: 2, phrases: &["ok", "okay", "yes", "no", "cool", "great", "nice", "alright", "sure", "fine", "hmm", "got it"] },
];

// Words that may pad a small-talk phrase without turning it into a question.
const FILLER: &[&str] = &[
    "lot", "much", "far", "again", "today", "now", "dear", "buddy", "friend", "friends", "bot", "sir", "madam",
    "everyone", "guys", "doing", "very", "really", "anyway", "okay", "ok",
];

/// Small-talk intent of `message`, if it is conversational rather than a question.
///
/// A phrase only counts when nothing significant is left once it is removed:
/// "hi" is a greeting, "hi hostel fee" is a question.
pub fn detect(message: &str) -> Option<SmallTalk> {
    let key = canonical_key(message);
    if key.is_empty() {
        return None;
    }
    let words = key.split(' ').count();
    let padded = format!(" {key} ");
    RULES
        .iter()
        .filter(|rule| words <= rule.max_words)
        .find(|rule| {
            rule.phrases.iter().any(|p| {
                let phrase = format!(" {p} ");
                padded.contains(&phrase) && !has_topic(&padded.replacen(&phrase, " ", 1))
            })
        })
        .map(|rule| rule.intent)
}

fn has_topic(rest: &str) -> bool {
    extract_keywords(rest).iter().any(|w| !FILLER.contains(&w.as_str()))
}

/// Canned reply. `discussed` feeds the summary intent; `help_topics` the capability list.
pub fn reply(intent: SmallTalk, discussed: &[String], help_topics: &[String]) -> String {
    let topics = help_topics.join(", ");
    match intent {
        SmallTalk::Greeting => "Hello! How may I help you today? You can ask me about university matters.".to_string(),
        SmallTalk::Thanks => "You're welcome! Let me know if there is anything else you'd like to know.".to_string(),
        SmallTalk::Farewell => "Goodbye! Feel free to come back whenever you have more questions.".to_string(),
        SmallTalk::Wellbeing => "I'm doing well, thank you for asking! What would you like to know?".to_string(),
        SmallTalk::Identity => "I'm the university FAQ assistant. I answer common questions from the FAQ collection.".to_string(),
        SmallTalk::Capabilities => format!("I can answer frequently asked questions about {topics}. Just type your question."),
        SmallTalk::Joke => "Why did the student bring a ladder to class? Because they wanted to go to high school! Now, how can I help with your studies?".to_string(),
        SmallTalk::Acknowledgement => "Great! Is there anything else you'd like to ask?".to_string(),
        SmallTalk::Summary if discussed.is_empty() => "We haven't discussed any specific topics yet. What would you like to know?".to_string(),
        SmallTalk::Summary => format!("So far we've talked about: {}.", discussed.join(", ")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_common_intents() {
        assert_eq!(detect("Hi there!"), Some(SmallTalk::Greeting));
        assert_eq!(detect("tell me a joke"), Some(SmallTalk::Joke));
        assert_eq!(detect("Thanks a lot"), Some(SmallTalk::Thanks));
        assert_eq!(detect("how are you?"), Some(SmallTalk::Wellbeing));
        assert_eq!(detect("ok"), Some(SmallTalk::Acknowledgement));
        assert_eq!(detect("What have we discussed so far?"), Some(SmallTalk::Summary));
        assert_eq!(detect("bye"), Some(SmallTalk::Farewell));
    }

    #[test]
    fn questions_are_not_small_talk() {
        assert_eq!(detect("What is GPA?"), None);
        assert_eq!(detect("hi what are the admission requirements"), None);
        assert_eq!(detect("how to apply"), None);
        assert_eq!(detect("transport"), None);
        assert_eq!(detect(""), None);
    }

    #[test]
    fn short_questions_behind_a_greeting_are_not_small_talk() {
        for q in ["hi hostel fee", "help me with scholarships", "help me apply for admission", "hey gpa", "no hostel?", "ok transport"] {
            assert_eq!(detect(q), None, "{q}");
        }
        assert_eq!(detect("hi there"), Some(SmallTalk::Greeting));
        assert_eq!(detect("how are you doing today"), Some(SmallTalk::Wellbeing));
        assert_eq!(detect("help me"), Some(SmallTalk::Capabilities));
    }

    #[test]
    fn summary_lists_categories() {
        let discussed = vec!["Fees".to_string(), "Hostel".to_string()];
        assert!(reply(SmallTalk::Summary, &discussed, &[]).contains("Fees, Hostel"));
        assert!(reply(SmallTalk::Summary, &[], &[]).contains("haven't"));
    }
}
