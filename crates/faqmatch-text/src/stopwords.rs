//! Stopword lists shared by the linguistic normalizer and keyword extraction.

use std::collections::HashSet;
use std::sync::OnceLock;

pub const ENGLISH: &[&str] = &[
    "a", "an", "and", "are", "as", "at", "be", "by", "for", "from", "has", "he", "in", "is", "it", "its", "of",
    "on", "that", "the", "to", "was", "will", "with", "or", "but", "not", "this", "these", "they", "them",
    "their", "there", "then", "than", "so", "if", "when", "where", "why", "how", "what", "which", "who", "whom",
    "whose", "can", "could", "should", "would", "may", "might", "must", "shall", "do", "does", "did", "have",
    "had", "having", "i", "me", "my", "we", "our", "you", "your", "she", "her", "his", "him", "am", "been",
    "being", "were", "about", "into", "any", "some", "all", "there", "here", "just", "also", "get", "tell",
    "please", "know", "want", "need", "like",
];

/// Transliterated Urdu/Hindi function words common in mixed-language queries.
pub const LOCAL_FUNCTION_WORDS: &[&str] = &[
    "hai", "hain", "ka", "ki", "ke", "ko", "se", "mein", "main", "aur", "ya", "bhi", "kya", "hota", "hoti",
    "tha", "thi", "yeh", "ye", "woh", "wo", "aap", "ap", "mujhe", "hum", "koi", "kar", "karna",
];

/// Interrogatives are never dropped: they carry the question's shape.
pub const PROTECTED: &[&str] = &["what", "how", "when", "where", "why", "who", "which"];

fn filter_set() -> &'static HashSet<&'static str> {
    static SET: OnceLock<HashSet<&'static str>> = OnceLock::new();
    SET.get_or_init(|| {
        ENGLISH
            .iter()
            .chain(LOCAL_FUNCTION_WORDS.iter())
            .copied()
            .filter(|w| !PROTECTED.contains(w))
            .collect()
    })
}

/// True for words the normalizer drops.
pub fn is_stopword(token: &str) -> bool { filter_set().contains(token) }

pub fn is_interrogative(token: &str) -> bool { PROTECTED.contains(&token) }

/// The drop list as owned strings, sorted for a stable analyzer build.
pub fn filter_list() -> Vec<String> {
    let mut words: Vec<String> = filter_set().iter().map(|s| s.to_string()).collect();
    words.sort();
    words
}
