use std::collections::HashSet;

use crate::normalizer::word_tokens;

/// Both fuzzy signals for one (query, candidate) pair.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FuzzyScore {
    pub jaccard: f32,
    pub edit: f32,
}

impl FuzzyScore {
    /// The stronger of the two signals.
    pub fn combined(&self) -> f32 { self.jaccard.max(self.edit) }
}

/// `|A ∩ B| / |A ∪ B|` over lowercased word sets; 0 when either side is empty.
pub fn jaccard(a: &str, b: &str) -> f32 {
    let left: HashSet<String> = word_tokens(a).into_iter().collect();
    let right: HashSet<String> = word_tokens(b).into_iter().collect();
    if left.is_empty() || right.is_empty() {
        return 0.0;
    }
    let intersection = left.intersection(&right).count();
    let union = left.union(&right).count();
    intersection as f32 / union as f32
}

/// Calculate Levenshtein distance between two strings, in chars.
pub fn levenshtein_distance(s1: &str, s2: &str) -> usize {
    let s1_chars: Vec<char> = s1.chars().collect();
    let s2_chars: Vec<char> = s2.chars().collect();
    if s1_chars.is_empty() {
        return s2_chars.len();
    }
    if s2_chars.is_empty() {
        return s1_chars.len();
    }

    let mut prev: Vec<usize> = (0..=s2_chars.len()).collect();
    let mut curr = vec![0; s2_chars.len() + 1];
    for (i, a) in s1_chars.iter().enumerate() {
        curr[0] = i + 1;
        for (j, b) in s2_chars.iter().enumerate() {
            let cost = usize::from(a != b);
            curr[j + 1] = (prev[j + 1] + 1).min(curr[j] + 1).min(prev[j] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }
    prev[s2_chars.len()]
}

/// `1 - distance / max_len` on lowercased, whitespace-collapsed text.
pub fn edit_similarity(a: &str, b: &str) -> f32 {
    let a = a.split_whitespace().collect::<Vec<_>>().join(" ").to_lowercase();
    let b = b.split_whitespace().collect::<Vec<_>>().join(" ").to_lowercase();
    let max_len = a.chars().count().max(b.chars().count());
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }
    1.0 - levenshtein_distance(&a, &b) as f32 / max_len as f32
}

pub fn score(query: &str, candidate: &str) -> FuzzyScore {
    FuzzyScore { jaccard: jaccard(query, candidate), edit: edit_similarity(query, candidate) }
}
