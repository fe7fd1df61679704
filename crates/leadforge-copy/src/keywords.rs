//! Frequency-ranked keyword extraction from free text.

use once_cell::sync::Lazy;
use std::collections::{HashMap, HashSet};

use crate::text::normalize_text;

/// Default number of keywords returned.
pub const DEFAULT_MAX_KEYWORDS: usize = 6;

/// Common English words that carry no campaign signal.
///
/// Only words longer than three characters are listed; shorter tokens are
/// discarded before the stop-word check.
static STOP_WORDS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "about", "above", "after", "again", "against", "almost", "also", "because", "been",
        "before", "being", "between", "could", "does", "each", "every", "from", "have", "here",
        "into", "just", "more", "much", "only", "other", "over", "should", "some", "than",
        "that", "their", "them", "then", "there", "these", "they", "this", "those", "through",
        "under", "very", "want", "were", "what", "when", "where", "which", "while", "will",
        "with", "would", "your",
    ]
    .into_iter()
    .collect()
});

/// Whether `word` is in the stop-word set.
pub fn is_stop_word(word: &str) -> bool {
    STOP_WORDS.contains(word)
}

/// Extract up to `max` keywords ranked by descending frequency.
///
/// Tokens are lower-cased runs of ASCII letters and digits. Tokens of three
/// characters or fewer, purely numeric tokens and stop words are dropped.
/// Ties keep first-seen order.
pub fn extract_keywords(text: &str, max: usize) -> Vec<String> {
    let lowered = normalize_text(text).to_lowercase();

    let mut order: Vec<(&str, usize)> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();

    for token in lowered.split(|c: char| !(c.is_ascii_lowercase() || c.is_ascii_digit())) {
        if token.len() <= 3 || is_stop_word(token) || token.bytes().all(|b| b.is_ascii_digit()) {
            continue;
        }
        match index.get(token) {
            Some(&slot) => order[slot].1 += 1,
            None => {
                index.insert(token, order.len());
                order.push((token, 1));
            }
        }
    }

    // stable: equal counts stay in first-seen order
    order.sort_by(|a, b| b.1.cmp(&a.1));
    order
        .into_iter()
        .take(max)
        .map(|(token, _)| token.to_string())
        .collect()
}
