//! Stop-list and word-shape configuration
//!
//! Both values are immutable once built and are handed to the filter and the
//! candidate generator explicitly, so two pipelines with different settings can
//! run side by side in one process.

use std::collections::HashSet;

/// Extremely common words that are never harvested and never offered as base forms
pub const COMMON_WORDS: &[&str] = &[
    "a", "an", "and", "any", "are", "as", "at", "be", "been", "being", "both", "but", "by", "can",
    "each", "every", "few", "for", "from", "he", "her", "here", "him", "his", "how", "if", "in",
    "is", "it", "its", "just", "many", "me", "more", "most", "much", "my", "no", "not", "of", "on",
    "one", "or", "other", "our", "she", "so", "some", "that", "the", "their", "them", "there",
    "these", "they", "this", "too", "to", "us", "very", "was", "we", "were", "what", "when",
    "where", "which", "who", "whom", "will", "with", "you", "your", "yes", "while", "three",
    "four", "five", "six", "nine", "ten", "porn", "fuck",
];

/// Case-insensitive set of words excluded from harvesting
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StopList {
    words: HashSet<String>,
}

impl StopList {
    /// Build a stop-list from arbitrary words; entries are lowercased
    pub fn new<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            words: words
                .into_iter()
                .map(|w| w.as_ref().trim().to_lowercase())
                .filter(|w| !w.is_empty())
                .collect(),
        }
    }

    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(&word.to_lowercase())
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

impl Default for StopList {
    fn default() -> Self {
        Self::new(COMMON_WORDS)
    }
}

/// Length bounds for a harvestable word, both exclusive
///
/// The defaults (3, 15) admit words of 4 to 14 characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WordShape {
    pub min_exclusive: usize,
    pub max_exclusive: usize,
}

impl WordShape {
    pub fn new(min_exclusive: usize, max_exclusive: usize) -> Self {
        Self {
            min_exclusive,
            max_exclusive,
        }
    }

    /// Check length (in characters) and that every character is alphabetic
    pub fn admits(&self, word: &str) -> bool {
        let len = word.chars().count();
        len > self.min_exclusive
            && len < self.max_exclusive
            && word.chars().all(char::is_alphabetic)
    }
}

impl Default for WordShape {
    fn default() -> Self {
        Self::new(3, 15)
    }
}
