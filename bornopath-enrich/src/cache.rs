use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

/// Translations already looked up during a run, keyed by the exact surface word
///
/// A word's entry only ever holds the answer fetched for that word, so reading it
/// back can never pair a translation with a different word.
#[derive(Debug, Clone, Default)]
pub struct TranslationCache(Arc<Mutex<HashMap<String, Vec<String>>>>);

impl TranslationCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, word: &str) -> Option<Vec<String>> {
        self.0
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(word)
            .cloned()
    }

    pub fn insert(&self, word: &str, translations: Vec<String>) {
        self.0
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(word.to_string(), translations);
    }

    pub fn len(&self) -> usize {
        self.0.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entries_are_per_word() {
        let cache = TranslationCache::new();
        cache.insert("run", vec!["দৌড়".to_string()]);
        assert_eq!(cache.get("run"), Some(vec!["দৌড়".to_string()]));
        assert_eq!(cache.get("running"), None);
        assert_eq!(cache.len(), 1);
    }
}
