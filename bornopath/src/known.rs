use std::collections::HashSet;
use std::sync::{Arc, PoisonError, RwLock};

/// Words already present in the dictionary, keyed by lowercase form
///
/// Cloning is cheap and every clone observes the same set. Enrichment tasks read it
/// concurrently; only merges into the dictionary store grow it, and nothing ever
/// removes a word during a run.
#[derive(Debug, Clone, Default)]
pub struct KnownWords(Arc<RwLock<HashSet<String>>>);

impl KnownWords {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, word: &str) -> bool {
        self.0
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains(&word.to_lowercase())
    }

    /// Insert a word, returning `true` when it was not known before
    pub fn insert(&self, word: &str) -> bool {
        self.0
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(word.to_lowercase())
    }

    pub fn len(&self) -> usize {
        self.0.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<S: AsRef<str>> FromIterator<S> for KnownWords {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let set = iter.into_iter().map(|w| w.as_ref().to_lowercase()).collect();
        KnownWords(Arc::new(RwLock::new(set)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_case_insensitive_identity() {
        let known: KnownWords = ["Apple"].into_iter().collect();
        assert!(known.contains("apple"));
        assert!(known.contains("APPLE"));
        assert!(!known.insert("aPPle"));
        assert_eq!(known.len(), 1);
    }

    #[test]
    fn test_clones_share_state() {
        let known = KnownWords::new();
        let other = known.clone();
        assert!(other.insert("river"));
        assert!(known.contains("river"));
    }

    #[test]
    fn test_concurrent_insertion() {
        let known = KnownWords::new();
        let handles: Vec<_> = (0..8)
            .map(|i| {
                let known = known.clone();
                std::thread::spawn(move || {
                    for j in 0..50 {
                        known.insert(&format!("word{}", (i * 50 + j) % 100));
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }
        assert_eq!(known.len(), 100);
    }
}
