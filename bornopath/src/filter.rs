//! Word filter for harvested tokens

use crate::known::KnownWords;
use crate::stoplist::{StopList, WordShape};
use std::collections::BTreeSet;
use std::sync::Arc;

/// Reduces a bag of raw page tokens to new, dictionary-shaped words
#[derive(Debug, Clone, Default)]
pub struct WordFilter {
    stop: Arc<StopList>,
    shape: WordShape,
}

impl WordFilter {
    pub fn new(stop: Arc<StopList>, shape: WordShape) -> Self {
        Self { stop, shape }
    }

    /// Whether a single token would survive filtering
    pub fn accepts(&self, token: &str, known: &KnownWords) -> bool {
        let w = token.to_lowercase();
        self.shape.admits(&w) && !self.stop.contains(&w) && !known.contains(&w)
    }

    /// Lowercase, deduplicate and constrain `tokens`
    ///
    /// A token survives when its lowercase form has an admissible length, is
    /// purely alphabetic, is not stop-listed and is not already known. The result
    /// is sorted lexicographically, so the same input always yields the same output.
    pub fn filter<I, S>(&self, tokens: I, known: &KnownWords) -> Vec<String>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let out: BTreeSet<String> = tokens
            .into_iter()
            .map(|t| t.as_ref().to_lowercase())
            .filter(|w| self.accepts(w, known))
            .collect();

        tracing::info!(
            "Filtered down to {} candidate words after applying criteria",
            out.len()
        );
        out.into_iter().collect()
    }
}
