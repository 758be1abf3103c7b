//! Mock source for testing
//!
//! A deterministic, network-free implementation of every source trait. Words are
//! answered from in-memory tables, individual capabilities can be made to fail,
//! and every call is recorded so tests can assert exactly which lookups happened.
//!
//! # Example
//!
//! ```ignore
//! use bornopath_enrich::{MockSource, SourceSet, TranslationSource};
//!
//! #[tokio::test]
//! async fn test_lookup() {
//!     let mock = MockSource::new().with_translation("river", &["নদী"]);
//!     let result = mock.lookup_translation("river").await.unwrap();
//!     assert_eq!(result, vec!["নদী"]);
//! }
//! ```

use crate::error::{EnrichError, EnrichResult};
use crate::source::{AntonymSource, DefinitionSource, SynonymSource, TranslationSource};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

/// The lookup a recorded call went to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MockCall {
    Translation,
    Exists,
    Definitions,
    Synonyms,
    Antonyms,
}

/// In-memory source with call recording
#[derive(Debug, Clone, Default)]
pub struct MockSource {
    translations: HashMap<String, Vec<String>>,
    /// Headwords and their definitions; a word is "canonical" iff it is a key here
    headwords: HashMap<String, Vec<String>>,
    synonyms: HashMap<String, Vec<String>>,
    antonyms: HashMap<String, Vec<String>>,
    failures: HashMap<MockCall, String>,
    /// Optional simulated network delay per call
    delay: Duration,
    calls: Arc<Mutex<Vec<(MockCall, String)>>>,
    in_flight: Arc<AtomicUsize>,
    peak_in_flight: Arc<AtomicUsize>,
}

impl MockSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_translation(mut self, word: &str, translations: &[&str]) -> Self {
        self.translations.insert(word.to_string(), owned(translations));
        self
    }

    /// Register a headword; `definitions` may be empty for a word that exists without senses
    pub fn with_headword(mut self, word: &str, definitions: &[&str]) -> Self {
        self.headwords.insert(word.to_string(), owned(definitions));
        self
    }

    pub fn with_synonyms(mut self, word: &str, synonyms: &[&str]) -> Self {
        self.synonyms.insert(word.to_string(), owned(synonyms));
        self
    }

    pub fn with_antonyms(mut self, word: &str, antonyms: &[&str]) -> Self {
        self.antonyms.insert(word.to_string(), owned(antonyms));
        self
    }

    /// Make every call of one kind fail with a network error
    pub fn with_failure(mut self, call: MockCall, message: &str) -> Self {
        self.failures.insert(call, message.to_string());
        self
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Every call made so far, in order
    pub fn calls(&self) -> Vec<(MockCall, String)> {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Number of calls of any kind made for `word`
    pub fn calls_for(&self, word: &str) -> usize {
        self.calls().iter().filter(|(_, w)| w == word).count()
    }

    /// Number of calls of one kind made for `word`
    pub fn count(&self, call: MockCall, word: &str) -> usize {
        self.calls()
            .iter()
            .filter(|(c, w)| *c == call && w == word)
            .count()
    }

    /// Highest number of calls that were running at the same moment
    pub fn peak_in_flight(&self) -> usize {
        self.peak_in_flight.load(Ordering::SeqCst)
    }

    async fn record(&self, call: MockCall, word: &str) -> EnrichResult<()> {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push((call, word.to_string()));
        let running = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak_in_flight.fetch_max(running, Ordering::SeqCst);
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        match self.failures.get(&call) {
            Some(message) => Err(EnrichError::Network(message.clone())),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl TranslationSource for MockSource {
    async fn lookup_translation(&self, word: &str) -> EnrichResult<Vec<String>> {
        self.record(MockCall::Translation, word).await?;
        Ok(lookup(&self.translations, word))
    }

    fn source_name(&self) -> &str {
        "Mock Source"
    }
}

#[async_trait]
impl DefinitionSource for MockSource {
    async fn word_exists(&self, word: &str) -> EnrichResult<bool> {
        self.record(MockCall::Exists, word).await?;
        Ok(self.headwords.contains_key(word))
    }

    async fn lookup_definitions(&self, word: &str) -> EnrichResult<Vec<String>> {
        self.record(MockCall::Definitions, word).await?;
        Ok(lookup(&self.headwords, word))
    }

    fn source_name(&self) -> &str {
        "Mock Source"
    }
}

#[async_trait]
impl SynonymSource for MockSource {
    async fn lookup_synonyms(&self, word: &str) -> EnrichResult<Vec<String>> {
        self.record(MockCall::Synonyms, word).await?;
        Ok(lookup(&self.synonyms, word))
    }

    fn source_name(&self) -> &str {
        "Mock Source"
    }
}

#[async_trait]
impl AntonymSource for MockSource {
    async fn lookup_antonyms(&self, word: &str) -> EnrichResult<Vec<String>> {
        self.record(MockCall::Antonyms, word).await?;
        Ok(lookup(&self.antonyms, word))
    }

    fn source_name(&self) -> &str {
        "Mock Source"
    }
}

fn owned(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn lookup(table: &HashMap<String, Vec<String>>, word: &str) -> Vec<String> {
    table.get(word).cloned().unwrap_or_default()
}
