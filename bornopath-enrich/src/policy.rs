//! Per-word acceptance policy
//!
//! Every harvested word walks a small state machine:
//!
//! ```text
//! Pending -> TryOriginal -> Accepted
//!                        -> TryCandidates -> Accepted | Rejected
//! ```
//!
//! The original surface form is tried first and, when it is a real headword with
//! definitions, keeps the translation that was fetched for it. Otherwise the
//! generated base forms are tried in order. The first base form with details must
//! also have its *own* translation: a base form's definitions are never paired
//! with the surface word's translation, and a base form without a translation
//! rejects the whole word rather than falling through to the next candidate.
//!
//! Source failures never escape this module. A failed call is "no data" for that
//! call and the word simply moves on to its next fallback or to rejection.

use crate::cache::TranslationCache;
use crate::error::{EnrichError, EnrichResult};
use crate::interrupt::Interrupt;
use crate::source::{SourceSet, strip_plural_references, tidy_list};
use bornopath::{CandidateGenerator, EnrichedRecord, KnownWords, WordDetails};
use std::future::Future;
use std::time::Duration;

/// Why a word produced no record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Rejection {
    /// Already in the dictionary; no lookup was made
    Known,
    /// The surface word has no translation
    NoTranslation,
    /// Neither the word nor any candidate is a headword with definitions
    NoHeadword,
    /// A base form had details but no translation of its own
    TranslationMismatchRisk,
    /// The run was interrupted before the word was resolved
    Interrupted,
}

impl Rejection {
    pub fn as_str(&self) -> &'static str {
        match self {
            Rejection::Known => "already known",
            Rejection::NoTranslation => "no translation",
            Rejection::NoHeadword => "no headword",
            Rejection::TranslationMismatchRisk => "translation mismatch risk",
            Rejection::Interrupted => "interrupted",
        }
    }
}

impl std::fmt::Display for Rejection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Terminal outcome for one word
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    Accepted(EnrichedRecord),
    Rejected(Rejection),
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum WordState {
    Pending,
    TryOriginal,
    TryCandidates,
    Accepted(EnrichedRecord),
    Rejected(Rejection),
}

/// Result of enriching a single word form
#[derive(Debug)]
enum Attempt {
    Found(WordDetails),
    NotCanonical,
    NoDefinitions,
    Unavailable,
    Interrupted,
}

/// Applies the acceptance rules for one word against a set of sources
#[derive(Debug, Clone)]
pub struct AcceptancePolicy {
    sources: SourceSet,
    generator: CandidateGenerator,
    cache: TranslationCache,
    call_timeout: Duration,
    interrupt: Interrupt,
}

impl AcceptancePolicy {
    pub fn new(sources: SourceSet, call_timeout: Duration) -> Self {
        Self {
            sources,
            generator: CandidateGenerator::default(),
            cache: TranslationCache::new(),
            call_timeout,
            interrupt: Interrupt::new(),
        }
    }

    pub fn with_generator(mut self, generator: CandidateGenerator) -> Self {
        self.generator = generator;
        self
    }

    pub fn with_cache(mut self, cache: TranslationCache) -> Self {
        self.cache = cache;
        self
    }

    pub fn with_interrupt(mut self, interrupt: Interrupt) -> Self {
        self.interrupt = interrupt;
        self
    }

    pub fn cache(&self) -> &TranslationCache {
        &self.cache
    }

    pub fn interrupt(&self) -> &Interrupt {
        &self.interrupt
    }

    /// Translate `word`, then resolve it
    ///
    /// Words without a translation are rejected before any dictionary lookup.
    pub async fn resolve(&self, word: &str, known: &KnownWords) -> Resolution {
        let word = word.trim().to_lowercase();
        if known.contains(&word) {
            return Resolution::Rejected(Rejection::Known);
        }
        if self.interrupt.is_triggered() {
            return Resolution::Rejected(Rejection::Interrupted);
        }
        let translations = self.translation_for(&word).await;
        self.resolve_translated(&word, translations, known).await
    }

    /// Resolve `word` given the translation already fetched for that exact word
    pub async fn resolve_translated(
        &self,
        word: &str,
        translations: Vec<String>,
        known: &KnownWords,
    ) -> Resolution {
        let word = word.trim().to_lowercase();
        let mut translations = translations;
        let mut state = WordState::Pending;

        loop {
            tracing::trace!("'{}': {:?}", word, state);
            state = match state {
                WordState::Pending if known.contains(&word) => {
                    WordState::Rejected(Rejection::Known)
                }
                WordState::Pending if translations.is_empty() => {
                    WordState::Rejected(Rejection::NoTranslation)
                }
                WordState::Pending => WordState::TryOriginal,
                WordState::TryOriginal => match self.attempt(&word).await {
                    Attempt::Found(details) => WordState::Accepted(EnrichedRecord::new(
                        &word,
                        std::mem::take(&mut translations),
                        details,
                    )),
                    Attempt::Interrupted => WordState::Rejected(Rejection::Interrupted),
                    Attempt::NotCanonical | Attempt::NoDefinitions | Attempt::Unavailable => {
                        WordState::TryCandidates
                    }
                },
                WordState::TryCandidates => self.try_candidates(&word, known).await,
                WordState::Accepted(record) => return Resolution::Accepted(record),
                WordState::Rejected(reason) => return Resolution::Rejected(reason),
            };
        }
    }

    async fn try_candidates(&self, word: &str, known: &KnownWords) -> WordState {
        for candidate in self.generator.generate(word) {
            if candidate == word || known.contains(&candidate) {
                continue;
            }
            match self.attempt(&candidate).await {
                Attempt::Found(details) => {
                    if self.interrupt.is_triggered() {
                        return WordState::Rejected(Rejection::Interrupted);
                    }
                    let translations = self.translation_for(&candidate).await;
                    if translations.is_empty() {
                        tracing::warn!(
                            "No Bengali translation found for '{}', skipping '{}' to avoid mismatch",
                            candidate,
                            word
                        );
                        return WordState::Rejected(Rejection::TranslationMismatchRisk);
                    }
                    tracing::info!("Consistent data for '{}' (base form of '{}')", candidate, word);
                    return WordState::Accepted(EnrichedRecord::new(&candidate, translations, details));
                }
                Attempt::Interrupted => return WordState::Rejected(Rejection::Interrupted),
                Attempt::NotCanonical | Attempt::NoDefinitions | Attempt::Unavailable => {}
            }
        }
        WordState::Rejected(Rejection::NoHeadword)
    }

    /// Existence gate, then definitions, then synonyms and antonyms together
    async fn attempt(&self, word: &str) -> Attempt {
        if self.interrupt.is_triggered() {
            return Attempt::Interrupted;
        }
        match self.bounded(self.sources.definitions.word_exists(word)).await {
            Ok(true) => {}
            Ok(false) => {
                tracing::debug!("'{}' is not a headword", word);
                return Attempt::NotCanonical;
            }
            Err(e) => {
                tracing::debug!("Headword check for '{}' failed: {}", word, e);
                return Attempt::Unavailable;
            }
        }

        if self.interrupt.is_triggered() {
            return Attempt::Interrupted;
        }
        let definitions = match self.bounded(self.sources.definitions.lookup_definitions(word)).await {
            Ok(definitions) => strip_plural_references(definitions),
            Err(e) => {
                tracing::debug!("Definition lookup for '{}' failed: {}", word, e);
                return Attempt::Unavailable;
            }
        };
        if definitions.is_empty() {
            return Attempt::NoDefinitions;
        }

        if self.interrupt.is_triggered() {
            return Attempt::Interrupted;
        }
        let (synonyms, antonyms) = tokio::join!(
            self.bounded(self.sources.synonyms.lookup_synonyms(word)),
            self.bounded(self.sources.antonyms.lookup_antonyms(word)),
        );
        let synonyms = or_empty("Synonym", word, synonyms);
        let antonyms = or_empty("Antonym", word, antonyms);

        match WordDetails::new(definitions, synonyms, antonyms) {
            Some(details) => Attempt::Found(details),
            None => Attempt::NoDefinitions,
        }
    }

    /// Translation for exactly `word`, from the cache when it was fetched before
    async fn translation_for(&self, word: &str) -> Vec<String> {
        if let Some(hit) = self.cache.get(word) {
            return hit;
        }
        let translations = match self.bounded(self.sources.translation.lookup_translation(word)).await {
            Ok(translations) => tidy_list(translations),
            Err(e) => {
                tracing::debug!("Translation lookup for '{}' failed: {}", word, e);
                return Vec::new();
            }
        };
        self.cache.insert(word, translations.clone());
        translations
    }

    async fn bounded<T>(&self, call: impl Future<Output = EnrichResult<T>>) -> EnrichResult<T> {
        tokio::time::timeout(self.call_timeout, call)
            .await
            .unwrap_or_else(|_| Err(EnrichError::Timeout))
    }
}

fn or_empty(kind: &str, word: &str, result: EnrichResult<Vec<String>>) -> Vec<String> {
    match result {
        Ok(items) => tidy_list(items),
        Err(e) => {
            tracing::debug!("{} lookup for '{}' failed: {}", kind, word, e);
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::{MockCall, MockSource};
    use std::sync::Arc;

    fn policy(mock: &MockSource) -> AcceptancePolicy {
        AcceptancePolicy::new(
            SourceSet::uniform(Arc::new(mock.clone())),
            Duration::from_secs(1),
        )
    }

    fn accepted(resolution: Resolution) -> EnrichedRecord {
        match resolution {
            Resolution::Accepted(record) => record,
            other => panic!("Expected an accepted record, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_original_word_keeps_its_translation() {
        let mock = MockSource::new()
            .with_translation("books", &["বইগুলো"])
            .with_headword("books", &["Plural noun sense."])
            .with_synonyms("books", &["volumes"])
            .with_antonyms("books", &[]);

        let record = accepted(policy(&mock).resolve("Books", &KnownWords::new()).await);
        assert_eq!(record.en, "books");
        assert_eq!(record.bn, vec!["বইগুলো"]);
        assert_eq!(record.def, vec!["Plural noun sense."]);
        assert_eq!(record.syn, vec!["volumes"]);
        assert!(record.ant.is_empty());
        // perfect match: no candidate was looked at
        assert_eq!(mock.calls_for("book"), 0);
    }

    #[tokio::test]
    async fn test_known_word_is_never_looked_up() {
        let mock = MockSource::new().with_translation("river", &["নদী"]);
        let known: KnownWords = ["River"].into_iter().collect();

        let resolution = policy(&mock).resolve("river", &known).await;
        assert_eq!(resolution, Resolution::Rejected(Rejection::Known));
        assert!(mock.calls().is_empty());
    }

    #[tokio::test]
    async fn test_word_without_translation_skips_dictionary() {
        let mock = MockSource::new().with_headword("river", &["A stream."]);
        let resolution = policy(&mock).resolve("river", &KnownWords::new()).await;
        assert_eq!(resolution, Resolution::Rejected(Rejection::NoTranslation));
        assert_eq!(mock.count(MockCall::Exists, "river"), 0);
    }

    #[tokio::test]
    async fn test_candidate_uses_its_own_translation() {
        let mock = MockSource::new()
            .with_translation("studies", &["পড়াশোনাগুলি"])
            .with_translation("study", &["অধ্যয়ন"])
            .with_headword("study", &["The act of learning."]);

        let record = accepted(policy(&mock).resolve("studies", &KnownWords::new()).await);
        assert_eq!(record.en, "study");
        assert_eq!(record.bn, vec!["অধ্যয়ন"]);
        assert_eq!(mock.count(MockCall::Translation, "study"), 1);
    }

    #[tokio::test]
    async fn test_candidate_without_translation_rejects_word() {
        let mock = MockSource::new()
            .with_translation("stopped", &["থামানো"])
            .with_headword("stopp", &["A misspelling."])
            .with_headword("stop", &["To cease."])
            .with_translation("stop", &["থামা"]);

        let resolution = policy(&mock).resolve("stopped", &KnownWords::new()).await;
        assert_eq!(
            resolution,
            Resolution::Rejected(Rejection::TranslationMismatchRisk)
        );
        // no fallback to a later candidate
        assert_eq!(mock.calls_for("stop"), 0);
    }

    #[tokio::test]
    async fn test_plural_only_definitions_fall_back_to_base_form() {
        let mock = MockSource::new()
            .with_translation("cats", &["বিড়ালগুলো"])
            .with_headword("cats", &["plural of cat"])
            .with_translation("cat", &["বিড়াল"])
            .with_headword("cat", &["A small feline.", "Plural of kitty"]);

        let record = accepted(policy(&mock).resolve("cats", &KnownWords::new()).await);
        assert_eq!(record.en, "cat");
        assert_eq!(record.def, vec!["A small feline."]);
    }

    #[tokio::test]
    async fn test_known_candidate_is_skipped() {
        let mock = MockSource::new()
            .with_translation("studies", &["পড়াশোনাগুলি"])
            .with_headword("study", &["The act of learning."]);
        let known: KnownWords = ["study"].into_iter().collect();

        let resolution = policy(&mock).resolve("studies", &known).await;
        assert_eq!(resolution, Resolution::Rejected(Rejection::NoHeadword));
        assert_eq!(mock.calls_for("study"), 0);
    }

    #[tokio::test]
    async fn test_failing_thesaurus_does_not_block_record() {
        let mock = MockSource::new()
            .with_translation("river", &["নদী"])
            .with_headword("river", &["A stream."])
            .with_antonyms("river", &["desert"])
            .with_failure(MockCall::Synonyms, "blocked");

        let record = accepted(policy(&mock).resolve("river", &KnownWords::new()).await);
        assert!(record.syn.is_empty());
        assert_eq!(record.ant, vec!["desert"]);
    }

    #[tokio::test]
    async fn test_existence_gate_failure_is_attempt_failure() {
        let mock = MockSource::new()
            .with_translation("river", &["নদী"])
            .with_headword("river", &["A stream."])
            .with_failure(MockCall::Exists, "down");

        let resolution = policy(&mock).resolve("river", &KnownWords::new()).await;
        assert_eq!(resolution, Resolution::Rejected(Rejection::NoHeadword));
        assert_eq!(mock.count(MockCall::Definitions, "river"), 0);
    }

    #[tokio::test]
    async fn test_slow_source_times_out() {
        let mock = MockSource::new()
            .with_translation("river", &["নদী"])
            .with_delay(Duration::from_millis(200));
        let policy = AcceptancePolicy::new(
            SourceSet::uniform(Arc::new(mock.clone())),
            Duration::from_millis(20),
        );

        let resolution = policy.resolve("river", &KnownWords::new()).await;
        assert_eq!(resolution, Resolution::Rejected(Rejection::NoTranslation));
    }

    #[tokio::test]
    async fn test_interrupt_stops_lookups() {
        let mock = MockSource::new().with_translation("river", &["নদী"]);
        let policy = policy(&mock);
        policy.interrupt().trigger();

        let resolution = policy.resolve("river", &KnownWords::new()).await;
        assert_eq!(resolution, Resolution::Rejected(Rejection::Interrupted));
        assert!(mock.calls().is_empty());
    }

    #[tokio::test]
    async fn test_translation_cache_is_reused_for_same_word() {
        let mock = MockSource::new()
            .with_translation("study", &["অধ্যয়ন"])
            .with_translation("studies", &["পড়াশোনাগুলি"])
            .with_headword("study", &["The act of learning."]);
        let policy = policy(&mock);

        accepted(policy.resolve("study", &KnownWords::new()).await);
        accepted(policy.resolve("studies", &KnownWords::new()).await);
        assert_eq!(mock.count(MockCall::Translation, "study"), 1);
        assert_eq!(policy.cache().get("study"), Some(vec!["অধ্যয়ন".to_string()]));
    }

    #[tokio::test]
    async fn test_resolve_translated_rejects_empty_translation() {
        let mock = MockSource::new().with_headword("river", &["A stream."]);
        let resolution = policy(&mock)
            .resolve_translated("river", Vec::new(), &KnownWords::new())
            .await;
        assert_eq!(resolution, Resolution::Rejected(Rejection::NoTranslation));
        assert!(mock.calls().is_empty());
    }
}
