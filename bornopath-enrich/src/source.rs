//! Source client traits
//!
//! Each external capability (translation, headword check and definitions,
//! synonyms, antonyms) is its own trait so that sources can be swapped, mocked or
//! combined independently. Implementations return `Ok` with an empty list when a
//! source answered but had nothing, and `Err` when the call itself failed; callers
//! treat both as "no data".
//!
//! # Example
//!
//! ```ignore
//! use bornopath_enrich::{EnrichConfig, SourceSet};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let sources = SourceSet::http(&EnrichConfig::default())?;
//!     let bn = sources.translation.lookup_translation("river").await?;
//!     println!("{:?}", bn);
//!     Ok(())
//! }
//! ```

use crate::config::EnrichConfig;
use crate::datamuse::DatamuseClient;
use crate::dictionary::DictionaryClient;
use crate::english_bangla::EnglishBanglaClient;
use crate::error::EnrichResult;
use crate::thesaurus::ThesaurusClient;
use async_trait::async_trait;
use bornopath::MAX_ITEMS;
use std::sync::Arc;

/// Phrases marking a definition that only points at another headword
const PLURAL_REFERENCES: &[&str] = &["plural of", "pl. of", "plural form of", "pl form of"];

/// English to Bengali translation lookup
#[async_trait]
pub trait TranslationSource: Send + Sync {
    /// Up to five translations of `word`, most relevant first
    async fn lookup_translation(&self, word: &str) -> EnrichResult<Vec<String>>;

    fn source_name(&self) -> &str;
}

/// Headword validation and definitions
#[async_trait]
pub trait DefinitionSource: Send + Sync {
    /// Whether `word` is a headword of the canonical reference dictionary
    ///
    /// A `false` answer stops enrichment of this word form entirely.
    async fn word_exists(&self, word: &str) -> EnrichResult<bool>;

    /// Up to five definitions, without "plural of X" style cross-references
    async fn lookup_definitions(&self, word: &str) -> EnrichResult<Vec<String>>;

    fn source_name(&self) -> &str;
}

#[async_trait]
pub trait SynonymSource: Send + Sync {
    async fn lookup_synonyms(&self, word: &str) -> EnrichResult<Vec<String>>;

    fn source_name(&self) -> &str;
}

#[async_trait]
pub trait AntonymSource: Send + Sync {
    async fn lookup_antonyms(&self, word: &str) -> EnrichResult<Vec<String>>;

    fn source_name(&self) -> &str;
}

/// The full set of sources one enrichment run draws on
#[derive(Clone)]
pub struct SourceSet {
    pub translation: Arc<dyn TranslationSource>,
    pub definitions: Arc<dyn DefinitionSource>,
    pub synonyms: Arc<dyn SynonymSource>,
    pub antonyms: Arc<dyn AntonymSource>,
}

impl SourceSet {
    /// The public web sources, sharing one HTTP client
    pub fn http(config: &EnrichConfig) -> EnrichResult<Self> {
        let client = crate::http::build_client(config.call_timeout)?;
        Ok(Self {
            translation: Arc::new(EnglishBanglaClient::new(client.clone())),
            definitions: Arc::new(DictionaryClient::new(client.clone())),
            synonyms: Arc::new(ThesaurusClient::new(client.clone())),
            antonyms: Arc::new(DatamuseClient::new(client)),
        })
    }

    /// Use one value for every capability
    pub fn uniform<S>(source: Arc<S>) -> Self
    where
        S: TranslationSource + DefinitionSource + SynonymSource + AntonymSource + 'static,
    {
        Self {
            translation: source.clone(),
            definitions: source.clone(),
            synonyms: source.clone(),
            antonyms: source,
        }
    }
}

impl std::fmt::Debug for SourceSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SourceSet")
            .field("translation", &self.translation.source_name())
            .field("definitions", &self.definitions.source_name())
            .field("synonyms", &self.synonyms.source_name())
            .field("antonyms", &self.antonyms.source_name())
            .finish()
    }
}

/// Whether a definition is only a cross-reference to another form ("plural of cat")
pub fn is_plural_reference(definition: &str) -> bool {
    let lower = definition.to_lowercase();
    PLURAL_REFERENCES.iter().any(|marker| lower.contains(marker))
}

/// Keep the first five definitions that are not plural cross-references
///
/// The cap is applied before filtering, so a source whose leading senses are all
/// cross-references yields nothing.
pub fn strip_plural_references(definitions: Vec<String>) -> Vec<String> {
    definitions
        .into_iter()
        .take(MAX_ITEMS)
        .filter(|d| !is_plural_reference(d))
        .collect()
}

/// Trim, drop blanks and duplicates, keep source order, cap at five
pub fn tidy_list<I, S>(items: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut out: Vec<String> = Vec::new();
    for item in items {
        let item = item.as_ref().trim();
        if item.is_empty() || out.iter().any(|seen| seen == item) {
            continue;
        }
        out.push(item.to_string());
        if out.len() == MAX_ITEMS {
            break;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_plural_reference_detection() {
        assert!(is_plural_reference("Plural of cat."));
        assert!(is_plural_reference("pl. of ox"));
        assert!(is_plural_reference("plural form of mouse"));
        assert!(is_plural_reference("pl form of goose"));
        assert!(!is_plural_reference("A small domesticated feline"));
    }

    #[test]
    fn test_strip_caps_before_filtering() {
        let defs = strings(&[
            "plural of cat",
            "meaning one",
            "meaning two",
            "meaning three",
            "meaning four",
            "meaning five",
        ]);
        assert_eq!(
            strip_plural_references(defs),
            strings(&["meaning one", "meaning two", "meaning three", "meaning four"])
        );
    }

    #[test]
    fn test_strip_all_references() {
        let defs = strings(&["plural of cat", "Pl. of cat"]);
        assert!(strip_plural_references(defs).is_empty());
    }

    #[test]
    fn test_tidy_list() {
        let items = [" fast ", "", "quick", "fast", "rapid", "swift", "speedy", "brisk"];
        assert_eq!(
            tidy_list(items),
            strings(&["fast", "quick", "rapid", "swift", "speedy"])
        );
    }
}
