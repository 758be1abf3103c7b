//! Dictionary record types

use serde::{Deserialize, Serialize};

/// Upper bound on translations, definitions, synonyms and antonyms per record
pub const MAX_ITEMS: usize = 5;

/// English-side details of a headword
///
/// Construction fails when there is no definition: a record without definitions
/// is never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordDetails {
    definitions: Vec<String>,
    synonyms: Vec<String>,
    antonyms: Vec<String>,
}

impl WordDetails {
    pub fn new(definitions: Vec<String>, synonyms: Vec<String>, antonyms: Vec<String>) -> Option<Self> {
        let definitions = cap(definitions);
        if definitions.is_empty() {
            return None;
        }
        Some(Self {
            definitions,
            synonyms: cap(synonyms),
            antonyms: cap(antonyms),
        })
    }

    pub fn definitions(&self) -> &[String] {
        &self.definitions
    }

    pub fn synonyms(&self) -> &[String] {
        &self.synonyms
    }

    pub fn antonyms(&self) -> &[String] {
        &self.antonyms
    }
}

/// One dictionary entry, as persisted
///
/// ```json
/// { "en": "study", "bn": ["অধ্যয়ন"], "def": ["..."], "syn": ["..."], "ant": [] }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnrichedRecord {
    pub en: String,
    #[serde(default)]
    pub bn: Vec<String>,
    #[serde(default)]
    pub def: Vec<String>,
    #[serde(default)]
    pub syn: Vec<String>,
    #[serde(default)]
    pub ant: Vec<String>,
}

impl EnrichedRecord {
    /// Pair a headword's translations with its details
    ///
    /// `translations` must have been looked up for exactly `en`.
    pub fn new(en: &str, translations: Vec<String>, details: WordDetails) -> Self {
        Self {
            en: en.to_lowercase(),
            bn: cap(translations),
            def: details.definitions,
            syn: details.synonyms,
            ant: details.antonyms,
        }
    }

    /// Case-insensitive identity of this record
    pub fn key(&self) -> String {
        self.en.to_lowercase()
    }
}

fn cap(mut items: Vec<String>) -> Vec<String> {
    items.truncate(MAX_ITEMS);
    items
}
