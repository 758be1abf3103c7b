//! Headword check and definitions
//!
//! dictionary.com decides whether a word is a real headword (a 404 on its browse
//! page means it is not); definitions come from the Free Dictionary API.

use crate::error::{EnrichError, EnrichResult};
use crate::source::{DefinitionSource, strip_plural_references};
use async_trait::async_trait;
use reqwest::StatusCode;
use serde::Deserialize;

const BROWSE_URL: &str = "https://www.dictionary.com/browse/";
const ENTRIES_URL: &str = "https://freedictionaryapi.com/api/v1/entries/en/";

#[derive(Debug, Deserialize)]
struct EntriesResponse {
    entries: Vec<Entry>,
}

#[derive(Debug, Deserialize)]
struct Entry {
    #[serde(default)]
    senses: Vec<Sense>,
}

#[derive(Debug, Deserialize)]
struct Sense {
    definition: String,
}

#[derive(Debug, Clone)]
pub struct DictionaryClient {
    client: reqwest::Client,
    browse_url: String,
    entries_url: String,
}

impl DictionaryClient {
    pub fn new(client: reqwest::Client) -> Self {
        Self {
            client,
            browse_url: BROWSE_URL.to_string(),
            entries_url: ENTRIES_URL.to_string(),
        }
    }
}

#[async_trait]
impl DefinitionSource for DictionaryClient {
    async fn word_exists(&self, word: &str) -> EnrichResult<bool> {
        let response = self
            .client
            .get(format!("{}{}", self.browse_url, word))
            .send()
            .await?;
        Ok(response.status() != StatusCode::NOT_FOUND)
    }

    async fn lookup_definitions(&self, word: &str) -> EnrichResult<Vec<String>> {
        let response = self
            .client
            .get(format!("{}{}", self.entries_url, word))
            .send()
            .await?;
        let status = response.status();
        if !status.is_success() {
            return Err(EnrichError::Status(status.as_u16()));
        }
        let body = response.text().await?;
        parse_definitions(&body)
    }

    fn source_name(&self) -> &str {
        "dictionary.com + freedictionaryapi.com"
    }
}

/// Every sense definition in document order, minus plural cross-references
pub fn parse_definitions(json: &str) -> EnrichResult<Vec<String>> {
    let parsed: EntriesResponse = serde_json::from_str(json)
        .map_err(|e| EnrichError::Parse(format!("Invalid entries response: {}", e)))?;
    let definitions = parsed
        .entries
        .into_iter()
        .flat_map(|entry| entry.senses)
        .map(|sense| sense.definition)
        .collect();
    Ok(strip_plural_references(definitions))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_definitions_in_order() {
        let json = r#"{
            "word": "run",
            "entries": [
                {"partOfSpeech": "verb", "senses": [
                    {"definition": "To move swiftly."},
                    {"definition": "To flee."}
                ]},
                {"partOfSpeech": "noun", "senses": [{"definition": "An act of running."}]}
            ]
        }"#;
        assert_eq!(
            parse_definitions(json).unwrap(),
            vec!["To move swiftly.", "To flee.", "An act of running."]
        );
    }

    #[test]
    fn test_parse_definitions_drops_plural_references() {
        let json = r#"{"entries": [{"senses": [
            {"definition": "plural of cat"},
            {"definition": "Jazz musicians."}
        ]}]}"#;
        assert_eq!(parse_definitions(json).unwrap(), vec!["Jazz musicians."]);
    }

    #[test]
    fn test_parse_definitions_missing_entries() {
        match parse_definitions(r#"{"title": "No Definitions Found"}"#) {
            Err(EnrichError::Parse(msg)) => assert!(msg.contains("entries")),
            other => panic!("Expected Parse error, got {:?}", other),
        }
    }

    #[test]
    fn test_entry_without_senses() {
        let json = r#"{"entries": [{"partOfSpeech": "noun"}]}"#;
        assert!(parse_definitions(json).unwrap().is_empty());
    }

    #[tokio::test]
    #[ignore] // Run with: cargo test --ignored
    async fn test_real_lookup() {
        let client = crate::http::build_client(std::time::Duration::from_secs(10)).unwrap();
        let source = DictionaryClient::new(client);
        assert!(source.word_exists("river").await.unwrap());
        assert!(!source.word_exists("qzxvvrk").await.unwrap());
        let defs = source.lookup_definitions("river").await.unwrap();
        println!("river: {:?}", defs);
        assert!(!defs.is_empty());
    }
}
