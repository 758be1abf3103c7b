//! Datamuse antonym source

use crate::error::{EnrichError, EnrichResult};
use crate::http::get_text;
use crate::source::{AntonymSource, tidy_list};
use async_trait::async_trait;
use bornopath::MAX_ITEMS;
use serde::Deserialize;

const BASE_URL: &str = "https://api.datamuse.com/words";

#[derive(Debug, Deserialize)]
struct DatamuseWord {
    word: String,
}

#[derive(Debug, Clone)]
pub struct DatamuseClient {
    client: reqwest::Client,
    base_url: String,
}

impl DatamuseClient {
    pub fn new(client: reqwest::Client) -> Self {
        Self {
            client,
            base_url: BASE_URL.to_string(),
        }
    }
}

#[async_trait]
impl AntonymSource for DatamuseClient {
    async fn lookup_antonyms(&self, word: &str) -> EnrichResult<Vec<String>> {
        let url = format!("{}?rel_ant={}", self.base_url, word);
        let body = get_text(&self.client, &url).await?;
        parse_antonyms(&body)
    }

    fn source_name(&self) -> &str {
        "Datamuse"
    }
}

/// The first five words of a `rel_ant` response, blanks removed
pub fn parse_antonyms(json: &str) -> EnrichResult<Vec<String>> {
    let words: Vec<DatamuseWord> = serde_json::from_str(json)
        .map_err(|e| EnrichError::Parse(format!("Invalid Datamuse response: {}", e)))?;
    Ok(tidy_list(words.iter().take(MAX_ITEMS).map(|w| w.word.as_str())))
}
