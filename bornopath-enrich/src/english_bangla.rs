//! english-bangla.com translation source
//!
//! Translations are scraped from the word's dictionary page. Each
//! `<span class="format1">` holds one or more Bengali glosses separated by
//! punctuation or the words "or"/"and"; English-only fragments (grammar labels,
//! cross-references) are discarded.

use crate::error::EnrichResult;
use crate::http::{get_text, html_text};
use crate::source::{TranslationSource, tidy_list};
use async_trait::async_trait;
use regex::Regex;
use std::sync::LazyLock;

const BASE_URL: &str = "https://www.english-bangla.com/dictionary/";

/// Longest gloss kept, in characters; longer ones are usually example sentences
const MAX_GLOSS_CHARS: usize = 30;

static FORMAT1_SPAN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?is)<span[^>]*class\s*=\s*["'][^"']*\bformat1\b[^"']*["'][^>]*>(.*?)</span>"#)
        .expect("valid span pattern")
});
static GLOSS_SEPARATOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[;,/]|\s+or\s+|\s+and\s+").expect("valid separator pattern"));
static ENGLISH_ONLY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z\s]+$").expect("valid english pattern"));

#[derive(Debug, Clone)]
pub struct EnglishBanglaClient {
    client: reqwest::Client,
    base_url: String,
}

impl EnglishBanglaClient {
    pub fn new(client: reqwest::Client) -> Self {
        Self {
            client,
            base_url: BASE_URL.to_string(),
        }
    }
}

#[async_trait]
impl TranslationSource for EnglishBanglaClient {
    async fn lookup_translation(&self, word: &str) -> EnrichResult<Vec<String>> {
        let html = get_text(&self.client, &format!("{}{}", self.base_url, word)).await?;
        Ok(extract_translations(&html))
    }

    fn source_name(&self) -> &str {
        "english-bangla.com"
    }
}

/// Pull up to five distinct Bengali glosses out of a dictionary page
pub fn extract_translations(html: &str) -> Vec<String> {
    let spans: Vec<String> = FORMAT1_SPAN
        .captures_iter(html)
        .map(|caps| html_text(&caps[1]))
        .collect();

    let glosses: Vec<&str> = spans
        .iter()
        .flat_map(|text| GLOSS_SEPARATOR.split(text))
        .map(str::trim)
        .filter(|part| {
            !part.is_empty() && !is_english_only(part) && part.chars().count() <= MAX_GLOSS_CHARS
        })
        .collect();

    if glosses.is_empty() {
        // a single long gloss is still better than nothing
        return spans
            .first()
            .filter(|text| !text.is_empty() && !is_english_only(text))
            .map(|text| vec![text.clone()])
            .unwrap_or_default();
    }
    tidy_list(glosses)
}

fn is_english_only(text: &str) -> bool {
    ENGLISH_ONLY.is_match(text)
}
