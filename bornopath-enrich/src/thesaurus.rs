//! thesaurus.com synonym source
//!
//! The browse page groups synonyms into meaning blocks, each labelled with a
//! match strength. Only the first block labelled as a strong or strongest match
//! is used. The page markup uses generated class names, so they are kept in one
//! place here.

use crate::error::EnrichResult;
use crate::http::{get_text, html_text};
use crate::source::{SynonymSource, tidy_list};
use async_trait::async_trait;
use regex::Regex;
use std::sync::LazyLock;

const BASE_URL: &str = "https://www.thesaurus.com/browse/";
const MEANING_BLOCK_CLASS: &str = "QXhVD4zXdAnJKNytqXmK";
const SYNONYM_LINK_CLASS: &str = "Bf5RRqL5MiAp4gB8wAZa";
const STRONG_LABELS: &[&str] = &[
    "Strongest matches",
    "Strong match",
    "Strong matches",
    "Strongest match",
];

static PARAGRAPH: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<p[^>]*>(.*?)</p>").expect("valid paragraph pattern"));
static SYNONYM_LINK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r#"(?is)<a[^>]*class\s*=\s*["'][^"']*\b{}\b[^"']*["'][^>]*>(.*?)</a>"#,
        SYNONYM_LINK_CLASS
    ))
    .expect("valid link pattern")
});

#[derive(Debug, Clone)]
pub struct ThesaurusClient {
    client: reqwest::Client,
    base_url: String,
}

impl ThesaurusClient {
    pub fn new(client: reqwest::Client) -> Self {
        Self {
            client,
            base_url: BASE_URL.to_string(),
        }
    }
}

#[async_trait]
impl SynonymSource for ThesaurusClient {
    async fn lookup_synonyms(&self, word: &str) -> EnrichResult<Vec<String>> {
        let html = get_text(&self.client, &format!("{}{}", self.base_url, word)).await?;
        Ok(extract_synonyms(&html))
    }

    fn source_name(&self) -> &str {
        "thesaurus.com"
    }
}

/// Synonyms of the first strongly matching meaning block, at most five
pub fn extract_synonyms(html: &str) -> Vec<String> {
    for block in meaning_blocks(html) {
        let strong = PARAGRAPH
            .captures_iter(block)
            .any(|caps| STRONG_LABELS.contains(&html_text(&caps[1]).as_str()));
        if strong {
            let links: Vec<String> = SYNONYM_LINK
                .captures_iter(block)
                .map(|caps| html_text(&caps[1]))
                .collect();
            return tidy_list(links);
        }
    }
    Vec::new()
}

/// Slices of the page starting at each meaning block and running to the next one
fn meaning_blocks(html: &str) -> Vec<&str> {
    let starts: Vec<usize> = html
        .match_indices(MEANING_BLOCK_CLASS)
        .map(|(i, _)| i)
        .collect();
    starts
        .iter()
        .enumerate()
        .map(|(n, &start)| {
            let end = starts.get(n + 1).copied().unwrap_or(html.len());
            &html[start..end]
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn block(label: &str, words: &[&str]) -> String {
        let links: String = words
            .iter()
            .map(|w| format!(r#"<a class="{} x" href="/browse/{w}">{w}</a>"#, SYNONYM_LINK_CLASS))
            .collect();
        format!(
            r#"<div class="{}"><p class="label">{}</p><ul>{}</ul></div>"#,
            MEANING_BLOCK_CLASS, label, links
        )
    }

    #[test]
    fn test_first_strong_block_wins() {
        let html = format!(
            "<main>{}{}{}</main>",
            block("Weak matches", &["jog"]),
            block("Strongest matches", &["dash", "race", "sprint"]),
            block("Strong matches", &["bolt"])
        );
        assert_eq!(extract_synonyms(&html), vec!["dash", "race", "sprint"]);
    }

    #[test]
    fn test_caps_at_five() {
        let html = block("Strong match", &["a", "b", "c", "d", "e", "f", "g"]);
        assert_eq!(extract_synonyms(&html).len(), 5);
    }

    #[test]
    fn test_no_strong_block() {
        let html = block("Weak matches", &["jog"]);
        assert!(extract_synonyms(&html).is_empty());
        assert!(extract_synonyms("<html></html>").is_empty());
    }
}
