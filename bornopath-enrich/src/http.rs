//! Shared HTTP plumbing for the web sources

use crate::error::{EnrichError, EnrichResult};
use reqwest::header::{ACCEPT_LANGUAGE, HeaderMap, HeaderValue};
use std::sync::LazyLock;
use std::time::Duration;

/// Several sources serve stripped pages or refuse requests without a browser agent
pub const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
    AppleWebKit/537.36 (KHTML, like Gecko) Chrome/126.0.0.0 Safari/537.36";

static TAG: LazyLock<regex::Regex> =
    LazyLock::new(|| regex::Regex::new(r"<[^>]*>").expect("valid tag pattern"));
static NUMERIC_ENTITY: LazyLock<regex::Regex> =
    LazyLock::new(|| regex::Regex::new(r"&#(x?)([0-9a-fA-F]+);").expect("valid entity pattern"));

/// Build the client shared by all web sources
pub fn build_client(timeout: Duration) -> EnrichResult<reqwest::Client> {
    let mut headers = HeaderMap::new();
    headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static("en-US,en;q=0.9"));

    reqwest::Client::builder()
        .user_agent(BROWSER_USER_AGENT)
        .default_headers(headers)
        .timeout(timeout)
        .build()
        .map_err(|e| EnrichError::Config(format!("Failed to create HTTP client: {}", e)))
}

/// GET `url` and return the body, treating any non-success status as an error
pub async fn get_text(client: &reqwest::Client, url: &str) -> EnrichResult<String> {
    let response = client.get(url).send().await?;
    let status = response.status();
    if !status.is_success() {
        return Err(EnrichError::Status(status.as_u16()));
    }
    Ok(response.text().await?)
}

/// Visible text of an HTML fragment: tags removed, entities decoded, whitespace collapsed
pub fn html_text(fragment: &str) -> String {
    let without_tags = TAG.replace_all(fragment, " ");
    let decoded = decode_entities(&without_tags);
    decoded.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn decode_entities(text: &str) -> String {
    let named = text
        .replace("&nbsp;", " ")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&apos;", "'");
    let numeric = NUMERIC_ENTITY.replace_all(&named, |caps: &regex::Captures| {
        let radix = if caps[1].is_empty() { 10 } else { 16 };
        u32::from_str_radix(&caps[2], radix)
            .ok()
            .and_then(char::from_u32)
            .map(String::from)
            .unwrap_or_default()
    });
    // last, so "&amp;lt;" stays literal
    numeric.replace("&amp;", "&")
}
