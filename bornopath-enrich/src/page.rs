//! Harvesting raw tokens from a web page

use crate::error::{EnrichError, EnrichResult};
use crate::http::html_text;
use regex::Regex;
use std::collections::BTreeSet;
use std::sync::LazyLock;
use std::time::Duration;

static NON_CONTENT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)<(script|style|noscript)\b[^>]*>.*?</(script|style|noscript)>|<!--.*?-->")
        .expect("valid non-content pattern")
});
static ALPHA_TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b[A-Za-z]+\b").expect("valid token pattern"));

/// Fetch a page's HTML
///
/// # Errors
/// - The URL does not start with `http://` or `https://`
/// - Transport failure or non-success status; a 403 usually means the site
///   blocks automated clients
pub async fn fetch_page(
    client: &reqwest::Client,
    url: &str,
    timeout: Duration,
) -> EnrichResult<String> {
    if !url.starts_with("http://") && !url.starts_with("https://") {
        return Err(EnrichError::Config(format!(
            "URL must start with http:// or https://: {}",
            url
        )));
    }

    let response = client.get(url).timeout(timeout).send().await?;
    let status = response.status();
    if status == reqwest::StatusCode::FORBIDDEN {
        tracing::warn!("Access forbidden for {}; the site might be blocking bots", url);
    }
    if !status.is_success() {
        return Err(EnrichError::Status(status.as_u16()));
    }
    Ok(response.text().await?)
}

/// Unique alphabetic tokens of the page's visible text, in sorted order
pub fn extract_tokens(html: &str) -> Vec<String> {
    let content = NON_CONTENT.replace_all(html, " ");
    let text = html_text(&content);
    let tokens: BTreeSet<String> = ALPHA_TOKEN
        .find_iter(&text)
        .map(|m| m.as_str().to_string())
        .collect();
    tracing::info!("Found {} unique alpha-only words", tokens.len());
    tokens.into_iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_tokens_skips_markup() {
        let html = r#"
            <html><head><title>Rivers</title>
            <style>.river { color: blue; }</style>
            <script>var hidden = "secret";</script></head>
            <body><!-- comment words -->
            <p class="lead">Rivers flow &amp; rivers run. Route 66 isn't here.</p>
            </body></html>
        "#;
        assert_eq!(
            extract_tokens(html),
            vec!["Rivers", "Route", "flow", "here", "isn", "rivers", "run", "t"]
        );
    }

    #[test]
    fn test_extract_tokens_requires_word_boundaries() {
        assert_eq!(extract_tokens("abc123 def café"), vec!["def"]);
    }

    #[tokio::test]
    async fn test_fetch_page_rejects_non_http() {
        let client = reqwest::Client::new();
        let result = fetch_page(&client, "ftp://example.com", Duration::from_secs(1)).await;
        assert!(matches!(result, Err(EnrichError::Config(_))));
    }
}
