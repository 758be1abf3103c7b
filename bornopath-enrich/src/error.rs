/// Error types for the enrichment crate
///
/// Source lookups are expected to fail often (slow sites, missing pages, layout
/// changes). The acceptance policy absorbs every variant below as "no data" for
/// the call that produced it; only configuration errors reach the caller.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EnrichError {
    /// Connection, TLS or other transport failure
    #[error("Network error: {0}")]
    Network(String),
    /// The call did not finish within its time budget
    #[error("Request timed out")]
    Timeout,
    /// The source answered with a non-success status
    #[error("Unexpected HTTP status {0}")]
    Status(u16),
    /// The response body could not be understood
    #[error("Failed to parse response: {0}")]
    Parse(String),
    /// Invalid configuration or client setup
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<reqwest::Error> for EnrichError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            EnrichError::Timeout
        } else if err.is_decode() {
            EnrichError::Parse(err.to_string())
        } else if let Some(status) = err.status() {
            EnrichError::Status(status.as_u16())
        } else {
            EnrichError::Network(err.to_string())
        }
    }
}

/// Result type for enrichment operations
pub type EnrichResult<T> = Result<T, EnrichError>;
