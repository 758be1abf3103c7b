/// Error types for the dictionary store
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Reading or writing the dictionary file failed
    #[error("Dictionary I/O error at '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    /// The dictionary file is not valid JSON
    #[error("Invalid dictionary JSON: {0}")]
    Json(#[from] serde_json::Error),
    /// The dictionary JSON is valid but not an array of entries
    #[error("Invalid dictionary format: {0}")]
    Format(String),
}

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;
