//! Search-engine client error types and conversions.

use periodica_core::error::ConfigError;

/// Error type for the search-engine HTTP client.
#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    #[error("request to search engine failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("index '{index}' already exists")]
    IndexExists { index: String },

    #[error("search engine returned {status}: {body}")]
    Api {
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("bulk load rejected: {0}")]
    BulkRejected(String),

    #[error("malformed response from search engine: {0}")]
    Malformed(#[from] serde_json::Error),
}

impl From<SearchError> for ConfigError {
    fn from(err: SearchError) -> Self {
        match err {
            SearchError::IndexExists { index } => ConfigError::Conflict {
                entity: "index".into(),
                detail: format!("index '{index}' already exists"),
            },
            other => ConfigError::SearchEngine(other.to_string()),
        }
    }
}
