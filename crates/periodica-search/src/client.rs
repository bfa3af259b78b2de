//! HTTP client for index creation and bulk loading.

use serde::Deserialize;
use tracing::info;

use crate::error::SearchError;

/// Outcome of a successful bulk load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BulkSummary {
    /// Number of items the engine acknowledged.
    pub items: usize,
    /// Server-side processing time in milliseconds.
    pub took_ms: u64,
}

#[derive(Debug, Deserialize)]
struct BulkResponse {
    took: u64,
    errors: bool,
    items: Vec<serde_json::Value>,
}

/// Client for the search-engine HTTP API.
///
/// Fail-fast by design: any transport failure or non-2xx response is
/// returned as an error immediately; there is no retry and no
/// partial-success handling.
#[derive(Clone)]
pub struct SearchClient {
    base_url: String,
    http: reqwest::Client,
}

impl SearchClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            base_url,
            http: reqwest::Client::new(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Create the named index from a static mapping document
    /// (`PUT /{index}`).
    ///
    /// Fails with [`SearchError::IndexExists`] if the index is already
    /// present — the engine's default semantics, surfaced as a distinct
    /// error so a stale index is never silently reused.
    pub async fn create_index(
        &self,
        index: &str,
        mapping: &serde_json::Value,
    ) -> Result<(), SearchError> {
        let url = format!("{}/{index}", self.base_url);
        let response = self.http.put(&url).json(mapping).send().await?;

        let status = response.status();
        if status.is_success() {
            info!(index, "Created search index");
            return Ok(());
        }

        let body = response.text().await?;
        if body.contains("resource_already_exists_exception") {
            return Err(SearchError::IndexExists {
                index: index.to_string(),
            });
        }
        Err(SearchError::Api { status, body })
    }

    /// Load an entire newline-delimited JSON export in one call
    /// (`POST /{index}/_bulk`).
    ///
    /// The engine reports per-item failures inside a 200 response; a
    /// response with `"errors": true` is treated as fatal and the first
    /// failing item is included in the diagnostic.
    pub async fn bulk_load(&self, index: &str, body: String) -> Result<BulkSummary, SearchError> {
        let url = format!("{}/{index}/_bulk", self.base_url);

        // The bulk endpoint requires a trailing newline.
        let mut body = body;
        if !body.ends_with('\n') {
            body.push('\n');
        }

        let response = self
            .http
            .post(&url)
            .header(reqwest::header::CONTENT_TYPE, "application/x-ndjson")
            .body(body)
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;
        if !status.is_success() {
            return Err(SearchError::Api { status, body: text });
        }

        let parsed: BulkResponse = serde_json::from_str(&text)?;
        if parsed.errors {
            let first_failure = parsed
                .items
                .iter()
                .find_map(first_item_error)
                .unwrap_or_else(|| "unknown item failure".to_string());
            return Err(SearchError::BulkRejected(first_failure));
        }

        info!(index, items = parsed.items.len(), took_ms = parsed.took, "Bulk load complete");
        Ok(BulkSummary {
            items: parsed.items.len(),
            took_ms: parsed.took,
        })
    }
}

/// Pull the error description out of one bulk-response item, if any.
/// Items look like `{"index": {"status": 400, "error": {...}}}`.
fn first_item_error(item: &serde_json::Value) -> Option<String> {
    let (_, action) = item.as_object()?.iter().next()?;
    let error = action.get("error")?;
    Some(error.to_string())
}
