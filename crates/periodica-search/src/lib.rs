//! Periodica Search — thin HTTP client for the search-engine API.
//!
//! Covers exactly the two calls index seeding needs: index creation
//! from a static mapping document (`PUT /{index}`) and a single bulk
//! load of a newline-delimited JSON export (`POST /{index}/_bulk`).
//! Every failure is fatal; nothing is retried.

mod client;
mod error;

pub use client::{BulkSummary, SearchClient};
pub use error::SearchError;
