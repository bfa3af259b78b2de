//! Error types for the periodica configuration writer.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Entity not found: {entity} with key {key}")]
    NotFound { entity: String, key: String },

    #[error("Configuration conflict on {entity}: {detail}")]
    Conflict { entity: String, detail: String },

    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Database error: {0}")]
    Database(String),

    #[error("Search engine error: {0}")]
    SearchEngine(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type ConfigResult<T> = Result<T, ConfigError>;
