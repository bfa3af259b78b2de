//! Database-specific error types and conversions.

use periodica_core::error::ConfigError;

/// Database-layer error type.
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("SurrealDB error: {0}")]
    Surreal(#[from] surrealdb::Error),

    #[error("Cannot reach configuration store at {url}: {source}")]
    Connection {
        url: String,
        source: surrealdb::Error,
    },

    #[error("Migration failed: {0}")]
    Migration(String),

    #[error("Record not found: {entity} with key {key}")]
    NotFound { entity: String, key: String },

    #[error("Conflict on {entity}: {detail}")]
    Conflict { entity: String, detail: String },

    #[error("Invalid stored record: {0}")]
    InvalidRecord(String),
}

impl From<DbError> for ConfigError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::NotFound { entity, key } => ConfigError::NotFound { entity, key },
            DbError::Conflict { entity, detail } => ConfigError::Conflict { entity, detail },
            other => ConfigError::Database(other.to_string()),
        }
    }
}
