//! Periodica Database — SurrealDB connection management, schema
//! migrations, and repository implementations for the configuration
//! collections.
//!
//! This crate provides:
//! - Connection management ([`DbManager`], [`DbConfig`])
//! - Schema initialization and migrations ([`run_migrations`])
//! - Idempotent-upsert repositories for tenants, datasets, facets, and
//!   display properties
//! - Error types ([`DbError`])

mod connection;
mod error;
pub mod repository;
mod schema;

pub use connection::{DbConfig, DbManager};
pub use error::DbError;
pub use schema::run_migrations;
