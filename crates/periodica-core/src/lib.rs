//! Periodica Core — domain models and repository trait definitions for
//! the browser configuration store.
//!
//! The configuration store is read by an external data-browser API
//! server. This crate defines:
//! - The configuration entities (tenants, datasets, facets, display
//!   properties) and their natural keys
//! - Repository traits with idempotent-upsert contracts
//! - The shared error type ([`ConfigError`])

pub mod error;
pub mod models;
pub mod repository;

pub use error::{ConfigError, ConfigResult};
