//! Domain models for the browser configuration store.

pub mod dataset;
pub mod facet;
pub mod property;
pub mod tenant;
