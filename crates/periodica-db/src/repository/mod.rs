//! SurrealDB repository implementations.

mod dataset;
mod facet;
mod property;
mod tenant;

pub use dataset::SurrealDatasetRepository;
pub use facet::SurrealFacetRepository;
pub use property::SurrealDisplayPropertyRepository;
pub use tenant::SurrealTenantRepository;
