//! Repository trait definitions for the configuration collections.
//!
//! All operations are async and idempotent: given the same desired
//! state twice, the second call leaves the collection byte-for-byte
//! unchanged. Writers never duplicate records; prior records with the
//! same natural key are overwritten.

use crate::error::ConfigResult;
use crate::models::{
    dataset::{Dataset, DatasetSpec},
    facet::{Facet, FacetSpec},
    property::{DisplayProperty, DisplayPropertySpec},
    tenant::{Tenant, TenantSpec},
};

pub trait TenantRepository: Send + Sync {
    /// Ensure exactly one tenant with `spec.name` exists with the given
    /// values. Fails with a conflict if `spec.domain` already belongs
    /// to a different tenant.
    fn upsert(&self, spec: TenantSpec) -> impl Future<Output = ConfigResult<Tenant>> + Send;
    fn get_by_name(&self, name: &str) -> impl Future<Output = ConfigResult<Tenant>> + Send;
    fn get_by_domain(&self, domain: &str) -> impl Future<Output = ConfigResult<Tenant>> + Send;
    fn list(&self) -> impl Future<Output = ConfigResult<Vec<Tenant>>> + Send;
    fn delete(&self, name: &str) -> impl Future<Output = ConfigResult<()>> + Send;
}

pub trait DatasetRepository: Send + Sync {
    /// Ensure exactly one dataset with key (tenant_name, name) exists
    /// with the given values, including the `data_configuration`
    /// variant.
    fn upsert(&self, spec: DatasetSpec) -> impl Future<Output = ConfigResult<Dataset>> + Send;
    fn get(
        &self,
        tenant_name: &str,
        name: &str,
    ) -> impl Future<Output = ConfigResult<Dataset>> + Send;
    fn list_by_tenant(
        &self,
        tenant_name: &str,
    ) -> impl Future<Output = ConfigResult<Vec<Dataset>>> + Send;
    fn delete(
        &self,
        tenant_name: &str,
        name: &str,
    ) -> impl Future<Output = ConfigResult<()>> + Send;
}

pub trait FacetRepository: Send + Sync {
    /// Ensure exactly one facet with key (dataset_name, name) exists
    /// with the given values.
    fn upsert(&self, spec: FacetSpec) -> impl Future<Output = ConfigResult<Facet>> + Send;
    fn list_by_dataset(
        &self,
        dataset_name: &str,
    ) -> impl Future<Output = ConfigResult<Vec<Facet>>> + Send;
    fn delete_by_dataset(
        &self,
        dataset_name: &str,
    ) -> impl Future<Output = ConfigResult<()>> + Send;
}

/// Repository for one display-property collection (result list or
/// detail view). Property sets are replaced wholesale per dataset
/// rather than patched record by record.
pub trait DisplayPropertyRepository: Send + Sync {
    /// Replace the dataset's entire property set with `specs`
    /// (delete-then-reinsert, transactional). Duplicate `order` values
    /// in `specs` are rejected before any write. Returns the stored
    /// set in display order.
    fn replace_for_dataset(
        &self,
        dataset_name: &str,
        specs: Vec<DisplayPropertySpec>,
    ) -> impl Future<Output = ConfigResult<Vec<DisplayProperty>>> + Send;

    /// The stored property set in display order.
    fn list_by_dataset(
        &self,
        dataset_name: &str,
    ) -> impl Future<Output = ConfigResult<Vec<DisplayProperty>>> + Send;
}
