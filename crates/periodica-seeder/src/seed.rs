//! The politieke-tijdschriften seed.
//!
//! The browser configuration for this dataset is a fixed set of
//! literal constants, applied in one strictly linear sequence. Paths
//! address the denormalized record fields produced by the spreadsheet
//! exporter (referenced persons, printers, and places are embedded as
//! objects).

use periodica_core::error::ConfigResult;
use periodica_core::models::dataset::{DataConfiguration, DatasetSpec};
use periodica_core::models::facet::FacetSpec;
use periodica_core::models::property::DisplayPropertySpec;
use periodica_core::models::tenant::TenantSpec;
use periodica_core::repository::{
    DatasetRepository, DisplayPropertyRepository, FacetRepository, TenantRepository,
};
use periodica_db::repository::{
    SurrealDatasetRepository, SurrealDisplayPropertyRepository, SurrealFacetRepository,
    SurrealTenantRepository,
};
use surrealdb::{Connection, Surreal};
use tracing::info;

/// Search index holding the exported periodical records.
pub const ES_INDEX: &str = "hi-ga-tijdschriften-tijdschriften";

const TENANT_NAME: &str = "politieke-tijdschriften";
const TENANT_DOMAIN: &str = "localhost";
const DATASET_NAME: &str = "tijdschriften";

/// Everything one `config` run writes, in write order.
#[derive(Debug, Clone)]
pub struct SeedPlan {
    pub tenant: TenantSpec,
    pub dataset: DatasetSpec,
    pub facets: Vec<FacetSpec>,
    pub result_properties: Vec<DisplayPropertySpec>,
    pub detail_properties: Vec<DisplayPropertySpec>,
}

/// The full browser configuration for the politieke-tijdschriften
/// dataset.
pub fn politieke_tijdschriften() -> SeedPlan {
    SeedPlan {
        tenant: TenantSpec {
            name: TENANT_NAME.into(),
            domain: TENANT_DOMAIN.into(),
        },
        dataset: DatasetSpec {
            tenant_name: TENANT_NAME.into(),
            name: DATASET_NAME.into(),
            es_index: ES_INDEX.into(),
            data_configuration: DataConfiguration::Elasticsearch,
            detail_id: "rowId".into(),
        },
        // No facets for this dataset; the collection stays empty.
        facets: vec![],
        result_properties: vec![
            DisplayPropertySpec::new("Titel", "$.Titel", "text", 0),
            DisplayPropertySpec::new("Subtitel", "$.Subtitel", "text", 1),
            DisplayPropertySpec::new("Plaats", "$.Plaats1.Plaats", "text", 2),
            DisplayPropertySpec::new("Uitgever", "$.Uitgever.Naam", "text", 3),
            DisplayPropertySpec::new("Jaar van oprichting", "$.Jaar_van_oprichting", "text", 4),
        ],
        detail_properties: vec![
            DisplayPropertySpec::new("Titel", "$.Titel", "text", 0),
            DisplayPropertySpec::new("Subtitel", "$.Subtitel", "text", 1),
            DisplayPropertySpec::new("Plaats", "$.Plaats1.Plaats", "text", 2),
            DisplayPropertySpec::new("Tweede plaats", "$.Plaats2.Plaats", "text", 3),
            DisplayPropertySpec::new("Uitgever", "$.Uitgever.Naam", "text", 4),
            DisplayPropertySpec::new("Tweede uitgever", "$.Uitgever2.Naam", "text", 5),
            DisplayPropertySpec::new("Drukker", "$.Drukker.Naam", "text", 6),
            DisplayPropertySpec::new("Redacteur", "$.Auteur_Redacteur1.Naam", "text", 7),
            DisplayPropertySpec::new("Jaar van oprichting", "$.Jaar_van_oprichting", "text", 8),
            DisplayPropertySpec::new("Frequentie", "$.Frequentie", "text", 9),
        ],
    }
}

/// Apply a seed plan to the configuration store.
///
/// Strictly linear: the first failing write aborts the rest. Every
/// step is idempotent, so re-running after a failure is always safe.
pub async fn apply<C: Connection>(db: Surreal<C>, plan: &SeedPlan) -> ConfigResult<()> {
    let tenants = SurrealTenantRepository::new(db.clone());
    let datasets = SurrealDatasetRepository::new(db.clone());
    let facets = SurrealFacetRepository::new(db.clone());
    let result_properties = SurrealDisplayPropertyRepository::result_properties(db.clone());
    let detail_properties = SurrealDisplayPropertyRepository::detail_properties(db);

    let tenant = tenants.upsert(plan.tenant.clone()).await?;
    info!(tenant = %tenant.name, domain = %tenant.domain, "Tenant configured");

    let dataset = datasets.upsert(plan.dataset.clone()).await?;
    info!(
        dataset = %dataset.name,
        es_index = %dataset.es_index,
        data_type = dataset.data_configuration.data_type(),
        "Dataset configured"
    );

    for facet in &plan.facets {
        let facet = facets.upsert(facet.clone()).await?;
        info!(facet = %facet.name, dataset = %facet.dataset_name, "Facet configured");
    }

    let stored = result_properties
        .replace_for_dataset(&plan.dataset.name, plan.result_properties.clone())
        .await?;
    info!(count = stored.len(), "Result properties configured");

    let stored = detail_properties
        .replace_for_dataset(&plan.dataset.name, plan.detail_properties.clone())
        .await?;
    info!(count = stored.len(), "Detail properties configured");

    Ok(())
}
