//! Integration tests for the dataset and facet repositories using
//! in-memory SurrealDB.

use periodica_core::error::ConfigError;
use periodica_core::models::dataset::{DataConfiguration, DatasetSpec};
use periodica_core::models::facet::{FacetSpec, FacetType};
use periodica_core::repository::{DatasetRepository, FacetRepository};
use periodica_db::repository::{SurrealDatasetRepository, SurrealFacetRepository};
use surrealdb::Surreal;
use surrealdb::engine::local::Mem;

/// Helper: spin up in-memory DB and run migrations.
async fn setup() -> Surreal<surrealdb::engine::local::Db> {
    let db = Surreal::new::<Mem>(()).await.unwrap();
    db.use_ns("test").use_db("test").await.unwrap();
    periodica_db::run_migrations(&db).await.unwrap();
    db
}

fn es_dataset(tenant: &str, name: &str) -> DatasetSpec {
    DatasetSpec {
        tenant_name: tenant.into(),
        name: name.into(),
        es_index: format!("hi-ga-{name}"),
        data_configuration: DataConfiguration::Elasticsearch,
        detail_id: "rowId".into(),
    }
}

// -----------------------------------------------------------------------
// Dataset tests
// -----------------------------------------------------------------------

#[tokio::test]
async fn upsert_creates_dataset() {
    let db = setup().await;
    let repo = SurrealDatasetRepository::new(db);

    let dataset = repo
        .upsert(es_dataset("tenant-a", "tijdschriften"))
        .await
        .unwrap();

    assert_eq!(dataset.tenant_name, "tenant-a");
    assert_eq!(dataset.name, "tijdschriften");
    assert_eq!(dataset.es_index, "hi-ga-tijdschriften");
    assert_eq!(
        dataset.data_configuration,
        DataConfiguration::Elasticsearch
    );

    let fetched = repo.get("tenant-a", "tijdschriften").await.unwrap();
    assert_eq!(fetched, dataset);
}

#[tokio::test]
async fn upsert_twice_is_idempotent() {
    let db = setup().await;
    let repo = SurrealDatasetRepository::new(db);

    let first = repo
        .upsert(es_dataset("tenant-a", "tijdschriften"))
        .await
        .unwrap();
    let second = repo
        .upsert(es_dataset("tenant-a", "tijdschriften"))
        .await
        .unwrap();

    assert_eq!(first, second);
    let all = repo.list_by_tenant("tenant-a").await.unwrap();
    assert_eq!(all.len(), 1);
}

#[tokio::test]
async fn upsert_with_new_data_type_replaces_variant() {
    let db = setup().await;
    let repo = SurrealDatasetRepository::new(db);

    repo.upsert(es_dataset("tenant-a", "tijdschriften"))
        .await
        .unwrap();

    let mut spec = es_dataset("tenant-a", "tijdschriften");
    spec.data_configuration = DataConfiguration::Cmdi {
        id_property: "cmdi_id".into(),
        base_url: "https://editor.example.org".into(),
    };
    let updated = repo.upsert(spec).await.unwrap();

    // Exactly one document, reflecting the latest variant.
    assert_eq!(
        updated.data_configuration,
        DataConfiguration::Cmdi {
            id_property: "cmdi_id".into(),
            base_url: "https://editor.example.org".into(),
        }
    );
    let all = repo.list_by_tenant("tenant-a").await.unwrap();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].data_configuration.data_type(), "cmdi");
}

#[tokio::test]
async fn datasets_are_scoped_per_tenant() {
    let db = setup().await;
    let repo = SurrealDatasetRepository::new(db);

    repo.upsert(es_dataset("tenant-a", "tijdschriften"))
        .await
        .unwrap();
    repo.upsert(es_dataset("tenant-a", "personen")).await.unwrap();
    repo.upsert(es_dataset("tenant-b", "tijdschriften"))
        .await
        .unwrap();

    let a = repo.list_by_tenant("tenant-a").await.unwrap();
    assert_eq!(a.len(), 2);
    let b = repo.list_by_tenant("tenant-b").await.unwrap();
    assert_eq!(b.len(), 1);
}

#[tokio::test]
async fn delete_dataset() {
    let db = setup().await;
    let repo = SurrealDatasetRepository::new(db);

    repo.upsert(es_dataset("tenant-a", "tijdschriften"))
        .await
        .unwrap();
    repo.delete("tenant-a", "tijdschriften").await.unwrap();

    let result = repo.get("tenant-a", "tijdschriften").await;
    assert!(matches!(result, Err(ConfigError::NotFound { .. })));
}

// -----------------------------------------------------------------------
// Facet tests
// -----------------------------------------------------------------------

#[tokio::test]
async fn upsert_and_list_facets() {
    let db = setup().await;
    let repo = SurrealFacetRepository::new(db);

    let facet = repo
        .upsert(FacetSpec {
            dataset_name: "tijdschriften".into(),
            name: "Plaats".into(),
            property: "Plaats1.Plaats".into(),
            facet_type: FacetType::Text,
        })
        .await
        .unwrap();
    assert_eq!(facet.facet_type, FacetType::Text);

    let all = repo.list_by_dataset("tijdschriften").await.unwrap();
    assert_eq!(all.len(), 1);
}

#[tokio::test]
async fn facet_upsert_is_idempotent() {
    let db = setup().await;
    let repo = SurrealFacetRepository::new(db);

    let spec = FacetSpec {
        dataset_name: "tijdschriften".into(),
        name: "Jaar".into(),
        property: "Jaar_van_oprichting".into(),
        facet_type: FacetType::Range,
    };

    let first = repo.upsert(spec.clone()).await.unwrap();
    let second = repo.upsert(spec).await.unwrap();
    assert_eq!(first, second);

    let all = repo.list_by_dataset("tijdschriften").await.unwrap();
    assert_eq!(all.len(), 1);
}

#[tokio::test]
async fn delete_by_dataset_clears_facets() {
    let db = setup().await;
    let repo = SurrealFacetRepository::new(db);

    for (name, property) in [("Plaats", "Plaats1.Plaats"), ("Jaar", "Jaar_van_oprichting")] {
        repo.upsert(FacetSpec {
            dataset_name: "tijdschriften".into(),
            name: name.into(),
            property: property.into(),
            facet_type: FacetType::Text,
        })
        .await
        .unwrap();
    }

    repo.delete_by_dataset("tijdschriften").await.unwrap();

    let all = repo.list_by_dataset("tijdschriften").await.unwrap();
    assert!(all.is_empty());
}
