//! Integration tests for the tenant repository using in-memory
//! SurrealDB.

use periodica_core::error::ConfigError;
use periodica_core::models::tenant::TenantSpec;
use periodica_core::repository::TenantRepository;
use periodica_db::repository::SurrealTenantRepository;
use surrealdb::Surreal;
use surrealdb::engine::local::Mem;

/// Helper: spin up in-memory DB and run migrations.
async fn setup() -> Surreal<surrealdb::engine::local::Db> {
    let db = Surreal::new::<Mem>(()).await.unwrap();
    db.use_ns("test").use_db("test").await.unwrap();
    periodica_db::run_migrations(&db).await.unwrap();
    db
}

fn spec(name: &str, domain: &str) -> TenantSpec {
    TenantSpec {
        name: name.into(),
        domain: domain.into(),
    }
}

#[tokio::test]
async fn upsert_creates_tenant() {
    let db = setup().await;
    let repo = SurrealTenantRepository::new(db);

    let tenant = repo.upsert(spec("tenant-a", "localhost")).await.unwrap();

    assert_eq!(tenant.name, "tenant-a");
    assert_eq!(tenant.domain, "localhost");

    let fetched = repo.get_by_name("tenant-a").await.unwrap();
    assert_eq!(fetched, tenant);
}

#[tokio::test]
async fn upsert_twice_yields_exactly_one_identical_record() {
    let db = setup().await;
    let repo = SurrealTenantRepository::new(db);

    let first = repo.upsert(spec("tenant-a", "localhost")).await.unwrap();
    let second = repo.upsert(spec("tenant-a", "localhost")).await.unwrap();

    // Byte-for-byte identical, timestamps included.
    assert_eq!(first, second);

    let all = repo.list().await.unwrap();
    assert_eq!(all.len(), 1);
}

#[tokio::test]
async fn upsert_overwrites_changed_domain() {
    let db = setup().await;
    let repo = SurrealTenantRepository::new(db);

    let before = repo.upsert(spec("tenant-a", "localhost")).await.unwrap();
    let after = repo
        .upsert(spec("tenant-a", "browser.example.org"))
        .await
        .unwrap();

    assert_eq!(after.name, "tenant-a");
    assert_eq!(after.domain, "browser.example.org");
    assert_eq!(after.created_at, before.created_at);
    assert!(after.updated_at >= before.updated_at);

    let all = repo.list().await.unwrap();
    assert_eq!(all.len(), 1, "overwrite must not duplicate");
}

#[tokio::test]
async fn domain_collision_between_tenants_is_a_conflict() {
    let db = setup().await;
    let repo = SurrealTenantRepository::new(db);

    repo.upsert(spec("tenant-a", "localhost")).await.unwrap();

    let err = repo.upsert(spec("tenant-b", "localhost")).await.unwrap_err();
    match err {
        ConfigError::Conflict { entity, detail } => {
            assert_eq!(entity, "tenant");
            assert!(detail.contains("localhost"), "diagnostic names the domain");
            assert!(detail.contains("tenant-a"), "diagnostic names the holder");
        }
        other => panic!("expected conflict, got {other:?}"),
    }

    // The conflicting write must not have touched the store.
    let all = repo.list().await.unwrap();
    assert_eq!(all.len(), 1);
}

#[tokio::test]
async fn get_by_domain_finds_tenant() {
    let db = setup().await;
    let repo = SurrealTenantRepository::new(db);

    repo.upsert(spec("tenant-a", "a.example.org")).await.unwrap();
    repo.upsert(spec("tenant-b", "b.example.org")).await.unwrap();

    let found = repo.get_by_domain("b.example.org").await.unwrap();
    assert_eq!(found.name, "tenant-b");
}

#[tokio::test]
async fn get_missing_tenant_is_not_found() {
    let db = setup().await;
    let repo = SurrealTenantRepository::new(db);

    let err = repo.get_by_name("nope").await.unwrap_err();
    assert!(matches!(err, ConfigError::NotFound { .. }));
}

#[tokio::test]
async fn delete_tenant() {
    let db = setup().await;
    let repo = SurrealTenantRepository::new(db);

    repo.upsert(spec("tenant-a", "localhost")).await.unwrap();
    repo.delete("tenant-a").await.unwrap();

    let result = repo.get_by_name("tenant-a").await;
    assert!(result.is_err(), "should not find deleted tenant");
}
