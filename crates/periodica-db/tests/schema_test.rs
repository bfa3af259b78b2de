//! Integration tests for schema initialization using in-memory SurrealDB.

use surrealdb::Surreal;
use surrealdb::engine::local::Mem;

#[tokio::test]
async fn schema_migration_applies_successfully() {
    let db = Surreal::new::<Mem>(()).await.unwrap();
    db.use_ns("test").use_db("test").await.unwrap();

    periodica_db::run_migrations(&db).await.unwrap();

    // Verify that the configuration collections exist via INFO FOR DB.
    let mut result = db.query("INFO FOR DB").await.unwrap();
    let info: Option<surrealdb_types::Value> = result.take(0).unwrap();
    let info = info.expect("INFO FOR DB should return a value");
    let info_str = format!("{:?}", info);

    assert!(info_str.contains("tenant"), "missing tenant table");
    assert!(info_str.contains("dataset"), "missing dataset table");
    assert!(info_str.contains("facet"), "missing facet table");
    assert!(
        info_str.contains("result_property"),
        "missing result_property table"
    );
    assert!(
        info_str.contains("detail_property"),
        "missing detail_property table"
    );

    // Verify the applied version was recorded.
    assert!(
        info_str.contains("schema_history"),
        "missing schema_history table"
    );
}

#[tokio::test]
async fn history_records_applied_version() {
    let db = Surreal::new::<Mem>(()).await.unwrap();
    db.use_ns("test").use_db("test").await.unwrap();

    periodica_db::run_migrations(&db).await.unwrap();

    let mut result = db
        .query("SELECT version, name FROM schema_history ORDER BY version ASC")
        .await
        .unwrap();
    let rows: Vec<surrealdb_types::Value> = result.take(0).unwrap();
    assert_eq!(rows.len(), 1);

    let row = format!("{:?}", rows[0]);
    assert!(row.contains("initial_schema"), "unexpected history row: {row}");
}

#[tokio::test]
async fn migration_is_idempotent() {
    let db = Surreal::new::<Mem>(()).await.unwrap();
    db.use_ns("test").use_db("test").await.unwrap();

    // Run twice — should not fail.
    periodica_db::run_migrations(&db).await.unwrap();
    periodica_db::run_migrations(&db).await.unwrap();

    // Verify only one history record exists.
    let mut result = db.query("SELECT * FROM schema_history").await.unwrap();
    let records: Vec<surrealdb_types::Value> = result.take(0).unwrap();
    assert_eq!(records.len(), 1, "expected exactly one history record");
}

#[tokio::test]
async fn can_create_record_after_migration() {
    let db = Surreal::new::<Mem>(()).await.unwrap();
    db.use_ns("test").use_db("test").await.unwrap();

    periodica_db::run_migrations(&db).await.unwrap();

    db.query(
        "CREATE tenant SET \
         name = 'politieke-tijdschriften', \
         domain = 'localhost'",
    )
    .await
    .unwrap()
    .check()
    .unwrap();

    let mut result = db
        .query("SELECT * FROM tenant WHERE domain = 'localhost'")
        .await
        .unwrap();
    let records: Vec<surrealdb_types::Value> = result.take(0).unwrap();
    assert_eq!(records.len(), 1);
}

#[tokio::test]
async fn unique_index_prevents_duplicate_domains() {
    let db = Surreal::new::<Mem>(()).await.unwrap();
    db.use_ns("test").use_db("test").await.unwrap();

    periodica_db::run_migrations(&db).await.unwrap();

    db.query(
        "CREATE tenant SET \
         name = 'tenant-a', \
         domain = 'localhost'",
    )
    .await
    .unwrap()
    .check()
    .unwrap();

    // Attempt duplicate domain under a different name — should fail.
    let result = db
        .query(
            "CREATE tenant SET \
             name = 'tenant-b', \
             domain = 'localhost'",
        )
        .await
        .unwrap()
        .check();

    assert!(result.is_err(), "duplicate domain should be rejected");
}

#[tokio::test]
async fn unique_index_prevents_duplicate_display_orders() {
    let db = Surreal::new::<Mem>(()).await.unwrap();
    db.use_ns("test").use_db("test").await.unwrap();

    periodica_db::run_migrations(&db).await.unwrap();

    db.query(
        "CREATE result_property SET \
         dataset_name = 'tijdschriften', name = 'Titel', \
         path = '$.Titel', property_type = 'text', display_order = 0",
    )
    .await
    .unwrap()
    .check()
    .unwrap();

    let result = db
        .query(
            "CREATE result_property SET \
             dataset_name = 'tijdschriften', name = 'Subtitel', \
             path = '$.Subtitel', property_type = 'text', display_order = 0",
        )
        .await
        .unwrap()
        .check();

    assert!(result.is_err(), "duplicate display order should be rejected");
}
