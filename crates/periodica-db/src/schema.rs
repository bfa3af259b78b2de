//! Configuration-store schema and its version history.
//!
//! Every collection is SCHEMAFULL. Natural keys double as record ids;
//! secondary unique keys are enforced with UNIQUE indexes. Enums are
//! stored as strings with ASSERT constraints.
//!
//! Applied schema versions are tracked in a `schema_history` table so
//! the seeder can be pointed at the same store any number of times.

use surrealdb::{Connection, Surreal};
use surrealdb_types::SurrealValue;
use tracing::{debug, info};

use crate::error::DbError;

// -----------------------------------------------------------------------
// Version history
// -----------------------------------------------------------------------

const HISTORY_TABLE_DDL: &str = "\
DEFINE TABLE IF NOT EXISTS schema_history SCHEMAFULL;
DEFINE FIELD IF NOT EXISTS version ON TABLE schema_history TYPE int;
DEFINE FIELD IF NOT EXISTS name ON TABLE schema_history TYPE string;
DEFINE FIELD IF NOT EXISTS applied_at ON TABLE schema_history TYPE datetime \
    DEFAULT time::now();
DEFINE INDEX IF NOT EXISTS idx_schema_history_version ON TABLE schema_history \
    COLUMNS version UNIQUE;
";

#[derive(Debug, SurrealValue)]
struct HistoryRow {
    version: u32,
}

struct Migration {
    version: u32,
    name: &'static str,
    sql: &'static str,
}

static MIGRATIONS: &[Migration] = &[Migration {
    version: 1,
    name: "initial_schema",
    sql: SCHEMA_V1,
}];

// -----------------------------------------------------------------------
// Schema v1 — configuration collections
// -----------------------------------------------------------------------

const SCHEMA_V1: &str = "\
-- =======================================================================
-- Tenants (one record per browser deployment, record id = name)
-- =======================================================================
DEFINE TABLE tenant SCHEMAFULL;
DEFINE FIELD name ON TABLE tenant TYPE string;
DEFINE FIELD domain ON TABLE tenant TYPE string;
DEFINE FIELD created_at ON TABLE tenant TYPE datetime \
    DEFAULT time::now();
DEFINE FIELD updated_at ON TABLE tenant TYPE datetime \
    DEFAULT time::now();
DEFINE INDEX idx_tenant_domain ON TABLE tenant \
    COLUMNS domain UNIQUE;

-- =======================================================================
-- Datasets (record id = tenant_name/name)
-- =======================================================================
DEFINE TABLE dataset SCHEMAFULL;
DEFINE FIELD tenant_name ON TABLE dataset TYPE string;
DEFINE FIELD name ON TABLE dataset TYPE string;
DEFINE FIELD es_index ON TABLE dataset TYPE string;
DEFINE FIELD data_type ON TABLE dataset TYPE string \
    ASSERT $value IN ['elasticsearch', 'cmdi'];
DEFINE FIELD id_property ON TABLE dataset TYPE string;
DEFINE FIELD base_url ON TABLE dataset TYPE string;
DEFINE FIELD detail_id ON TABLE dataset TYPE string;
DEFINE FIELD created_at ON TABLE dataset TYPE datetime \
    DEFAULT time::now();
DEFINE FIELD updated_at ON TABLE dataset TYPE datetime \
    DEFAULT time::now();
DEFINE INDEX idx_dataset_tenant_name ON TABLE dataset \
    COLUMNS tenant_name, name UNIQUE;

-- =======================================================================
-- Facets (record id = dataset_name/name; unpopulated by default)
-- =======================================================================
DEFINE TABLE facet SCHEMAFULL;
DEFINE FIELD dataset_name ON TABLE facet TYPE string;
DEFINE FIELD name ON TABLE facet TYPE string;
DEFINE FIELD property ON TABLE facet TYPE string;
DEFINE FIELD facet_type ON TABLE facet TYPE string \
    ASSERT $value IN ['text', 'tree', 'range'];
DEFINE FIELD created_at ON TABLE facet TYPE datetime \
    DEFAULT time::now();
DEFINE FIELD updated_at ON TABLE facet TYPE datetime \
    DEFAULT time::now();
DEFINE INDEX idx_facet_dataset_name ON TABLE facet \
    COLUMNS dataset_name, name UNIQUE;

-- =======================================================================
-- Result properties (columns of the result list)
-- =======================================================================
DEFINE TABLE result_property SCHEMAFULL;
DEFINE FIELD dataset_name ON TABLE result_property TYPE string;
DEFINE FIELD name ON TABLE result_property TYPE string;
DEFINE FIELD path ON TABLE result_property TYPE string;
DEFINE FIELD property_type ON TABLE result_property TYPE string;
DEFINE FIELD display_order ON TABLE result_property TYPE int \
    ASSERT $value >= 0;
DEFINE FIELD created_at ON TABLE result_property TYPE datetime \
    DEFAULT time::now();
DEFINE INDEX idx_result_property_order ON TABLE result_property \
    COLUMNS dataset_name, display_order UNIQUE;

-- =======================================================================
-- Detail properties (fields of the detail view)
-- =======================================================================
DEFINE TABLE detail_property SCHEMAFULL;
DEFINE FIELD dataset_name ON TABLE detail_property TYPE string;
DEFINE FIELD name ON TABLE detail_property TYPE string;
DEFINE FIELD path ON TABLE detail_property TYPE string;
DEFINE FIELD property_type ON TABLE detail_property TYPE string;
DEFINE FIELD display_order ON TABLE detail_property TYPE int \
    ASSERT $value >= 0;
DEFINE FIELD created_at ON TABLE detail_property TYPE datetime \
    DEFAULT time::now();
DEFINE INDEX idx_detail_property_order ON TABLE detail_property \
    COLUMNS dataset_name, display_order UNIQUE;
";

// -----------------------------------------------------------------------
// Public API
// -----------------------------------------------------------------------

/// Bring the configuration-store schema up to the latest version.
///
/// Looks up the highest version in `schema_history` and applies every
/// migration above it, recording each one. A store that is already
/// current is left untouched, so the seeder may call this on every run.
pub async fn run_migrations<C: Connection>(db: &Surreal<C>) -> Result<(), DbError> {
    db.query(HISTORY_TABLE_DDL)
        .await?
        .check()
        .map_err(|e| DbError::Migration(format!("schema_history setup failed: {e}")))?;

    let applied = applied_version(db).await?;
    let pending: Vec<&Migration> = MIGRATIONS
        .iter()
        .filter(|m| m.version > applied)
        .collect();
    if pending.is_empty() {
        debug!(version = applied, "Configuration schema is current");
        return Ok(());
    }

    for migration in pending {
        info!(
            version = migration.version,
            name = migration.name,
            "Updating configuration schema"
        );
        db.query(migration.sql).await?.check().map_err(|e| {
            DbError::Migration(format!(
                "schema v{} ({}) could not be applied: {}",
                migration.version, migration.name, e,
            ))
        })?;

        db.query("CREATE schema_history SET version = $version, name = $name")
            .bind(("version", migration.version))
            .bind(("name", migration.name))
            .await?
            .check()
            .map_err(|e| {
                DbError::Migration(format!(
                    "schema v{} applied but could not be recorded: {}",
                    migration.version, e,
                ))
            })?;

        info!(version = migration.version, "Configuration schema updated");
    }

    Ok(())
}

/// Highest schema version recorded in `schema_history`, or 0 for a
/// fresh store.
async fn applied_version<C: Connection>(db: &Surreal<C>) -> Result<u32, DbError> {
    let mut result = db
        .query("SELECT version FROM schema_history ORDER BY version DESC LIMIT 1")
        .await?;
    let rows: Vec<HistoryRow> = result.take(0)?;
    Ok(rows.first().map(|row| row.version).unwrap_or(0))
}
