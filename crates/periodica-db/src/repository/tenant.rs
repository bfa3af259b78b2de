//! SurrealDB implementation of [`TenantRepository`].

use chrono::{DateTime, Utc};
use periodica_core::error::ConfigResult;
use periodica_core::models::tenant::{Tenant, TenantSpec};
use periodica_core::repository::TenantRepository;
use surrealdb::{Connection, Surreal};
use surrealdb_types::SurrealValue;

use crate::error::DbError;

const TENANT_FIELDS: &str = "name, domain, created_at, updated_at";

/// DB-side row struct for tenant records.
#[derive(Debug, SurrealValue)]
struct TenantRow {
    name: String,
    domain: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TenantRow {
    fn into_tenant(self) -> Tenant {
        Tenant {
            name: self.name,
            domain: self.domain,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

/// SurrealDB implementation of the tenant repository.
///
/// The tenant name doubles as the record id, which makes the upsert
/// naturally keyed: re-running with the same name can never duplicate.
#[derive(Clone)]
pub struct SurrealTenantRepository<C: Connection> {
    db: Surreal<C>,
}

impl<C: Connection> SurrealTenantRepository<C> {
    pub fn new(db: Surreal<C>) -> Self {
        Self { db }
    }

    async fn fetch_by_name(&self, name: &str) -> Result<Option<Tenant>, DbError> {
        let mut result = self
            .db
            .query(format!(
                "SELECT {TENANT_FIELDS} FROM type::record('tenant', $name)"
            ))
            .bind(("name", name.to_string()))
            .await?;

        let rows: Vec<TenantRow> = result.take(0)?;
        Ok(rows.into_iter().next().map(TenantRow::into_tenant))
    }
}

impl<C: Connection> TenantRepository for SurrealTenantRepository<C> {
    async fn upsert(&self, spec: TenantSpec) -> ConfigResult<Tenant> {
        // A domain held by a *different* tenant is a configuration
        // conflict, not something to overwrite.
        let mut result = self
            .db
            .query(format!(
                "SELECT {TENANT_FIELDS} FROM tenant \
                 WHERE domain = $domain AND name != $name"
            ))
            .bind(("domain", spec.domain.clone()))
            .bind(("name", spec.name.clone()))
            .await
            .map_err(DbError::from)?;
        let clashing: Vec<TenantRow> = result.take(0).map_err(DbError::from)?;
        if let Some(holder) = clashing.first() {
            return Err(DbError::Conflict {
                entity: "tenant".into(),
                detail: format!(
                    "domain '{}' already belongs to tenant '{}'",
                    spec.domain, holder.name,
                ),
            }
            .into());
        }

        match self.fetch_by_name(&spec.name).await? {
            // Re-running with identical values leaves the record
            // byte-for-byte untouched.
            Some(existing) if existing.matches(&spec) => return Ok(existing),
            Some(_) => {
                self.db
                    .query(
                        "UPDATE type::record('tenant', $name) SET \
                         domain = $domain, updated_at = time::now()",
                    )
                    .bind(("name", spec.name.clone()))
                    .bind(("domain", spec.domain.clone()))
                    .await
                    .map_err(DbError::from)?
                    .check()
                    .map_err(DbError::from)?;
            }
            None => {
                self.db
                    .query(
                        "CREATE type::record('tenant', $name) SET \
                         name = $name, domain = $domain",
                    )
                    .bind(("name", spec.name.clone()))
                    .bind(("domain", spec.domain.clone()))
                    .await
                    .map_err(DbError::from)?
                    .check()
                    .map_err(DbError::from)?;
            }
        }

        let stored = self
            .fetch_by_name(&spec.name)
            .await?
            .ok_or_else(|| DbError::NotFound {
                entity: "tenant".into(),
                key: spec.name.clone(),
            })?;

        Ok(stored)
    }

    async fn get_by_name(&self, name: &str) -> ConfigResult<Tenant> {
        let tenant = self
            .fetch_by_name(name)
            .await?
            .ok_or_else(|| DbError::NotFound {
                entity: "tenant".into(),
                key: name.to_string(),
            })?;

        Ok(tenant)
    }

    async fn get_by_domain(&self, domain: &str) -> ConfigResult<Tenant> {
        let mut result = self
            .db
            .query(format!(
                "SELECT {TENANT_FIELDS} FROM tenant WHERE domain = $domain"
            ))
            .bind(("domain", domain.to_string()))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<TenantRow> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: "tenant".into(),
            key: format!("domain={domain}"),
        })?;

        Ok(row.into_tenant())
    }

    async fn list(&self) -> ConfigResult<Vec<Tenant>> {
        let mut result = self
            .db
            .query(format!(
                "SELECT {TENANT_FIELDS} FROM tenant ORDER BY name ASC"
            ))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<TenantRow> = result.take(0).map_err(DbError::from)?;
        Ok(rows.into_iter().map(TenantRow::into_tenant).collect())
    }

    async fn delete(&self, name: &str) -> ConfigResult<()> {
        self.db
            .query("DELETE type::record('tenant', $name)")
            .bind(("name", name.to_string()))
            .await
            .map_err(DbError::from)?;

        Ok(())
    }
}
