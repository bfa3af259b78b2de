//! SurrealDB implementation of [`FacetRepository`].

use chrono::{DateTime, Utc};
use periodica_core::error::ConfigResult;
use periodica_core::models::facet::{Facet, FacetSpec, FacetType};
use periodica_core::repository::FacetRepository;
use surrealdb::{Connection, Surreal};
use surrealdb_types::SurrealValue;

use crate::error::DbError;

const FACET_FIELDS: &str = "dataset_name, name, property, facet_type, \
    created_at, updated_at";

/// DB-side row struct for facet records.
#[derive(Debug, SurrealValue)]
struct FacetRow {
    dataset_name: String,
    name: String,
    property: String,
    facet_type: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl FacetRow {
    fn into_facet(self) -> Result<Facet, DbError> {
        let facet_type: FacetType = self
            .facet_type
            .parse()
            .map_err(|_| {
                DbError::InvalidRecord(format!(
                    "facet '{}/{}' has unknown facet_type '{}'",
                    self.dataset_name, self.name, self.facet_type,
                ))
            })?;
        Ok(Facet {
            dataset_name: self.dataset_name,
            name: self.name,
            property: self.property,
            facet_type,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

/// Record id for a facet: unique per (dataset, name).
fn facet_key(dataset_name: &str, name: &str) -> String {
    format!("{dataset_name}/{name}")
}

/// SurrealDB implementation of the facet repository.
#[derive(Clone)]
pub struct SurrealFacetRepository<C: Connection> {
    db: Surreal<C>,
}

impl<C: Connection> SurrealFacetRepository<C> {
    pub fn new(db: Surreal<C>) -> Self {
        Self { db }
    }

    async fn fetch(&self, dataset_name: &str, name: &str) -> Result<Option<Facet>, DbError> {
        let mut result = self
            .db
            .query(format!(
                "SELECT {FACET_FIELDS} FROM type::record('facet', $key)"
            ))
            .bind(("key", facet_key(dataset_name, name)))
            .await?;

        let rows: Vec<FacetRow> = result.take(0)?;
        rows.into_iter().next().map(FacetRow::into_facet).transpose()
    }
}

impl<C: Connection> FacetRepository for SurrealFacetRepository<C> {
    async fn upsert(&self, spec: FacetSpec) -> ConfigResult<Facet> {
        match self
            .fetch(&spec.dataset_name, &spec.name)
            .await?
        {
            Some(existing) if existing.matches(&spec) => return Ok(existing),
            Some(_) => {
                self.db
                    .query(
                        "UPDATE type::record('facet', $key) SET \
                         property = $property, facet_type = $facet_type, \
                         updated_at = time::now()",
                    )
                    .bind(("key", facet_key(&spec.dataset_name, &spec.name)))
                    .bind(("property", spec.property.clone()))
                    .bind(("facet_type", spec.facet_type.as_str().to_string()))
                    .await
                    .map_err(DbError::from)?
                    .check()
                    .map_err(DbError::from)?;
            }
            None => {
                self.db
                    .query(
                        "CREATE type::record('facet', $key) SET \
                         dataset_name = $dataset_name, name = $name, \
                         property = $property, facet_type = $facet_type",
                    )
                    .bind(("key", facet_key(&spec.dataset_name, &spec.name)))
                    .bind(("dataset_name", spec.dataset_name.clone()))
                    .bind(("name", spec.name.clone()))
                    .bind(("property", spec.property.clone()))
                    .bind(("facet_type", spec.facet_type.as_str().to_string()))
                    .await
                    .map_err(DbError::from)?
                    .check()
                    .map_err(DbError::from)?;
            }
        }

        let stored = self
            .fetch(&spec.dataset_name, &spec.name)
            .await?
            .ok_or_else(|| DbError::NotFound {
                entity: "facet".into(),
                key: facet_key(&spec.dataset_name, &spec.name),
            })?;

        Ok(stored)
    }

    async fn list_by_dataset(&self, dataset_name: &str) -> ConfigResult<Vec<Facet>> {
        let mut result = self
            .db
            .query(format!(
                "SELECT {FACET_FIELDS} FROM facet \
                 WHERE dataset_name = $dataset_name ORDER BY name ASC"
            ))
            .bind(("dataset_name", dataset_name.to_string()))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<FacetRow> = result.take(0).map_err(DbError::from)?;
        let facets = rows
            .into_iter()
            .map(FacetRow::into_facet)
            .collect::<Result<Vec<_>, DbError>>()?;

        Ok(facets)
    }

    async fn delete_by_dataset(&self, dataset_name: &str) -> ConfigResult<()> {
        self.db
            .query("DELETE facet WHERE dataset_name = $dataset_name")
            .bind(("dataset_name", dataset_name.to_string()))
            .await
            .map_err(DbError::from)?;

        Ok(())
    }
}
