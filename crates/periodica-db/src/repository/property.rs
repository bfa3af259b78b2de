//! SurrealDB implementation of [`DisplayPropertyRepository`].
//!
//! One implementation serves both the `result_property` and
//! `detail_property` collections; the two differ only in table name.

use chrono::{DateTime, Utc};
use periodica_core::error::ConfigResult;
use periodica_core::models::property::{DisplayProperty, DisplayPropertySpec, validate_orders};
use periodica_core::repository::DisplayPropertyRepository;
use surrealdb::{Connection, Surreal};
use surrealdb_types::SurrealValue;

use crate::error::DbError;

const PROPERTY_FIELDS: &str = "dataset_name, name, path, property_type, \
    display_order, created_at";

/// DB-side row struct for display-property records. The display order
/// is stored as `display_order` (`order` is reserved in SurrealQL).
#[derive(Debug, SurrealValue)]
struct PropertyRow {
    dataset_name: String,
    name: String,
    path: String,
    property_type: String,
    display_order: u32,
    created_at: DateTime<Utc>,
}

impl PropertyRow {
    fn into_property(self) -> DisplayProperty {
        DisplayProperty {
            dataset_name: self.dataset_name,
            name: self.name,
            path: self.path,
            property_type: self.property_type,
            order: self.display_order,
            created_at: self.created_at,
        }
    }
}

/// SurrealDB implementation of a display-property repository, bound to
/// either the result-list or detail-view collection.
#[derive(Clone)]
pub struct SurrealDisplayPropertyRepository<C: Connection> {
    db: Surreal<C>,
    table: &'static str,
}

impl<C: Connection> SurrealDisplayPropertyRepository<C> {
    /// Repository over the result-list columns.
    pub fn result_properties(db: Surreal<C>) -> Self {
        Self {
            db,
            table: "result_property",
        }
    }

    /// Repository over the detail-view fields.
    pub fn detail_properties(db: Surreal<C>) -> Self {
        Self {
            db,
            table: "detail_property",
        }
    }

    pub fn table(&self) -> &'static str {
        self.table
    }

    async fn fetch_set(&self, dataset_name: &str) -> Result<Vec<DisplayProperty>, DbError> {
        let mut result = self
            .db
            .query(format!(
                "SELECT {PROPERTY_FIELDS} FROM type::table($tb) \
                 WHERE dataset_name = $dataset_name \
                 ORDER BY display_order ASC"
            ))
            .bind(("tb", self.table.to_string()))
            .bind(("dataset_name", dataset_name.to_string()))
            .await?;

        let rows: Vec<PropertyRow> = result.take(0)?;
        Ok(rows.into_iter().map(PropertyRow::into_property).collect())
    }

    /// Whether the stored set already equals the desired set (both in
    /// display order).
    fn set_matches(
        dataset_name: &str,
        stored: &[DisplayProperty],
        desired: &[DisplayPropertySpec],
    ) -> bool {
        stored.len() == desired.len()
            && stored
                .iter()
                .zip(desired)
                .all(|(have, want)| have.matches(dataset_name, want))
    }
}

impl<C: Connection> DisplayPropertyRepository for SurrealDisplayPropertyRepository<C> {
    async fn replace_for_dataset(
        &self,
        dataset_name: &str,
        specs: Vec<DisplayPropertySpec>,
    ) -> ConfigResult<Vec<DisplayProperty>> {
        validate_orders(dataset_name, &specs)?;

        let mut desired = specs;
        desired.sort_by_key(|s| s.order);

        let stored = self.fetch_set(dataset_name).await?;
        if Self::set_matches(dataset_name, &stored, &desired) {
            // Identical desired state: skip the rewrite entirely.
            return Ok(stored);
        }

        // Delete-then-reinsert the whole set in one transaction so a
        // failed rerun never leaves a partial property list behind.
        let mut query = String::from(
            "BEGIN TRANSACTION; \
             DELETE type::table($tb) WHERE dataset_name = $dataset_name;",
        );
        for i in 0..desired.len() {
            query.push_str(&format!(
                " CREATE type::table($tb) SET \
                 dataset_name = $dataset_name, name = $name_{i}, \
                 path = $path_{i}, property_type = $property_type_{i}, \
                 display_order = $display_order_{i};"
            ));
        }
        query.push_str(" COMMIT TRANSACTION;");

        let mut builder = self
            .db
            .query(query)
            .bind(("tb", self.table.to_string()))
            .bind(("dataset_name", dataset_name.to_string()));
        for (i, spec) in desired.iter().enumerate() {
            builder = builder
                .bind((format!("name_{i}"), spec.name.clone()))
                .bind((format!("path_{i}"), spec.path.clone()))
                .bind((format!("property_type_{i}"), spec.property_type.clone()))
                .bind((format!("display_order_{i}"), spec.order));
        }

        builder
            .await
            .map_err(DbError::from)?
            .check()
            .map_err(DbError::from)?;

        let stored = self.fetch_set(dataset_name).await?;
        Ok(stored)
    }

    async fn list_by_dataset(&self, dataset_name: &str) -> ConfigResult<Vec<DisplayProperty>> {
        let properties = self.fetch_set(dataset_name).await?;
        Ok(properties)
    }
}
