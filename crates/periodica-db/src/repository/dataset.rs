//! SurrealDB implementation of [`DatasetRepository`].

use chrono::{DateTime, Utc};
use periodica_core::error::ConfigResult;
use periodica_core::models::dataset::{DataConfiguration, Dataset, DatasetSpec};
use periodica_core::repository::DatasetRepository;
use surrealdb::{Connection, Surreal};
use surrealdb_types::SurrealValue;

use crate::error::DbError;

const DATASET_FIELDS: &str = "tenant_name, name, es_index, data_type, \
    id_property, base_url, detail_id, created_at, updated_at";

/// DB-side row struct for dataset records.
///
/// The `data_configuration` variant is flattened into the `data_type`
/// discriminator plus the id-property/base-url pair the external API
/// expects (empty strings for the elasticsearch flavor).
#[derive(Debug, SurrealValue)]
struct DatasetRow {
    tenant_name: String,
    name: String,
    es_index: String,
    data_type: String,
    id_property: String,
    base_url: String,
    detail_id: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl DatasetRow {
    fn into_dataset(self) -> Result<Dataset, DbError> {
        let data_configuration = match self.data_type.as_str() {
            "elasticsearch" => DataConfiguration::Elasticsearch,
            "cmdi" => DataConfiguration::Cmdi {
                id_property: self.id_property,
                base_url: self.base_url,
            },
            other => {
                return Err(DbError::InvalidRecord(format!(
                    "dataset '{}/{}' has unknown data_type '{other}'",
                    self.tenant_name, self.name,
                )));
            }
        };
        Ok(Dataset {
            tenant_name: self.tenant_name,
            name: self.name,
            es_index: self.es_index,
            data_configuration,
            detail_id: self.detail_id,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

/// Record id for a dataset: unique per (tenant, name).
fn dataset_key(tenant_name: &str, name: &str) -> String {
    format!("{tenant_name}/{name}")
}

/// SurrealDB implementation of the dataset repository.
#[derive(Clone)]
pub struct SurrealDatasetRepository<C: Connection> {
    db: Surreal<C>,
}

impl<C: Connection> SurrealDatasetRepository<C> {
    pub fn new(db: Surreal<C>) -> Self {
        Self { db }
    }

    async fn fetch(&self, tenant_name: &str, name: &str) -> Result<Option<Dataset>, DbError> {
        let mut result = self
            .db
            .query(format!(
                "SELECT {DATASET_FIELDS} FROM type::record('dataset', $key)"
            ))
            .bind(("key", dataset_key(tenant_name, name)))
            .await?;

        let rows: Vec<DatasetRow> = result.take(0)?;
        rows.into_iter().next().map(DatasetRow::into_dataset).transpose()
    }

    /// Write the full desired state; `create` decides between CREATE
    /// and UPDATE so created_at is only set once.
    async fn write(&self, spec: &DatasetSpec, create: bool) -> Result<(), DbError> {
        let statement = if create {
            "CREATE type::record('dataset', $key) SET \
             tenant_name = $tenant_name, name = $name, \
             es_index = $es_index, data_type = $data_type, \
             id_property = $id_property, base_url = $base_url, \
             detail_id = $detail_id"
        } else {
            "UPDATE type::record('dataset', $key) SET \
             tenant_name = $tenant_name, name = $name, \
             es_index = $es_index, data_type = $data_type, \
             id_property = $id_property, base_url = $base_url, \
             detail_id = $detail_id, updated_at = time::now()"
        };

        self.db
            .query(statement)
            .bind(("key", dataset_key(&spec.tenant_name, &spec.name)))
            .bind(("tenant_name", spec.tenant_name.clone()))
            .bind(("name", spec.name.clone()))
            .bind(("es_index", spec.es_index.clone()))
            .bind(("data_type", spec.data_configuration.data_type().to_string()))
            .bind(("id_property", spec.data_configuration.id_property().to_string()))
            .bind(("base_url", spec.data_configuration.base_url().to_string()))
            .bind(("detail_id", spec.detail_id.clone()))
            .await?
            .check()?;

        Ok(())
    }
}

impl<C: Connection> DatasetRepository for SurrealDatasetRepository<C> {
    async fn upsert(&self, spec: DatasetSpec) -> ConfigResult<Dataset> {
        match self
            .fetch(&spec.tenant_name, &spec.name)
            .await?
        {
            // Identical desired state: leave the record untouched.
            Some(existing) if existing.matches(&spec) => return Ok(existing),
            Some(_) => self.write(&spec, false).await?,
            None => self.write(&spec, true).await?,
        }

        let stored = self
            .fetch(&spec.tenant_name, &spec.name)
            .await?
            .ok_or_else(|| DbError::NotFound {
                entity: "dataset".into(),
                key: dataset_key(&spec.tenant_name, &spec.name),
            })?;

        Ok(stored)
    }

    async fn get(&self, tenant_name: &str, name: &str) -> ConfigResult<Dataset> {
        let dataset = self
            .fetch(tenant_name, name)
            .await?
            .ok_or_else(|| DbError::NotFound {
                entity: "dataset".into(),
                key: dataset_key(tenant_name, name),
            })?;

        Ok(dataset)
    }

    async fn list_by_tenant(&self, tenant_name: &str) -> ConfigResult<Vec<Dataset>> {
        let mut result = self
            .db
            .query(format!(
                "SELECT {DATASET_FIELDS} FROM dataset \
                 WHERE tenant_name = $tenant_name ORDER BY name ASC"
            ))
            .bind(("tenant_name", tenant_name.to_string()))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<DatasetRow> = result.take(0).map_err(DbError::from)?;
        let datasets = rows
            .into_iter()
            .map(DatasetRow::into_dataset)
            .collect::<Result<Vec<_>, DbError>>()?;

        Ok(datasets)
    }

    async fn delete(&self, tenant_name: &str, name: &str) -> ConfigResult<()> {
        self.db
            .query("DELETE type::record('dataset', $key)")
            .bind(("key", dataset_key(tenant_name, name)))
            .await
            .map_err(DbError::from)?;

        Ok(())
    }
}
