//! Dataset domain model.
//!
//! A dataset binds one search index to one tenant's dataset namespace
//! and tells the browser API how to reach the underlying records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// How the browser API resolves records for a dataset.
///
/// Tagged union keyed on the external `data_type` discriminator. The
/// variants make invalid field combinations unrepresentable: only the
/// CMDI flavor carries a record-editor location.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "data_type", content = "data_configuration", rename_all = "lowercase")]
pub enum DataConfiguration {
    /// Records live in the search index itself. The external API
    /// contract still expects an (empty) id-property/base-url pair,
    /// which the persistence layer derives from this variant.
    Elasticsearch,
    /// Records are CMDI files served by an external record editor.
    Cmdi {
        /// Property in the indexed record holding the CMDI record id.
        id_property: String,
        /// Base URL of the record editor.
        base_url: String,
    },
}

impl DataConfiguration {
    /// The `data_type` discriminator as stored in the configuration
    /// collection.
    pub fn data_type(&self) -> &'static str {
        match self {
            DataConfiguration::Elasticsearch => "elasticsearch",
            DataConfiguration::Cmdi { .. } => "cmdi",
        }
    }

    /// The id property as stored; empty for the elasticsearch flavor
    /// per the external API contract.
    pub fn id_property(&self) -> &str {
        match self {
            DataConfiguration::Elasticsearch => "",
            DataConfiguration::Cmdi { id_property, .. } => id_property,
        }
    }

    /// The base URL as stored; empty for the elasticsearch flavor.
    pub fn base_url(&self) -> &str {
        match self {
            DataConfiguration::Elasticsearch => "",
            DataConfiguration::Cmdi { base_url, .. } => base_url,
        }
    }
}

/// A named collection of indexed records within a tenant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dataset {
    /// The tenant this dataset belongs to.
    pub tenant_name: String,
    /// Dataset name, unique within the tenant.
    pub name: String,
    /// Name of the search index backing this dataset.
    pub es_index: String,
    #[serde(flatten)]
    pub data_configuration: DataConfiguration,
    /// Property of a result record used to address its detail view.
    pub detail_id: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Desired state for a dataset upsert.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatasetSpec {
    pub tenant_name: String,
    pub name: String,
    pub es_index: String,
    #[serde(flatten)]
    pub data_configuration: DataConfiguration,
    pub detail_id: String,
}

impl Dataset {
    /// Whether the stored record already matches the desired state.
    pub fn matches(&self, spec: &DatasetSpec) -> bool {
        self.tenant_name == spec.tenant_name
            && self.name == spec.name
            && self.es_index == spec.es_index
            && self.data_configuration == spec.data_configuration
            && self.detail_id == spec.detail_id
    }
}
