//! Facet domain model.
//!
//! A facet declares one filterable field exposed to browser users for a
//! dataset. The politieke-tijdschriften seed currently defines none,
//! but the collection and its schema are part of the configuration
//! contract.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Widget flavor of a facet in the browser UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FacetType {
    Text,
    Tree,
    Range,
}

impl FacetType {
    pub fn as_str(&self) -> &'static str {
        match self {
            FacetType::Text => "text",
            FacetType::Tree => "tree",
            FacetType::Range => "range",
        }
    }
}

impl std::str::FromStr for FacetType {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "text" => Ok(FacetType::Text),
            "tree" => Ok(FacetType::Tree),
            "range" => Ok(FacetType::Range),
            other => Err(ConfigError::Validation {
                message: format!("unknown facet type '{other}'"),
            }),
        }
    }
}

/// A filterable field for one dataset. Natural key: (dataset_name, name).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Facet {
    pub dataset_name: String,
    /// Facet name shown in the browser, unique within the dataset.
    pub name: String,
    /// Indexed property the facet filters on.
    pub property: String,
    pub facet_type: FacetType,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Desired state for a facet upsert.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FacetSpec {
    pub dataset_name: String,
    pub name: String,
    pub property: String,
    pub facet_type: FacetType,
}

impl Facet {
    /// Whether the stored record already matches the desired state.
    pub fn matches(&self, spec: &FacetSpec) -> bool {
        self.dataset_name == spec.dataset_name
            && self.name == spec.name
            && self.property == spec.property
            && self.facet_type == spec.facet_type
    }
}
