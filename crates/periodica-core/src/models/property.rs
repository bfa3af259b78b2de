//! Display property domain models.
//!
//! Result properties control the columns of the result list; detail
//! properties control the fields of the detail view. Both share the
//! same shape and are replaced wholesale per dataset by the seeder.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, ConfigResult};

/// One field shown in a result list or detail view.
///
/// `order` defines display position and is unique within a dataset's
/// property set; uniqueness is the only requirement, gaps are fine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayProperty {
    pub dataset_name: String,
    /// Label shown in the browser.
    pub name: String,
    /// Query expression into a source record (e.g., `$.Titel`).
    pub path: String,
    /// Rendering type understood by the browser (e.g., `text`).
    pub property_type: String,
    pub order: u32,
    pub created_at: DateTime<Utc>,
}

/// Desired state for one property within a replacement set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayPropertySpec {
    pub name: String,
    pub path: String,
    pub property_type: String,
    pub order: u32,
}

impl DisplayPropertySpec {
    pub fn new(name: &str, path: &str, property_type: &str, order: u32) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            property_type: property_type.into(),
            order,
        }
    }
}

impl DisplayProperty {
    /// Whether the stored record already matches the desired state for
    /// the given dataset.
    pub fn matches(&self, dataset_name: &str, spec: &DisplayPropertySpec) -> bool {
        self.dataset_name == dataset_name
            && self.name == spec.name
            && self.path == spec.path
            && self.property_type == spec.property_type
            && self.order == spec.order
    }
}

/// Reject a replacement set with duplicate `order` values before any
/// write happens.
pub fn validate_orders(dataset_name: &str, specs: &[DisplayPropertySpec]) -> ConfigResult<()> {
    let mut seen = std::collections::HashSet::new();
    for spec in specs {
        if !seen.insert(spec.order) {
            return Err(ConfigError::Validation {
                message: format!(
                    "duplicate display order {} in property set for dataset '{}'",
                    spec.order, dataset_name,
                ),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unique_orders_accepted() {
        let specs = vec![
            DisplayPropertySpec::new("Titel", "$.Titel", "text", 0),
            DisplayPropertySpec::new("Jaar", "$.Jaar", "text", 2),
        ];
        assert!(validate_orders("tijdschriften", &specs).is_ok());
    }

    #[test]
    fn duplicate_orders_rejected() {
        let specs = vec![
            DisplayPropertySpec::new("Titel", "$.Titel", "text", 0),
            DisplayPropertySpec::new("Jaar", "$.Jaar", "text", 0),
        ];
        let err = validate_orders("tijdschriften", &specs).unwrap_err();
        assert!(matches!(err, ConfigError::Validation { .. }));
    }
}
