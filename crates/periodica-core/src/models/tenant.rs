//! Tenant domain model.
//!
//! A tenant is one logical browser deployment, identified by a unique
//! domain. All datasets and their display configuration are scoped to a
//! tenant.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A configured browser deployment.
///
/// The `name` is the natural key; `domain` is a secondary unique key.
/// Tenants are written only by the configuration seeder, never by the
/// serving system.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tenant {
    /// Unique tenant name (e.g., `politieke-tijdschriften`).
    pub name: String,
    /// Domain the browser deployment is served from. Unique across
    /// tenants; a collision is a configuration conflict.
    pub domain: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Desired state for a tenant upsert.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TenantSpec {
    pub name: String,
    pub domain: String,
}

impl Tenant {
    /// Whether the stored record already matches the desired state.
    pub fn matches(&self, spec: &TenantSpec) -> bool {
        self.name == spec.name && self.domain == spec.domain
    }
}
