//! Connection handling for the configuration store.

use surrealdb::Surreal;
use surrealdb::engine::remote::ws::{Client, Ws};
use surrealdb::opt::auth::Root;
use tracing::info;

use crate::error::DbError;

/// Connection settings for the configuration store, normally filled in
/// from the seeder's command line.
#[derive(Debug, Clone)]
pub struct DbConfig {
    /// Store address as `host:port`; a `ws://` prefix is tolerated so
    /// the same value works whether it came from a flag or a full URL
    /// in an environment variable.
    pub url: String,
    /// Namespace holding the browser configuration.
    pub namespace: String,
    /// Database within the namespace.
    pub database: String,
    /// Root username.
    pub username: String,
    /// Root password.
    pub password: String,
}

impl DbConfig {
    /// The endpoint in the `host:port` form the WebSocket engine
    /// expects, with any `ws://` scheme stripped.
    pub fn endpoint(&self) -> &str {
        self.url.strip_prefix("ws://").unwrap_or(&self.url)
    }
}

/// Holds the live connection the repositories run their queries on.
#[derive(Clone)]
pub struct DbManager {
    db: Surreal<Client>,
}

impl DbManager {
    /// Open a connection to the configuration store.
    ///
    /// Signs in as root and selects the configured namespace and
    /// database. Any failure along the way is reported as a single
    /// [`DbError::Connection`] naming the endpoint, since to the seeder
    /// they all mean the same thing: the store is not usable.
    pub async fn connect(config: &DbConfig) -> Result<Self, DbError> {
        let endpoint = config.endpoint();
        info!(
            endpoint,
            namespace = %config.namespace,
            database = %config.database,
            "Connecting to configuration store"
        );

        let unreachable = |source: surrealdb::Error| DbError::Connection {
            url: endpoint.to_string(),
            source,
        };

        let db = Surreal::new::<Ws>(endpoint).await.map_err(unreachable)?;

        db.signin(Root {
            username: config.username.clone(),
            password: config.password.clone(),
        })
        .await
        .map_err(unreachable)?;

        db.use_ns(&config.namespace)
            .use_db(&config.database)
            .await
            .map_err(unreachable)?;

        info!("Configuration store ready");

        Ok(Self { db })
    }

    /// The client the repositories are constructed over.
    pub fn client(&self) -> &Surreal<Client> {
        &self.db
    }
}
