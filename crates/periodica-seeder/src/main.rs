//! Periodica Seeder — command-line entry point.
//!
//! `index` creates the search index and bulk-loads the record export;
//! `config` writes the browser configuration collections. Both run a
//! fixed sequence and abort on the first failure.

mod seed;

use std::fs;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use periodica_db::{DbConfig, DbManager, run_migrations};
use periodica_search::SearchClient;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "periodica-seed")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Create the search index and bulk-load the record export
    Index {
        #[arg(long, env = "PERIODICA_ES_URL", default_value = "http://localhost:9200")]
        base_url: String,
        #[arg(long, default_value = seed::ES_INDEX)]
        index: String,
        /// JSON index-mapping document
        #[arg(long)]
        mapping: PathBuf,
        /// Newline-delimited JSON bulk export
        #[arg(long)]
        bulk: PathBuf,
    },
    /// Write the browser configuration collections
    Config {
        #[arg(long, env = "PERIODICA_DB_URL", default_value = "127.0.0.1:8000")]
        db_url: String,
        #[arg(long, env = "PERIODICA_DB_USER", default_value = "root")]
        db_user: String,
        #[arg(long, env = "PERIODICA_DB_PASS", default_value = "root")]
        db_pass: String,
        #[arg(long, default_value = "periodica")]
        namespace: String,
        #[arg(long, default_value = "browser")]
        database: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("periodica=info".parse()?))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Index {
            base_url,
            index,
            mapping,
            bulk,
        } => {
            let mapping: serde_json::Value = serde_json::from_str(&fs::read_to_string(&mapping)?)?;
            let bulk_body = fs::read_to_string(&bulk)?;

            let client = SearchClient::new(base_url);
            client.create_index(&index, &mapping).await?;
            let summary = client.bulk_load(&index, bulk_body).await?;
            info!(index = %index, items = summary.items, "Index seeding complete");
        }
        Command::Config {
            db_url,
            db_user,
            db_pass,
            namespace,
            database,
        } => {
            let config = DbConfig {
                url: db_url,
                namespace,
                database,
                username: db_user,
                password: db_pass,
            };
            let manager = DbManager::connect(&config).await?;
            run_migrations(manager.client()).await?;

            let plan = seed::politieke_tijdschriften();
            seed::apply(manager.client().clone(), &plan).await?;
            info!("Configuration seeding complete");
        }
    }

    Ok(())
}
