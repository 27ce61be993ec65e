//! Command implementations for the filmdb CLI

pub mod init_db;
pub mod serve;

use anyhow::{Context, Result};
use filmdb_server::db::{create_pool_with_options, PgPool};
use filmdb_server::DatabaseConfig;

pub use init_db::run_init_db;
pub use serve::run_serve;

/// Database settings from the environment, with command line overrides on top.
fn database_config(database_url: Option<String>, max_connections: Option<u32>) -> Result<DatabaseConfig> {
    let mut config = DatabaseConfig::from_env().context("Invalid database configuration")?;
    if let Some(url) = database_url {
        config.url = Some(url);
    }
    if let Some(max) = max_connections {
        config.max_connections = max;
    }
    Ok(config)
}

/// Open the pool for a command.
async fn connect(database_url: Option<String>, max_connections: Option<u32>) -> Result<PgPool> {
    let config = database_config(database_url, max_connections)?;
    let options = config.connect_options()?;

    tracing::info!(
        host = options.get_host(),
        database = options.get_database().unwrap_or("-"),
        max_connections = config.max_connections,
        "Connecting to Postgres"
    );

    create_pool_with_options(options, config.max_connections)
        .await
        .context("Failed to create database pool")
}
