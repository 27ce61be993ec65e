//! Database connection pool management
//!
//! Uses sqlx PgPool with explicit connection limits.

use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use sqlx::PgPool;

/// Default maximum connections for the pool.
pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;

/// Create a PostgreSQL connection pool from a connection string.
///
/// # Errors
///
/// Returns an error if the URL is malformed or the first connection fails.
///
/// # Example
///
/// ```ignore
/// let pool = create_pool("postgres://localhost/filmdb").await?;
/// ```
pub async fn create_pool(database_url: &str) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(DEFAULT_MAX_CONNECTIONS)
        .connect(database_url)
        .await
}

/// Create a PostgreSQL connection pool from parsed options.
///
/// # Arguments
///
/// * `options` - connection options, see [`crate::config::DatabaseConfig`]
/// * `max_connections` - upper bound on open connections; excess requests
///   wait for a connection to come back
pub async fn create_pool_with_options(
    options: PgConnectOptions,
    max_connections: u32,
) -> Result<PgPool, sqlx::Error> {
    tracing::debug!(max_connections, "opening connection pool");

    PgPoolOptions::new()
        .max_connections(max_connections)
        .connect_with(options)
        .await
}
