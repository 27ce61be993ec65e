//! Table definitions
//!
//! `schema.sql` is idempotent (`CREATE TABLE IF NOT EXISTS`); applying it
//! to a database that already has the tables is a no-op. There is no
//! versioning: changing a table means changing it by hand.

use sqlx::PgPool;

use super::repos::DbError;

/// The full schema, one statement per `;`
pub const SCHEMA_SQL: &str = include_str!("../../schema.sql");

/// Statements in [`SCHEMA_SQL`], comments and blanks removed.
pub fn statements() -> impl Iterator<Item = String> {
    SCHEMA_SQL.split(';').filter_map(|chunk| {
        let statement = chunk
            .lines()
            .filter(|line| !line.trim_start().starts_with("--"))
            .collect::<Vec<_>>()
            .join("\n");
        let statement = statement.trim();
        (!statement.is_empty()).then(|| statement.to_owned())
    })
}

/// Create any missing tables.
pub async fn install(pool: &PgPool) -> Result<(), DbError> {
    tracing::info!("Installing filmdb schema...");

    for statement in statements() {
        sqlx::query(&statement).execute(pool).await?;
    }

    tracing::info!("Schema ready");
    Ok(())
}
