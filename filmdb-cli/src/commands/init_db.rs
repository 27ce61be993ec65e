//! Schema bootstrap command

use anyhow::{Context, Result};
use clap::Parser;

use filmdb_server::db::schema;

/// Arguments for the init-db command
#[derive(Parser, Debug)]
pub struct InitDbArgs {
    /// Database URL (overrides DB_HOST, DB_PORT, ...)
    #[arg(long, env = "DATABASE_URL")]
    pub database_url: Option<String>,

    /// Print the schema instead of applying it
    #[arg(long)]
    pub print: bool,
}

/// Create any missing tables
pub async fn run_init_db(args: InitDbArgs) -> Result<()> {
    if args.print {
        println!("{}", schema::SCHEMA_SQL);
        return Ok(());
    }

    let pool = super::connect(args.database_url, Some(1)).await?;
    schema::install(&pool)
        .await
        .context("Failed to install schema")?;

    Ok(())
}
