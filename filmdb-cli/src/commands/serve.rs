//! HTTP server command
//!
//! Opens the pool (or an in-memory store with `--memory`) and runs the
//! filmdb API until Ctrl+C / SIGTERM.

use std::net::SocketAddr;

use anyhow::{Context, Result};
use clap::Parser;

use filmdb_server::{run_server, AppState, ServerConfig};

/// Arguments for the serve command
#[derive(Parser, Debug)]
pub struct ServeArgs {
    /// Address to bind to
    #[arg(long, short = 'b', default_value = "127.0.0.1:3000")]
    pub bind: SocketAddr,

    /// Allow permissive CORS (all origins) - use with caution
    #[arg(long)]
    pub cors_permissive: bool,

    /// Database URL (overrides DB_HOST, DB_PORT, ...)
    #[arg(long, env = "DATABASE_URL")]
    pub database_url: Option<String>,

    /// Maximum pool connections (default: DB_MAX_CONNECTIONS or 5)
    #[arg(long)]
    pub max_connections: Option<u32>,

    /// Serve from an in-memory store instead of Postgres
    #[arg(long, conflicts_with_all = ["database_url", "max_connections"])]
    pub memory: bool,
}

/// Run the HTTP server
pub async fn run_serve(args: ServeArgs) -> Result<()> {
    let state = if args.memory {
        tracing::warn!("Using in-memory store; data is lost on exit");
        AppState::in_memory()
    } else {
        let pool = super::connect(args.database_url, args.max_connections).await?;
        AppState::postgres(pool)
    };

    let config = ServerConfig {
        bind_addr: args.bind,
        cors_permissive: args.cors_permissive,
    };

    run_server(state, config).await.context("Server error")?;

    Ok(())
}
