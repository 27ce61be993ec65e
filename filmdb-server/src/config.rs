//! Database configuration - environment loading
//!
//! Configuration is loaded from environment variables:
//! - `DATABASE_URL`: full connection string, wins when set
//! - `DB_HOST`, `DB_PORT`, `DB_USER`, `DB_PASSWORD`, `DB_DATABASE`: used
//!   piecewise when there is no URL; unset parts fall back to libpq
//!   defaults (`PGHOST`, `PGUSER`, ...)
//! - `DB_MAX_CONNECTIONS`: pool size (default 5)

use std::env;

use sqlx::postgres::PgConnectOptions;

use crate::db::pool::DEFAULT_MAX_CONNECTIONS;

/// Configuration error type
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid database URL: {0}")]
    InvalidUrl(#[source] sqlx::Error),

    #[error("invalid {var}: '{value}' is not a number")]
    NotANumber { var: &'static str, value: String },
}

/// Connection parts taken one variable at a time
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DbEnv {
    pub host: Option<String>,
    pub port: Option<String>,
    pub user: Option<String>,
    pub password: Option<String>,
    pub database: Option<String>,
}

impl DbEnv {
    pub fn from_env() -> Self {
        Self {
            host: env::var("DB_HOST").ok(),
            port: env::var("DB_PORT").ok(),
            user: env::var("DB_USER").ok(),
            password: env::var("DB_PASSWORD").ok(),
            database: env::var("DB_DATABASE").ok(),
        }
    }

    /// Layer the parts that are set over `base`.
    pub fn apply(&self, base: PgConnectOptions) -> Result<PgConnectOptions, ConfigError> {
        let mut options = base;
        if let Some(host) = &self.host {
            options = options.host(host);
        }
        if let Some(port) = &self.port {
            let port = port.parse().map_err(|_| ConfigError::NotANumber {
                var: "DB_PORT",
                value: port.clone(),
            })?;
            options = options.port(port);
        }
        if let Some(user) = &self.user {
            options = options.username(user);
        }
        if let Some(password) = &self.password {
            options = options.password(password);
        }
        if let Some(database) = &self.database {
            options = options.database(database);
        }
        Ok(options)
    }
}

/// Everything needed to open the pool
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    /// Full connection string; when absent `parts` is used
    pub url: Option<String>,
    pub parts: DbEnv,
    pub max_connections: u32,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: None,
            parts: DbEnv::default(),
            max_connections: DEFAULT_MAX_CONNECTIONS,
        }
    }
}

impl DatabaseConfig {
    /// Create config from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        let max_connections = match env::var("DB_MAX_CONNECTIONS") {
            Ok(value) => value.parse().map_err(|_| ConfigError::NotANumber {
                var: "DB_MAX_CONNECTIONS",
                value,
            })?,
            Err(_) => DEFAULT_MAX_CONNECTIONS,
        };

        Ok(Self {
            url: env::var("DATABASE_URL").ok(),
            parts: DbEnv::from_env(),
            max_connections,
        })
    }

    /// Resolve to sqlx connect options.
    pub fn connect_options(&self) -> Result<PgConnectOptions, ConfigError> {
        match &self.url {
            Some(url) => url.parse().map_err(ConfigError::InvalidUrl),
            None => self.parts.apply(PgConnectOptions::new()),
        }
    }
}
