//! filmdb-server: REST API over actors, directors and films
//!
//! Three CRUD resources backed by Postgres, plus the two link tables that
//! say which actors played in and which directors made a film.
//! `GET /films` can be filtered by actor and director ids.

pub mod config;
pub mod db;
pub mod http;
pub mod models;

pub use config::{ConfigError, DatabaseConfig};
pub use db::{DbError, MemoryStore};
pub use http::{build_router, run_server, ApiError, AppState, ServerConfig, ServerError};
