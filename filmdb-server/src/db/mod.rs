//! Database layer - connection pool, repositories and the in-memory store
//!
//! # Design Principles
//!
//! - The pool is built once and handed to whoever needs it, never global
//! - One statement per operation, no transactions
//! - Rely on DB constraints (foreign keys, cascades), no check-then-insert
//! - Handlers depend on the repository traits, so the in-memory store can
//!   stand in for Postgres

pub mod memory;
pub mod pool;
pub mod repos;
pub mod schema;

pub use memory::MemoryStore;
pub use pool::{create_pool, create_pool_with_options};
pub use sqlx::PgPool;
pub use repos::*;
