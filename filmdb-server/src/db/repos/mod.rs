//! Repository traits and their Postgres implementations
//!
//! Each repository follows these patterns:
//! - One statement per call, parameters always bound
//! - Reads return `Option` for "no such row"; writes return affected rows
//! - Store faults propagate unchanged as [`DbError`]

pub mod films;
pub mod people;

use async_trait::async_trait;
use sqlx::PgPool;

use crate::models::{Film, FilmFields, FilmQuery, Person, PersonFields};

pub use films::FilmRepo;
pub use people::PersonRepo;

/// Database error type
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),

    /// Raised by the in-memory store where Postgres would raise a
    /// foreign key violation.
    #[error("insert or update on table \"{table}\" violates foreign key constraint: {detail}")]
    ForeignKey { table: &'static str, detail: String },
}

/// Actor or director table access
#[async_trait]
pub trait PersonRepository: Send + Sync {
    async fn create(&self, fields: PersonFields) -> Result<Person, DbError>;

    async fn get_by_id(&self, id: i32) -> Result<Option<Person>, DbError>;

    /// Up to `limit` rows in whatever order the store returns them.
    async fn list(&self, limit: u32) -> Result<Vec<Person>, DbError>;

    /// Full-row update. Returns affected rows: 0 when `id` does not exist.
    async fn update(&self, id: i32, fields: PersonFields) -> Result<u64, DbError>;

    /// Returns affected rows: 0 when `id` does not exist.
    async fn delete(&self, id: i32) -> Result<u64, DbError>;
}

/// Film table and link table access
#[async_trait]
pub trait FilmRepository: Send + Sync {
    async fn create(&self, fields: FilmFields) -> Result<Film, DbError>;

    async fn get_by_id(&self, id: i32) -> Result<Option<Film>, DbError>;

    /// Films passing `query.filter`, each at most once, capped at `query.limit`.
    async fn list(&self, query: &FilmQuery) -> Result<Vec<Film>, DbError>;

    async fn update(&self, id: i32, fields: FilmFields) -> Result<u64, DbError>;

    async fn delete(&self, id: i32) -> Result<u64, DbError>;

    /// Insert one `film_actors` row. Duplicates are allowed.
    async fn link_actor(&self, film_id: i32, actor_id: i32) -> Result<(), DbError>;

    /// Insert one `film_directors` row. Duplicates are allowed.
    async fn link_director(&self, film_id: i32, director_id: i32) -> Result<(), DbError>;
}

/// Store liveness probe for the health endpoint
#[async_trait]
pub trait StoreHealth: Send + Sync {
    async fn ping(&self) -> Result<(), DbError>;
}

#[async_trait]
impl StoreHealth for PgPool {
    /// Check out a connection, run a trivial query, hand it back.
    async fn ping(&self) -> Result<(), DbError> {
        let mut conn = self.acquire().await?;
        sqlx::query("SELECT 1").execute(&mut *conn).await?;
        // conn returns to the pool on drop, on the error path too
        Ok(())
    }
}
