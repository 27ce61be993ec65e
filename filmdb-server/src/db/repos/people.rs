//! Actor and director repository
//!
//! The two tables share a shape, so one repository serves both. The table
//! name comes from [`PersonTable`], a closed set of static identifiers;
//! every value is still bound as a parameter.

use async_trait::async_trait;
use sqlx::PgPool;

use super::{DbError, PersonRepository};
use crate::models::{Person, PersonFields, PersonTable};

const COLUMNS: &str = "id, name, given_name, birth_date";

/// Person repository
#[derive(Debug, Clone)]
pub struct PersonRepo {
    pool: PgPool,
    table: PersonTable,
}

impl PersonRepo {
    pub fn new(pool: PgPool, table: PersonTable) -> Self {
        Self { pool, table }
    }

    pub fn actors(pool: PgPool) -> Self {
        Self::new(pool, PersonTable::Actors)
    }

    pub fn directors(pool: PgPool) -> Self {
        Self::new(pool, PersonTable::Directors)
    }

    pub fn table(&self) -> PersonTable {
        self.table
    }
}

#[async_trait]
impl PersonRepository for PersonRepo {
    async fn create(&self, fields: PersonFields) -> Result<Person, DbError> {
        let sql = format!(
            "INSERT INTO {} (name, given_name, birth_date) VALUES ($1, $2, $3) RETURNING {COLUMNS}",
            self.table
        );

        let person: Person = sqlx::query_as(&sql)
            .bind(&fields.name)
            .bind(&fields.given_name)
            .bind(fields.birth_date)
            .fetch_one(&self.pool)
            .await?;

        tracing::debug!(table = %self.table, id = person.id, "inserted row");
        Ok(person)
    }

    async fn get_by_id(&self, id: i32) -> Result<Option<Person>, DbError> {
        let sql = format!("SELECT {COLUMNS} FROM {} WHERE id = $1", self.table);

        let person = sqlx::query_as(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(person)
    }

    async fn list(&self, limit: u32) -> Result<Vec<Person>, DbError> {
        let sql = format!("SELECT {COLUMNS} FROM {} LIMIT $1", self.table);

        let people = sqlx::query_as(&sql)
            .bind(i64::from(limit))
            .fetch_all(&self.pool)
            .await?;

        Ok(people)
    }

    async fn update(&self, id: i32, fields: PersonFields) -> Result<u64, DbError> {
        let sql = format!(
            "UPDATE {} SET name = $1, given_name = $2, birth_date = $3 WHERE id = $4",
            self.table
        );

        let result = sqlx::query(&sql)
            .bind(&fields.name)
            .bind(&fields.given_name)
            .bind(fields.birth_date)
            .bind(id)
            .execute(&self.pool)
            .await?;

        tracing::debug!(table = %self.table, id, affected = result.rows_affected(), "updated row");
        Ok(result.rows_affected())
    }

    async fn delete(&self, id: i32) -> Result<u64, DbError> {
        let sql = format!("DELETE FROM {} WHERE id = $1", self.table);

        let result = sqlx::query(&sql).bind(id).execute(&self.pool).await?;

        tracing::debug!(table = %self.table, id, affected = result.rows_affected(), "deleted row");
        Ok(result.rows_affected())
    }
}
