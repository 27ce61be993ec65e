//! Film repository
//!
//! Handles film CRUD plus the two link tables:
//! - list: one `EXISTS` predicate per active filter, so a film matching
//!   several ids still comes back once and no `DISTINCT` is needed
//! - link: single INSERT, the foreign keys do the existence check

use async_trait::async_trait;
use sqlx::{PgPool, Postgres, QueryBuilder};

use super::{DbError, FilmRepository};
use crate::models::{Film, FilmFields, FilmFilter, FilmQuery};

const SELECT_FILMS: &str = "SELECT f.id, f.name, f.description, f.release_date FROM films f";

/// A many-to-many table hanging off `films`
#[derive(Debug, Clone, Copy)]
struct LinkTable {
    table: &'static str,
    column: &'static str,
}

const FILM_ACTORS: LinkTable = LinkTable {
    table: "film_actors",
    column: "actor_id",
};

const FILM_DIRECTORS: LinkTable = LinkTable {
    table: "film_directors",
    column: "director_id",
};

/// Build the `list` statement for a query.
///
/// The id lists are bound as Postgres arrays (`= ANY($n)`), so the
/// statement text only depends on which filter variant is active.
pub(crate) fn list_query(query: &FilmQuery) -> QueryBuilder<'static, Postgres> {
    let mut qb = QueryBuilder::new(SELECT_FILMS);

    match &query.filter {
        FilmFilter::Unfiltered => {}
        FilmFilter::Actors(actors) => {
            qb.push(" WHERE ");
            push_link_exists(&mut qb, FILM_ACTORS, actors);
        }
        FilmFilter::Directors(directors) => {
            qb.push(" WHERE ");
            push_link_exists(&mut qb, FILM_DIRECTORS, directors);
        }
        FilmFilter::ActorsAndDirectors { actors, directors } => {
            qb.push(" WHERE ");
            push_link_exists(&mut qb, FILM_ACTORS, actors);
            qb.push(" AND ");
            push_link_exists(&mut qb, FILM_DIRECTORS, directors);
        }
    }

    qb.push(" LIMIT ").push_bind(i64::from(query.limit));
    qb
}

fn push_link_exists(qb: &mut QueryBuilder<'static, Postgres>, link: LinkTable, ids: &[i32]) {
    qb.push(format!(
        "EXISTS (SELECT 1 FROM {} l WHERE l.film_id = f.id AND l.{} = ANY(",
        link.table, link.column
    ))
    .push_bind(ids.to_vec())
    .push("))");
}

/// Film repository
#[derive(Debug, Clone)]
pub struct FilmRepo {
    pool: PgPool,
}

impl FilmRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn link(&self, link: LinkTable, film_id: i32, other_id: i32) -> Result<(), DbError> {
        let sql = format!(
            "INSERT INTO {} (film_id, {}) VALUES ($1, $2)",
            link.table, link.column
        );

        sqlx::query(&sql)
            .bind(film_id)
            .bind(other_id)
            .execute(&self.pool)
            .await?;

        tracing::debug!(table = link.table, film_id, other_id, "linked");
        Ok(())
    }
}

#[async_trait]
impl FilmRepository for FilmRepo {
    async fn create(&self, fields: FilmFields) -> Result<Film, DbError> {
        let film: Film = sqlx::query_as(
            r#"
            INSERT INTO films (name, description, release_date)
            VALUES ($1, $2, $3)
            RETURNING id, name, description, release_date
            "#,
        )
        .bind(&fields.name)
        .bind(&fields.description)
        .bind(fields.release_date)
        .fetch_one(&self.pool)
        .await?;

        tracing::debug!(id = film.id, "inserted film");
        Ok(film)
    }

    async fn get_by_id(&self, id: i32) -> Result<Option<Film>, DbError> {
        let film = sqlx::query_as(
            r#"
            SELECT id, name, description, release_date
            FROM films
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(film)
    }

    async fn list(&self, query: &FilmQuery) -> Result<Vec<Film>, DbError> {
        let mut qb = list_query(query);
        tracing::debug!(sql = qb.sql(), limit = query.limit, "listing films");

        let films = qb.build_query_as::<Film>().fetch_all(&self.pool).await?;
        Ok(films)
    }

    async fn update(&self, id: i32, fields: FilmFields) -> Result<u64, DbError> {
        let result = sqlx::query(
            r#"
            UPDATE films
            SET name = $1, description = $2, release_date = $3
            WHERE id = $4
            "#,
        )
        .bind(&fields.name)
        .bind(&fields.description)
        .bind(fields.release_date)
        .bind(id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected())
    }

    async fn delete(&self, id: i32) -> Result<u64, DbError> {
        // film_actors / film_directors rows go with it (ON DELETE CASCADE)
        let result = sqlx::query("DELETE FROM films WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }

    async fn link_actor(&self, film_id: i32, actor_id: i32) -> Result<(), DbError> {
        self.link(FILM_ACTORS, film_id, actor_id).await
    }

    async fn link_director(&self, film_id: i32, director_id: i32) -> Result<(), DbError> {
        self.link(FILM_DIRECTORS, film_id, director_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sql_for(actors: Vec<i32>, directors: Vec<i32>) -> String {
        list_query(&FilmQuery::new(20, actors, directors)).sql().to_owned()
    }

    #[test]
    fn unfiltered_only_limits() {
        assert_eq!(
            sql_for(vec![], vec![]),
            "SELECT f.id, f.name, f.description, f.release_date FROM films f LIMIT $1"
        );
    }

    #[test]
    fn actor_filter_uses_exists() {
        let sql = sql_for(vec![1, 2], vec![]);
        assert!(sql.contains(
            "WHERE EXISTS (SELECT 1 FROM film_actors l WHERE l.film_id = f.id AND l.actor_id = ANY($1))"
        ));
        assert!(!sql.contains("film_directors"));
        assert!(sql.ends_with("LIMIT $2"));
    }

    #[test]
    fn director_filter_uses_exists() {
        let sql = sql_for(vec![], vec![3]);
        assert!(sql.contains(
            "WHERE EXISTS (SELECT 1 FROM film_directors l WHERE l.film_id = f.id AND l.director_id = ANY($1))"
        ));
        assert!(!sql.contains("film_actors"));
        assert!(sql.ends_with("LIMIT $2"));
    }

    #[test]
    fn both_filters_are_anded() {
        let sql = sql_for(vec![1], vec![3]);
        assert_eq!(sql.matches("EXISTS").count(), 2);
        assert!(sql.contains("ANY($1)) AND EXISTS (SELECT 1 FROM film_directors"));
        assert!(sql.ends_with("LIMIT $3"));
    }

    #[test]
    fn never_joins() {
        for sql in [
            sql_for(vec![], vec![]),
            sql_for(vec![1], vec![]),
            sql_for(vec![], vec![1]),
            sql_for(vec![1], vec![1]),
        ] {
            assert!(!sql.contains("JOIN"));
        }
    }
}
