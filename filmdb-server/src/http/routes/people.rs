//! Actor and director endpoints
//!
//! The two resources behave identically; [`router`] mounts one of them at
//! `/actors` or `/directors` depending on the table it is given.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};

use crate::db::repos::PersonRepository;
use crate::http::error::ApiError;
use crate::models::{LimitParams, Person, PersonFields, PersonTable};

/// Per-resource handler state
#[derive(Clone)]
struct People {
    table: PersonTable,
    repo: Arc<dyn PersonRepository>,
}

/// GET /{people} - up to `limit` rows, store order
async fn list_people(
    State(people): State<People>,
    Query(params): Query<LimitParams>,
) -> Result<Json<Vec<Person>>, ApiError> {
    let rows = people.repo.list(params.limit()).await?;
    Ok(Json(rows))
}

/// GET /{people}/{id}
async fn get_person(
    State(people): State<People>,
    Path(id): Path<i32>,
) -> Result<Json<Person>, ApiError> {
    people
        .repo
        .get_by_id(id)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::not_found(people.table.resource(), id))
}

/// POST /{people}
async fn create_person(
    State(people): State<People>,
    Json(fields): Json<PersonFields>,
) -> Result<(StatusCode, Json<Person>), ApiError> {
    let person = people.repo.create(fields).await?;
    tracing::info!(resource = people.table.resource(), id = person.id, "created");

    Ok((StatusCode::CREATED, Json(person)))
}

/// PUT /{people}/{id} - full-row update, echoes the stored fields
async fn update_person(
    State(people): State<People>,
    Path(id): Path<i32>,
    Json(fields): Json<PersonFields>,
) -> Result<Json<Person>, ApiError> {
    let affected = people.repo.update(id, fields.clone()).await?;
    if affected == 0 {
        return Err(ApiError::not_found(people.table.resource(), id));
    }

    Ok(Json(fields.into_person(id)))
}

/// DELETE /{people}/{id}
async fn delete_person(
    State(people): State<People>,
    Path(id): Path<i32>,
) -> Result<StatusCode, ApiError> {
    let affected = people.repo.delete(id).await?;
    if affected == 0 {
        return Err(ApiError::not_found(people.table.resource(), id));
    }

    tracing::info!(resource = people.table.resource(), id, "deleted");
    Ok(StatusCode::NO_CONTENT)
}

/// Routes for one person table
pub fn router<S>(table: PersonTable, repo: Arc<dyn PersonRepository>) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    let collection = format!("/{table}");
    let item = format!("/{table}/{{id}}");

    Router::new()
        .route(&collection, get(list_people).post(create_person))
        .route(
            &item,
            get(get_person).put(update_person).delete(delete_person),
        )
        .with_state(People { table, repo })
}
