//! Film endpoints, including the actor/director link routes

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};

use crate::db::repos::FilmRepository;
use crate::http::error::ApiError;
use crate::models::{Film, FilmFields, FilmListParams, FilmQuery};

type Films = Arc<dyn FilmRepository>;

/// Link an actor request
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkActorRequest {
    pub actor_id: i32,
}

/// Link a director request
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkDirectorRequest {
    pub director_id: i32,
}

/// Echo of the link row that was inserted
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkResponse {
    pub film_id: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub actor_id: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub director_id: Option<i32>,
}

/// GET /films?actors=1,2&directors=3&limit=N
async fn list_films(
    State(films): State<Films>,
    Query(params): Query<FilmListParams>,
) -> Result<Json<Vec<Film>>, ApiError> {
    let query = FilmQuery::from(params);
    let rows = films.list(&query).await?;
    Ok(Json(rows))
}

/// GET /films/{id}
async fn get_film(State(films): State<Films>, Path(id): Path<i32>) -> Result<Json<Film>, ApiError> {
    films
        .get_by_id(id)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::not_found("film", id))
}

/// POST /films
async fn create_film(
    State(films): State<Films>,
    Json(fields): Json<FilmFields>,
) -> Result<(StatusCode, Json<Film>), ApiError> {
    let film = films.create(fields).await?;
    tracing::info!(resource = "film", id = film.id, "created");

    Ok((StatusCode::CREATED, Json(film)))
}

/// PUT /films/{id} - full-row update, echoes the stored fields
async fn update_film(
    State(films): State<Films>,
    Path(id): Path<i32>,
    Json(fields): Json<FilmFields>,
) -> Result<Json<Film>, ApiError> {
    let affected = films.update(id, fields.clone()).await?;
    if affected == 0 {
        return Err(ApiError::not_found("film", id));
    }

    Ok(Json(fields.into_film(id)))
}

/// DELETE /films/{id}
async fn delete_film(State(films): State<Films>, Path(id): Path<i32>) -> Result<StatusCode, ApiError> {
    let affected = films.delete(id).await?;
    if affected == 0 {
        return Err(ApiError::not_found("film", id));
    }

    tracing::info!(resource = "film", id, "deleted");
    Ok(StatusCode::NO_CONTENT)
}

/// POST /films/{film_id}/actors
///
/// No existence check here: a missing film or actor comes back from the
/// store as a foreign key violation (500).
async fn link_actor(
    State(films): State<Films>,
    Path(film_id): Path<i32>,
    Json(req): Json<LinkActorRequest>,
) -> Result<(StatusCode, Json<LinkResponse>), ApiError> {
    films.link_actor(film_id, req.actor_id).await?;

    Ok((
        StatusCode::CREATED,
        Json(LinkResponse {
            film_id,
            actor_id: Some(req.actor_id),
            director_id: None,
        }),
    ))
}

/// POST /films/{film_id}/directors
async fn link_director(
    State(films): State<Films>,
    Path(film_id): Path<i32>,
    Json(req): Json<LinkDirectorRequest>,
) -> Result<(StatusCode, Json<LinkResponse>), ApiError> {
    films.link_director(film_id, req.director_id).await?;

    Ok((
        StatusCode::CREATED,
        Json(LinkResponse {
            film_id,
            actor_id: None,
            director_id: Some(req.director_id),
        }),
    ))
}

/// Film routes
pub fn router<S>(films: Films) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    Router::new()
        .route("/films", get(list_films).post(create_film))
        .route(
            "/films/{id}",
            get(get_film).put(update_film).delete(delete_film),
        )
        .route("/films/{id}/actors", post(link_actor))
        .route("/films/{id}/directors", post(link_director))
        .with_state(films)
}
