//! Health check endpoint

use std::sync::Arc;

use axum::{extract::State, routing::get, Json, Router};
use serde::Serialize;

use crate::db::repos::StoreHealth;

/// Health check response
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    /// Whether a store connection could be checked out
    pub database: bool,
}

/// GET /health
///
/// Always 200; a store that cannot be reached shows up as `database: false`.
async fn health(State(store): State<Arc<dyn StoreHealth>>) -> Json<HealthResponse> {
    let database = match store.ping().await {
        Ok(()) => true,
        Err(e) => {
            tracing::warn!("Health check could not reach the store: {}", e);
            false
        }
    };

    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        database,
    })
}

/// Health routes
pub fn router<S>(store: Arc<dyn StoreHealth>) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    Router::new().route("/health", get(health)).with_state(store)
}
