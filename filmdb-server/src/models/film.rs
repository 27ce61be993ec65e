//! Films

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A stored film
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Film {
    pub id: i32,
    pub name: String,
    pub description: String,
    pub release_date: NaiveDate,
}

/// Caller-supplied columns for insert and full-row update
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilmFields {
    pub name: String,
    pub description: String,
    pub release_date: NaiveDate,
}

impl FilmFields {
    /// Attach a store-assigned id.
    pub fn into_film(self, id: i32) -> Film {
        Film {
            id,
            name: self.name,
            description: self.description,
            release_date: self.release_date,
        }
    }
}
