//! Actors and directors
//!
//! Both tables have the same shape, so one record type serves both and
//! [`PersonTable`] says which table a repository maps.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Which person table a repository or route works on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PersonTable {
    Actors,
    Directors,
}

impl PersonTable {
    /// Table name, also used as the route prefix.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Actors => "actors",
            Self::Directors => "directors",
        }
    }

    /// Resource name used in log fields and error messages.
    pub fn resource(&self) -> &'static str {
        match self {
            Self::Actors => "actor",
            Self::Directors => "director",
        }
    }
}

impl fmt::Display for PersonTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A stored actor or director
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Person {
    pub id: i32,
    pub name: String,
    pub given_name: String,
    pub birth_date: NaiveDate,
}

/// Caller-supplied columns for insert and full-row update
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonFields {
    pub name: String,
    pub given_name: String,
    pub birth_date: NaiveDate,
}

impl PersonFields {
    /// Attach a store-assigned id.
    pub fn into_person(self, id: i32) -> Person {
        Person {
            id,
            name: self.name,
            given_name: self.given_name,
            birth_date: self.birth_date,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn serializes_camel_case() {
        let person = Person {
            id: 3,
            name: "Dunhill".into(),
            given_name: "Tom".into(),
            birth_date: NaiveDate::from_ymd_opt(1990, 1, 1).unwrap(),
        };

        assert_eq!(
            serde_json::to_value(&person).unwrap(),
            json!({
                "id": 3,
                "name": "Dunhill",
                "givenName": "Tom",
                "birthDate": "1990-01-01"
            })
        );
    }

    #[test]
    fn fields_reject_malformed_date() {
        let err = serde_json::from_value::<PersonFields>(json!({
            "name": "Dunhill",
            "givenName": "Tom",
            "birthDate": "01/01/1990"
        }));
        assert!(err.is_err());
    }

    #[test]
    fn table_names() {
        assert_eq!(PersonTable::Actors.to_string(), "actors");
        assert_eq!(PersonTable::Directors.resource(), "director");
    }
}
