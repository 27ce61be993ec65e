//! In-memory store
//!
//! Implements the repository traits over plain maps, with the same
//! observable behavior as the Postgres schema:
//! - ids start at 1 and are never reused
//! - link inserts fail when either side is missing (foreign keys)
//! - deleting a film, actor or director drops its link rows (cascade)
//! - duplicate link rows are kept
//!
//! Lists come back in id order, which is one valid "store order".

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use super::repos::{DbError, FilmRepository, PersonRepository, StoreHealth};
use crate::models::{Film, FilmFields, FilmQuery, Person, PersonFields, PersonTable};

/// One table with a SERIAL-style id counter
#[derive(Debug)]
struct Table<T> {
    last_id: i32,
    rows: BTreeMap<i32, T>,
}

impl<T> Default for Table<T> {
    fn default() -> Self {
        Self {
            last_id: 0,
            rows: BTreeMap::new(),
        }
    }
}

impl<T> Table<T> {
    fn next_id(&mut self) -> i32 {
        self.last_id += 1;
        self.last_id
    }

    /// Replace an existing row; affected rows like an UPDATE.
    fn replace(&mut self, id: i32, row: T) -> u64 {
        match self.rows.get_mut(&id) {
            Some(slot) => {
                *slot = row;
                1
            }
            None => 0,
        }
    }

    fn remove(&mut self, id: i32) -> u64 {
        u64::from(self.rows.remove(&id).is_some())
    }
}

#[derive(Debug, Default)]
struct Tables {
    actors: Table<Person>,
    directors: Table<Person>,
    films: Table<Film>,
    /// (film_id, actor_id)
    film_actors: Vec<(i32, i32)>,
    /// (film_id, director_id)
    film_directors: Vec<(i32, i32)>,
}

impl Tables {
    fn people(&mut self, table: PersonTable) -> &mut Table<Person> {
        match table {
            PersonTable::Actors => &mut self.actors,
            PersonTable::Directors => &mut self.directors,
        }
    }

    fn links(&mut self, table: PersonTable) -> &mut Vec<(i32, i32)> {
        match table {
            PersonTable::Actors => &mut self.film_actors,
            PersonTable::Directors => &mut self.film_directors,
        }
    }

    fn linked(links: &[(i32, i32)], film_id: i32) -> Vec<i32> {
        links
            .iter()
            .filter(|(film, _)| *film == film_id)
            .map(|(_, other)| *other)
            .collect()
    }

    fn link(&mut self, table: PersonTable, film_id: i32, other_id: i32) -> Result<(), DbError> {
        let (link_table, column) = match table {
            PersonTable::Actors => ("film_actors", "actor_id"),
            PersonTable::Directors => ("film_directors", "director_id"),
        };

        if !self.films.rows.contains_key(&film_id) {
            return Err(DbError::ForeignKey {
                table: link_table,
                detail: format!("Key (film_id)=({film_id}) is not present in table \"films\"."),
            });
        }
        if !self.people(table).rows.contains_key(&other_id) {
            return Err(DbError::ForeignKey {
                table: link_table,
                detail: format!(
                    "Key ({column})=({other_id}) is not present in table \"{table}\"."
                ),
            });
        }

        self.links(table).push((film_id, other_id));
        Ok(())
    }
}

/// Process-local store; clones share the same tables
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    tables: Arc<Mutex<Tables>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A [`PersonRepository`] over one of the person tables.
    pub fn people(&self, table: PersonTable) -> MemoryPeople {
        MemoryPeople {
            store: self.clone(),
            table,
        }
    }

    pub fn actors(&self) -> MemoryPeople {
        self.people(PersonTable::Actors)
    }

    pub fn directors(&self) -> MemoryPeople {
        self.people(PersonTable::Directors)
    }
}

/// Person table view of a [`MemoryStore`]
#[derive(Debug, Clone)]
pub struct MemoryPeople {
    store: MemoryStore,
    table: PersonTable,
}

#[async_trait]
impl PersonRepository for MemoryPeople {
    async fn create(&self, fields: PersonFields) -> Result<Person, DbError> {
        let mut tables = self.store.tables.lock().await;
        let people = tables.people(self.table);
        let person = fields.into_person(people.next_id());
        people.rows.insert(person.id, person.clone());
        Ok(person)
    }

    async fn get_by_id(&self, id: i32) -> Result<Option<Person>, DbError> {
        let mut tables = self.store.tables.lock().await;
        Ok(tables.people(self.table).rows.get(&id).cloned())
    }

    async fn list(&self, limit: u32) -> Result<Vec<Person>, DbError> {
        let mut tables = self.store.tables.lock().await;
        Ok(tables
            .people(self.table)
            .rows
            .values()
            .take(limit as usize)
            .cloned()
            .collect())
    }

    async fn update(&self, id: i32, fields: PersonFields) -> Result<u64, DbError> {
        let mut tables = self.store.tables.lock().await;
        Ok(tables.people(self.table).replace(id, fields.into_person(id)))
    }

    async fn delete(&self, id: i32) -> Result<u64, DbError> {
        let mut tables = self.store.tables.lock().await;
        let affected = tables.people(self.table).remove(id);
        tables.links(self.table).retain(|(_, other)| *other != id);
        Ok(affected)
    }
}

#[async_trait]
impl FilmRepository for MemoryStore {
    async fn create(&self, fields: FilmFields) -> Result<Film, DbError> {
        let mut tables = self.tables.lock().await;
        let film = fields.into_film(tables.films.next_id());
        tables.films.rows.insert(film.id, film.clone());
        Ok(film)
    }

    async fn get_by_id(&self, id: i32) -> Result<Option<Film>, DbError> {
        let tables = self.tables.lock().await;
        Ok(tables.films.rows.get(&id).cloned())
    }

    async fn list(&self, query: &FilmQuery) -> Result<Vec<Film>, DbError> {
        let tables = self.tables.lock().await;
        Ok(tables
            .films
            .rows
            .values()
            .filter(|film| {
                query.filter.admits(
                    &Tables::linked(&tables.film_actors, film.id),
                    &Tables::linked(&tables.film_directors, film.id),
                )
            })
            .take(query.limit as usize)
            .cloned()
            .collect())
    }

    async fn update(&self, id: i32, fields: FilmFields) -> Result<u64, DbError> {
        let mut tables = self.tables.lock().await;
        Ok(tables.films.replace(id, fields.into_film(id)))
    }

    async fn delete(&self, id: i32) -> Result<u64, DbError> {
        let mut tables = self.tables.lock().await;
        let affected = tables.films.remove(id);
        tables.film_actors.retain(|(film, _)| *film != id);
        tables.film_directors.retain(|(film, _)| *film != id);
        Ok(affected)
    }

    async fn link_actor(&self, film_id: i32, actor_id: i32) -> Result<(), DbError> {
        self.tables
            .lock()
            .await
            .link(PersonTable::Actors, film_id, actor_id)
    }

    async fn link_director(&self, film_id: i32, director_id: i32) -> Result<(), DbError> {
        self.tables
            .lock()
            .await
            .link(PersonTable::Directors, film_id, director_id)
    }
}

#[async_trait]
impl StoreHealth for MemoryStore {
    async fn ping(&self) -> Result<(), DbError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn person(name: &str) -> PersonFields {
        PersonFields {
            name: name.into(),
            given_name: "Tom".into(),
            birth_date: date(1990, 1, 1),
        }
    }

    fn film(name: &str) -> FilmFields {
        FilmFields {
            name: name.into(),
            description: format!("{name} description"),
            release_date: date(2009, 12, 18),
        }
    }

    #[tokio::test]
    async fn create_then_get_round_trips() {
        let store = MemoryStore::new();
        let actors = store.actors();

        let created = actors.create(person("Dunhill")).await.unwrap();
        let fetched = actors.get_by_id(created.id).await.unwrap().unwrap();

        assert_eq!(fetched, person("Dunhill").into_person(created.id));
    }

    #[tokio::test]
    async fn ids_are_not_reused() {
        let store = MemoryStore::new();
        let actors = store.actors();

        let first = actors.create(person("A")).await.unwrap();
        actors.delete(first.id).await.unwrap();
        let second = actors.create(person("B")).await.unwrap();

        assert!(second.id > first.id);
    }

    #[tokio::test]
    async fn update_missing_row_creates_nothing() {
        let store = MemoryStore::new();
        let directors = store.directors();

        assert_eq!(directors.update(42, person("Ghost")).await.unwrap(), 0);
        assert!(directors.get_by_id(42).await.unwrap().is_none());
        assert!(directors.list(20).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn delete_then_get_is_absent() {
        let store = MemoryStore::new();
        let directors = store.directors();

        let created = directors.create(person("Kubrick")).await.unwrap();
        assert_eq!(directors.delete(created.id).await.unwrap(), 1);
        assert_eq!(directors.delete(created.id).await.unwrap(), 0);
        assert!(directors.get_by_id(created.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn actor_and_director_tables_are_separate() {
        let store = MemoryStore::new();
        store.actors().create(person("Actor")).await.unwrap();

        assert!(store.directors().list(20).await.unwrap().is_empty());
        assert_eq!(store.actors().list(20).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn list_respects_limit() {
        let store = MemoryStore::new();
        let actors = store.actors();
        for i in 0..5 {
            actors.create(person(&format!("Actor {i}"))).await.unwrap();
            store.create(film(&format!("Film {i}"))).await.unwrap();
        }

        for limit in 0..7 {
            let expected = (limit as usize).min(5);
            assert_eq!(actors.list(limit).await.unwrap().len(), expected);
            let films = store.list(&FilmQuery::new(limit, vec![], vec![])).await.unwrap();
            assert_eq!(films.len(), expected);
        }
    }

    /// F1 has actor A1, F2 has actor A2 and director D1, F3 has director D1.
    async fn three_films() -> (MemoryStore, [i32; 3], i32, i32) {
        let store = MemoryStore::new();
        let a1 = store.actors().create(person("A1")).await.unwrap().id;
        let a2 = store.actors().create(person("A2")).await.unwrap().id;
        let d1 = store.directors().create(person("D1")).await.unwrap().id;

        let f1 = store.create(film("F1")).await.unwrap().id;
        let f2 = store.create(film("F2")).await.unwrap().id;
        let f3 = store.create(film("F3")).await.unwrap().id;

        store.link_actor(f1, a1).await.unwrap();
        store.link_actor(f2, a2).await.unwrap();
        store.link_director(f2, d1).await.unwrap();
        store.link_director(f3, d1).await.unwrap();

        (store, [f1, f2, f3], a1, d1)
    }

    async fn ids(store: &MemoryStore, actors: Vec<i32>, directors: Vec<i32>) -> Vec<i32> {
        store
            .list(&FilmQuery::new(20, actors, directors))
            .await
            .unwrap()
            .into_iter()
            .map(|f| f.id)
            .collect()
    }

    #[tokio::test]
    async fn filter_by_actor() {
        let (store, [f1, ..], a1, _) = three_films().await;
        assert_eq!(ids(&store, vec![a1], vec![]).await, vec![f1]);
    }

    #[tokio::test]
    async fn filter_by_director() {
        let (store, [_, f2, f3], _, d1) = three_films().await;
        assert_eq!(ids(&store, vec![], vec![d1]).await, vec![f2, f3]);
    }

    #[tokio::test]
    async fn filters_combine_with_and() {
        let (store, _, a1, d1) = three_films().await;
        assert!(ids(&store, vec![a1], vec![d1]).await.is_empty());
    }

    #[tokio::test]
    async fn duplicate_links_do_not_duplicate_films() {
        let (store, [f1, ..], a1, _) = three_films().await;
        store.link_actor(f1, a1).await.unwrap();

        assert_eq!(ids(&store, vec![a1], vec![]).await, vec![f1]);
    }

    #[tokio::test]
    async fn link_to_missing_rows_fails() {
        let (store, [f1, ..], a1, _) = three_films().await;

        let err = store.link_actor(999, a1).await.unwrap_err();
        assert!(err.to_string().contains("film_actors"));

        let err = store.link_director(f1, 999).await.unwrap_err();
        assert!(matches!(err, DbError::ForeignKey { table: "film_directors", .. }));
        assert!(err.to_string().contains("director_id"));
    }

    #[tokio::test]
    async fn deleting_a_person_drops_its_links() {
        let (store, _, a1, _) = three_films().await;
        store.actors().delete(a1).await.unwrap();

        assert!(ids(&store, vec![a1], vec![]).await.is_empty());
    }

    #[tokio::test]
    async fn deleting_a_film_drops_its_links() {
        let (store, [_, f2, f3], _, d1) = three_films().await;
        store.delete(f2).await.unwrap();

        assert_eq!(ids(&store, vec![], vec![d1]).await, vec![f3]);
    }
}
