//! Film list filtering
//!
//! `GET /films?actors=1,2&directors=3&limit=10` becomes a [`FilmQuery`].
//! The filter is a tagged variant so the SQL for each combination is picked
//! by a `match`, not assembled from flags.

use serde::Deserialize;

use super::limit::DEFAULT_LIMIT;

/// Which link tables a film must match
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FilmFilter {
    #[default]
    Unfiltered,
    /// At least one of these actors is linked to the film
    Actors(Vec<i32>),
    /// At least one of these directors is linked to the film
    Directors(Vec<i32>),
    /// Both conditions hold, independently of each other
    ActorsAndDirectors {
        actors: Vec<i32>,
        directors: Vec<i32>,
    },
}

impl FilmFilter {
    /// An empty id list means "no filter on that link table".
    pub fn new(actors: Vec<i32>, directors: Vec<i32>) -> Self {
        match (actors.is_empty(), directors.is_empty()) {
            (true, true) => Self::Unfiltered,
            (false, true) => Self::Actors(actors),
            (true, false) => Self::Directors(directors),
            (false, false) => Self::ActorsAndDirectors { actors, directors },
        }
    }

    pub fn actor_ids(&self) -> Option<&[i32]> {
        match self {
            Self::Actors(actors) | Self::ActorsAndDirectors { actors, .. } => {
                Some(actors.as_slice())
            }
            _ => None,
        }
    }

    pub fn director_ids(&self) -> Option<&[i32]> {
        match self {
            Self::Directors(directors) | Self::ActorsAndDirectors { directors, .. } => {
                Some(directors.as_slice())
            }
            _ => None,
        }
    }

    /// Whether a film linked to `film_actors` and `film_directors` passes.
    pub fn admits(&self, film_actors: &[i32], film_directors: &[i32]) -> bool {
        let any_of = |wanted: Option<&[i32]>, linked: &[i32]| match wanted {
            None => true,
            Some(wanted) => linked.iter().any(|id| wanted.contains(id)),
        };

        any_of(self.actor_ids(), film_actors) && any_of(self.director_ids(), film_directors)
    }
}

/// Everything `FilmRepository::list` needs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilmQuery {
    pub limit: u32,
    pub filter: FilmFilter,
}

impl FilmQuery {
    pub fn new(limit: u32, actors: Vec<i32>, directors: Vec<i32>) -> Self {
        Self {
            limit,
            filter: FilmFilter::new(actors, directors),
        }
    }
}

impl Default for FilmQuery {
    fn default() -> Self {
        Self {
            limit: DEFAULT_LIMIT,
            filter: FilmFilter::Unfiltered,
        }
    }
}

/// Raw query string parameters for `GET /films`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FilmListParams {
    pub actors: Option<String>,
    pub directors: Option<String>,
    pub limit: Option<u32>,
}

impl From<FilmListParams> for FilmQuery {
    fn from(params: FilmListParams) -> Self {
        Self::new(
            params.limit.unwrap_or(DEFAULT_LIMIT),
            params.actors.as_deref().map(parse_id_list).unwrap_or_default(),
            params.directors.as_deref().map(parse_id_list).unwrap_or_default(),
        )
    }
}

/// Parse a comma separated id list such as `"1, 2,3"`.
///
/// Blank entries are skipped. Anything that is not an integer coerces to 0,
/// which no store-assigned id ever takes, so a garbled id matches nothing
/// instead of widening the filter.
pub fn parse_id_list(raw: &str) -> Vec<i32> {
    raw.split(',')
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(|token| token.parse().unwrap_or(0))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_ids() {
        assert_eq!(parse_id_list("1,2,3"), vec![1, 2, 3]);
        assert_eq!(parse_id_list(" 4 , 5 "), vec![4, 5]);
    }

    #[test]
    fn skips_blank_entries() {
        assert_eq!(parse_id_list(""), Vec::<i32>::new());
        assert_eq!(parse_id_list("1,,2,"), vec![1, 2]);
    }

    #[test]
    fn coerces_garbage_to_zero() {
        assert_eq!(parse_id_list("7,abc"), vec![7, 0]);
    }

    #[test]
    fn filter_variant_from_lists() {
        assert_eq!(FilmFilter::new(vec![], vec![]), FilmFilter::Unfiltered);
        assert_eq!(FilmFilter::new(vec![1], vec![]), FilmFilter::Actors(vec![1]));
        assert_eq!(FilmFilter::new(vec![], vec![2]), FilmFilter::Directors(vec![2]));
        assert_eq!(
            FilmFilter::new(vec![1], vec![2]),
            FilmFilter::ActorsAndDirectors {
                actors: vec![1],
                directors: vec![2]
            }
        );
    }

    #[test]
    fn admits_requires_both_filters() {
        let filter = FilmFilter::new(vec![1], vec![10]);
        assert!(filter.admits(&[1, 2], &[10]));
        assert!(!filter.admits(&[1], &[]));
        assert!(!filter.admits(&[], &[10]));
        assert!(!filter.admits(&[2], &[10]));
    }

    #[test]
    fn unfiltered_admits_everything() {
        assert!(FilmFilter::Unfiltered.admits(&[], &[]));
    }

    #[test]
    fn query_from_params() {
        let query = FilmQuery::from(FilmListParams {
            actors: Some("1,2".into()),
            directors: None,
            limit: None,
        });
        assert_eq!(query.limit, 20);
        assert_eq!(query.filter, FilmFilter::Actors(vec![1, 2]));

        let query = FilmQuery::from(FilmListParams {
            actors: Some(String::new()),
            directors: Some("3".into()),
            limit: Some(5),
        });
        assert_eq!(query.limit, 5);
        assert_eq!(query.filter, FilmFilter::Directors(vec![3]));
    }
}
