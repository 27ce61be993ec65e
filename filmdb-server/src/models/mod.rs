//! Domain records and request parameters
//!
//! Records are plain immutable data. Repositories take and return them;
//! nothing here touches the store.

pub mod film;
pub mod filter;
pub mod limit;
pub mod person;

pub use film::{Film, FilmFields};
pub use filter::{parse_id_list, FilmFilter, FilmListParams, FilmQuery};
pub use limit::{LimitParams, DEFAULT_LIMIT};
pub use person::{Person, PersonFields, PersonTable};
