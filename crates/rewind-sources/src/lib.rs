pub mod traits;
pub mod error;
pub mod tsv;
pub mod tmdb;

pub use traits::{LookupQuery, MetadataProvider};
pub use error::{LookupError, LookupResult};
pub use tsv::{parse_watch_log, parse_watch_log_from_reader, ParseOptions};
pub use tmdb::{TmdbClient, TmdbSettings};
