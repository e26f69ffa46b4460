pub mod filter;
pub mod progress;
pub mod enrich;
pub mod aggregate;

pub use filter::filter_by_year;
pub use progress::{EnrichmentStats, ProgressTracker};
pub use enrich::{enrich_events, EnrichmentOutcome};
pub use aggregate::{aggregate, AggregateOptions};
