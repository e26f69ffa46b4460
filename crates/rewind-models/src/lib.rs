pub mod media;
pub mod watch_event;
pub mod metadata;
pub mod enriched;
pub mod summary;

pub use media::MediaType;
pub use watch_event::WatchEvent;
pub use metadata::Metadata;
pub use enriched::EnrichedEvent;
pub use summary::{BusiestDay, MediaTypeCounts, MediaTypeShare, PeriodMinutes, RankedEntry, Summary};
