use serde::{Deserialize, Serialize};
use crate::metadata::Metadata;
use crate::watch_event::WatchEvent;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EnrichedEvent {
    pub event: WatchEvent,
    pub metadata: Metadata,
}

impl EnrichedEvent {
    pub fn new(event: WatchEvent, metadata: Metadata) -> Self {
        Self { event, metadata }
    }

    /// Minutes this event contributes to runtime-weighted statistics
    pub fn minutes(&self) -> Option<u32> {
        self.metadata.counted_runtime()
    }

    /// User rating, only when metadata resolved (rating averages are keyed by metadata)
    pub fn counted_rating(&self) -> Option<f64> {
        if self.metadata.found {
            self.event.rating
        } else {
            None
        }
    }
}
