use crate::progress::{EnrichmentStats, ProgressTracker};
use futures::stream::{self, StreamExt};
use rewind_models::{EnrichedEvent, Metadata, WatchEvent};
use rewind_sources::{LookupQuery, MetadataProvider};
use serde::Serialize;
use tracing::{debug, warn};

const PROGRESS_LOG_INTERVAL: usize = 25;

#[derive(Debug, Clone, Serialize)]
pub struct EnrichmentOutcome {
    pub events: Vec<EnrichedEvent>,
    pub stats: EnrichmentStats,
}

/// Look up metadata for every event, at most `concurrency` requests in flight.
///
/// Results come back in input order. A failed lookup never aborts the run: it is
/// logged and the event is paired with `Metadata::not_found()`.
/// `on_progress` is called with the number of events processed so far.
pub async fn enrich_events<P, F>(
    provider: &P,
    events: Vec<WatchEvent>,
    concurrency: usize,
    mut on_progress: F,
) -> EnrichmentOutcome
where
    P: MetadataProvider + ?Sized,
    F: FnMut(usize),
{
    let mut tracker = ProgressTracker::new(events.len(), PROGRESS_LOG_INTERVAL);
    let mut enriched = Vec::with_capacity(events.len());

    let mut lookups = stream::iter(events.into_iter().map(|event| async move {
        let query = LookupQuery::from_event(&event);
        let outcome = provider.lookup(&query).await;
        (event, outcome)
    }))
    .buffered(concurrency.max(1));

    while let Some((event, outcome)) = lookups.next().await {
        let metadata = match outcome {
            Ok(metadata) if metadata.found => {
                tracker.record_found();
                metadata
            }
            Ok(_) => {
                tracker.record_not_found();
                warn!(
                    title = %event.title,
                    media_type = %event.media_type,
                    imdb_id = ?event.imdb_id,
                    provider = provider.provider_name(),
                    "No metadata found"
                );
                Metadata::not_found()
            }
            Err(e) => {
                tracker.record_failed_with_error(e.category());
                warn!(
                    title = %event.title,
                    media_type = %event.media_type,
                    provider = provider.provider_name(),
                    error = %e,
                    "Metadata lookup failed, continuing without metadata"
                );
                Metadata::not_found()
            }
        };

        debug!(title = %event.title, found = metadata.found, "Enriched watch event");
        enriched.push(EnrichedEvent::new(event, metadata));

        let processed = tracker.processed();
        tracker.log_progress(processed);
        on_progress(processed);
    }

    EnrichmentOutcome {
        events: enriched,
        stats: tracker.finish(),
    }
}
