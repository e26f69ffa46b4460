use chrono::Datelike;
use rewind_models::WatchEvent;
use tracing::debug;

/// Keep only events watched during `year`. `None` keeps everything.
pub fn filter_by_year(events: Vec<WatchEvent>, year: Option<i32>) -> Vec<WatchEvent> {
    let Some(year) = year else {
        return events;
    };

    let before = events.len();
    let filtered: Vec<WatchEvent> = events
        .into_iter()
        .filter(|event| event.date_watched.year() == year)
        .collect();

    debug!(
        year = year,
        kept = filtered.len(),
        dropped = before - filtered.len(),
        "Filtered watch events by year"
    );
    filtered
}
