//! Year-in-review statistics.
//!
//! `aggregate` is a single fold over the enriched events into a local
//! accumulator, finished into an immutable `Summary`. The same input sequence
//! always produces the same summary.
//!
//! Unresolved events (metadata not found) count toward totals and the
//! per-year/per-month event buckets, but never toward genre, runtime, people
//! or rating statistics.

use chrono::{Datelike, NaiveDate};
use rewind_config::ReportConfig;
use rewind_models::{
    BusiestDay, EnrichedEvent, MediaTypeCounts, MediaTypeShare, PeriodMinutes, RankedEntry, Summary,
};
use std::cmp::Ordering;
use std::collections::BTreeMap;

const MONTH_NAMES: [&str; 12] = [
    "January", "February", "March", "April", "May", "June",
    "July", "August", "September", "October", "November", "December",
];

const WEEKDAY_NAMES: [&str; 7] = [
    "Monday", "Tuesday", "Wednesday", "Thursday", "Friday", "Saturday", "Sunday",
];

const UNKNOWN_PLATFORM: &str = "Unknown";

#[derive(Debug, Clone)]
pub struct AggregateOptions {
    /// Length of every ranking
    pub top_n: usize,
    /// Rated entries needed before a genre, actor or company gets a rating rank
    pub min_rated_entries: u64,
    pub min_rated_entries_directors: u64,
}

impl Default for AggregateOptions {
    fn default() -> Self {
        Self {
            top_n: 20,
            min_rated_entries: 5,
            min_rated_entries_directors: 2,
        }
    }
}

impl AggregateOptions {
    pub fn from_config(report: &ReportConfig) -> Self {
        Self {
            top_n: report.top_n,
            min_rated_entries: report.min_rated_entries,
            min_rated_entries_directors: report.min_rated_entries_directors,
        }
    }
}

#[derive(Debug, Default, Clone)]
struct TallyEntry {
    minutes: u64,
    watched: u64,
    rating_sum: f64,
    rated: u64,
}

/// Runtime and rating totals keyed by name (genre, person, company)
#[derive(Debug, Default)]
struct Tally {
    entries: BTreeMap<String, TallyEntry>,
}

impl Tally {
    fn add(&mut self, name: &str, minutes: Option<u32>, rating: Option<f64>) {
        let entry = self.entries.entry(name.to_string()).or_default();
        entry.watched += 1;
        entry.minutes += minutes.map(u64::from).unwrap_or(0);
        if let Some(rating) = rating {
            entry.rating_sum += rating;
            entry.rated += 1;
        }
    }

    fn by_runtime(&self, top_n: usize) -> Vec<RankedEntry> {
        let ranked = self
            .entries
            .iter()
            .filter(|(_, entry)| entry.minutes > 0)
            .map(|(name, entry)| RankedEntry {
                name: name.clone(),
                score: entry.minutes as f64,
                entries: entry.watched,
            })
            .collect();
        rank(ranked, top_n)
    }

    fn by_rating(&self, min_rated: u64, top_n: usize) -> Vec<RankedEntry> {
        let ranked = self
            .entries
            .iter()
            .filter(|(_, entry)| entry.rated > 0 && entry.rated >= min_rated)
            .map(|(name, entry)| RankedEntry {
                name: name.clone(),
                score: entry.rating_sum / entry.rated as f64,
                entries: entry.rated,
            })
            .collect();
        rank(ranked, top_n)
    }
}

/// Highest score first, ties by name, truncated to `top_n`
fn rank(mut entries: Vec<RankedEntry>, top_n: usize) -> Vec<RankedEntry> {
    entries.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.name.cmp(&b.name))
    });
    entries.truncate(top_n);
    entries
}

#[derive(Debug, Default)]
struct Accumulator {
    total_events: u64,
    events_by_media_type: MediaTypeCounts,
    unresolved_events: u64,

    runtime_total_minutes: u64,
    runtime_by_media_type: MediaTypeCounts,
    events_with_runtime: u64,

    genre_counts: BTreeMap<String, u64>,
    events_by_year: BTreeMap<i32, u64>,
    events_by_month: BTreeMap<String, u64>,

    genres: Tally,
    actors: Tally,
    directors: Tally,
    companies: Tally,
    platforms: BTreeMap<String, (u64, u64)>, // (minutes, events)

    minutes_by_month: [u64; 12],
    minutes_by_weekday: [u64; 7],
    minutes_by_day: BTreeMap<NaiveDate, u64>,
}

impl Accumulator {
    fn add(&mut self, enriched: &EnrichedEvent) {
        let event = &enriched.event;
        let metadata = &enriched.metadata;
        let date = event.date_watched;

        self.total_events += 1;
        self.events_by_media_type.add(event.media_type, 1);
        *self.events_by_year.entry(date.year()).or_insert(0) += 1;
        *self
            .events_by_month
            .entry(format!("{:04}-{:02}", date.year(), date.month()))
            .or_insert(0) += 1;

        let platform = event
            .platform
            .as_deref()
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .unwrap_or(UNKNOWN_PLATFORM);
        let platform_entry = self.platforms.entry(platform.to_string()).or_insert((0, 0));
        platform_entry.1 += 1;

        if !metadata.found {
            self.unresolved_events += 1;
            return;
        }

        for genre in &metadata.genres {
            *self.genre_counts.entry(genre.clone()).or_insert(0) += 1;
        }

        let minutes = enriched.minutes();
        let rating = enriched.counted_rating();

        if let Some(runtime) = minutes {
            let runtime = u64::from(runtime);
            self.runtime_total_minutes += runtime;
            self.runtime_by_media_type.add(event.media_type, runtime);
            self.events_with_runtime += 1;

            platform_entry.0 += runtime;
            self.minutes_by_month[date.month0() as usize] += runtime;
            self.minutes_by_weekday[date.weekday().num_days_from_monday() as usize] += runtime;
            *self.minutes_by_day.entry(date).or_insert(0) += runtime;
        }

        for genre in &metadata.genres {
            self.genres.add(genre, minutes, rating);
        }
        for actor in &metadata.cast {
            self.actors.add(actor, minutes, rating);
        }
        for director in &metadata.directors {
            self.directors.add(director, minutes, rating);
        }
        for company in &metadata.production_companies {
            self.companies.add(company, minutes, rating);
        }
    }

    fn finish(self, options: &AggregateOptions) -> Summary {
        let top_n = options.top_n;

        // BTreeMap iterates names ascending, so keeping only strictly greater
        // counts leaves the lexicographically smallest name among ties.
        let most_watched_genre = self
            .genre_counts
            .iter()
            .fold(None::<(&String, u64)>, |best, (genre, &count)| match best {
                Some((_, best_count)) if best_count >= count => best,
                _ => Some((genre, count)),
            })
            .map(|(genre, _)| genre.clone());

        let average_runtime_minutes = if self.events_with_runtime == 0 {
            0.0
        } else {
            self.runtime_total_minutes as f64 / self.events_with_runtime as f64
        };

        let media_type_share = if self.total_events == 0 {
            MediaTypeShare::default()
        } else {
            let total = self.total_events as f64;
            MediaTypeShare {
                movie: self.events_by_media_type.movie as f64 / total * 100.0,
                series: self.events_by_media_type.series as f64 / total * 100.0,
            }
        };

        let platform_minutes = rank(
            self.platforms
                .iter()
                .map(|(name, (minutes, events))| RankedEntry {
                    name: name.clone(),
                    score: *minutes as f64,
                    entries: *events,
                })
                .collect(),
            top_n,
        );

        let busiest_day = self
            .minutes_by_day
            .iter()
            .fold(None::<BusiestDay>, |best, (&date, &minutes)| match best {
                Some(b) if b.minutes >= minutes => Some(b),
                _ => Some(BusiestDay { date, minutes }),
            });

        Summary {
            total_events: self.total_events,
            events_by_media_type: self.events_by_media_type,
            media_type_share,
            unresolved_events: self.unresolved_events,

            runtime_total_minutes: self.runtime_total_minutes,
            runtime_by_media_type: self.runtime_by_media_type,
            events_with_runtime: self.events_with_runtime,
            average_runtime_minutes,

            most_watched_genre,
            genre_counts: self.genre_counts,

            events_by_year: self.events_by_year,
            events_by_month: self.events_by_month,

            genres_by_runtime: self.genres.by_runtime(top_n),
            best_rated_genres: self.genres.by_rating(options.min_rated_entries, top_n),
            actors_by_runtime: self.actors.by_runtime(top_n),
            best_rated_actors: self.actors.by_rating(options.min_rated_entries, top_n),
            directors_by_runtime: self.directors.by_runtime(top_n),
            best_rated_directors: self.directors.by_rating(options.min_rated_entries_directors, top_n),
            companies_by_runtime: self.companies.by_runtime(top_n),
            best_rated_companies: self.companies.by_rating(options.min_rated_entries, top_n),
            platform_minutes,

            minutes_by_month: MONTH_NAMES
                .iter()
                .zip(self.minutes_by_month)
                .map(|(label, minutes)| PeriodMinutes { label: label.to_string(), minutes })
                .collect(),
            minutes_by_weekday: WEEKDAY_NAMES
                .iter()
                .zip(self.minutes_by_weekday)
                .map(|(label, minutes)| PeriodMinutes { label: label.to_string(), minutes })
                .collect(),
            busiest_day,
        }
    }
}

/// Fold enriched events (in log order) into a `Summary`. Never fails.
pub fn aggregate<'a, I>(events: I, options: &AggregateOptions) -> Summary
where
    I: IntoIterator<Item = &'a EnrichedEvent>,
{
    events
        .into_iter()
        .fold(Accumulator::default(), |mut acc, event| {
            acc.add(event);
            acc
        })
        .finish(options)
}

#[cfg(test)]
mod tests;
