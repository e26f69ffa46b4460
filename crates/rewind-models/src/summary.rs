use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use crate::media::MediaType;

/// Per-media-type counter
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct MediaTypeCounts {
    pub movie: u64,
    pub series: u64,
}

impl MediaTypeCounts {
    pub fn get(&self, media_type: MediaType) -> u64 {
        match media_type {
            MediaType::Movie => self.movie,
            MediaType::Series => self.series,
        }
    }

    pub fn add(&mut self, media_type: MediaType, amount: u64) {
        match media_type {
            MediaType::Movie => self.movie += amount,
            MediaType::Series => self.series += amount,
        }
    }

    pub fn total(&self) -> u64 {
        self.movie + self.series
    }
}

/// Percentage split between media types (0-100). Both zero when nothing was watched.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
pub struct MediaTypeShare {
    pub movie: f64,
    pub series: f64,
}

/// One line of a ranking: a genre, person, company or platform with its score.
///
/// `score` is minutes watched for runtime rankings and the average user rating
/// for rating rankings. `entries` is the number of events behind the score.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RankedEntry {
    pub name: String,
    pub score: f64,
    pub entries: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PeriodMinutes {
    pub label: String,
    pub minutes: u64,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct BusiestDay {
    pub date: NaiveDate,
    pub minutes: u64,
}

/// Year-in-review statistics, recomputed from the enriched events on every run.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Summary {
    pub total_events: u64,
    pub events_by_media_type: MediaTypeCounts,
    pub media_type_share: MediaTypeShare,
    pub unresolved_events: u64,

    pub runtime_total_minutes: u64,
    pub runtime_by_media_type: MediaTypeCounts,
    pub events_with_runtime: u64,
    pub average_runtime_minutes: f64,

    pub genre_counts: BTreeMap<String, u64>,
    pub most_watched_genre: Option<String>,

    // Bucketed by watch date, never by release date
    pub events_by_year: BTreeMap<i32, u64>,
    pub events_by_month: BTreeMap<String, u64>, // "YYYY-MM"

    pub genres_by_runtime: Vec<RankedEntry>,
    pub best_rated_genres: Vec<RankedEntry>,
    pub actors_by_runtime: Vec<RankedEntry>,
    pub best_rated_actors: Vec<RankedEntry>,
    pub directors_by_runtime: Vec<RankedEntry>,
    pub best_rated_directors: Vec<RankedEntry>,
    pub companies_by_runtime: Vec<RankedEntry>,
    pub best_rated_companies: Vec<RankedEntry>,
    pub platform_minutes: Vec<RankedEntry>,

    pub minutes_by_month: Vec<PeriodMinutes>,   // January..December
    pub minutes_by_weekday: Vec<PeriodMinutes>, // Monday..Sunday
    pub busiest_day: Option<BusiestDay>,
}
