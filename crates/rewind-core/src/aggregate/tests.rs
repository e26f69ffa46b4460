use super::*;
use rewind_models::{MediaType, Metadata, WatchEvent};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn found(title: &str, media_type: MediaType, on: NaiveDate, genres: &[&str], runtime: Option<u32>) -> EnrichedEvent {
    EnrichedEvent::new(
        WatchEvent::new(title, media_type, on),
        Metadata::found(genres, runtime),
    )
}

fn unresolved(title: &str, media_type: MediaType, on: NaiveDate) -> EnrichedEvent {
    EnrichedEvent::new(WatchEvent::new(title, media_type, on), Metadata::not_found())
}

#[test]
fn test_movie_and_unresolved_series() {
    let events = vec![
        found("Heat", MediaType::Movie, date(2023, 1, 1), &["Action"], Some(120)),
        unresolved("Mystery Show", MediaType::Series, date(2023, 2, 1)),
    ];

    let summary = aggregate(&events, &AggregateOptions::default());

    assert_eq!(summary.total_events, 2);
    assert_eq!(summary.events_by_media_type.movie, 1);
    assert_eq!(summary.events_by_media_type.series, 1);
    assert_eq!(summary.unresolved_events, 1);
    assert_eq!(summary.runtime_total_minutes, 120);
    assert_eq!(summary.average_runtime_minutes, 120.0);
    assert_eq!(summary.genre_counts.len(), 1);
    assert_eq!(summary.genre_counts.get("Action"), Some(&1));
    assert_eq!(summary.most_watched_genre.as_deref(), Some("Action"));
    assert_eq!(summary.events_by_year.get(&2023), Some(&2));
    assert_eq!(summary.events_by_month.get("2023-01"), Some(&1));
    assert_eq!(summary.events_by_month.get("2023-02"), Some(&1));
    assert_eq!(summary.media_type_share.movie, 50.0);
}

#[test]
fn test_genre_tie_goes_to_smallest_name() {
    let events = vec![
        found("A", MediaType::Movie, date(2023, 3, 1), &["Drama"], Some(100)),
        found("B", MediaType::Movie, date(2023, 3, 2), &["Comedy"], Some(90)),
    ];

    let summary = aggregate(&events, &AggregateOptions::default());

    assert_eq!(summary.most_watched_genre.as_deref(), Some("Comedy"));
}

#[test]
fn test_empty_input() {
    let summary = aggregate(&Vec::<EnrichedEvent>::new(), &AggregateOptions::default());

    assert_eq!(summary.total_events, 0);
    assert_eq!(summary.runtime_total_minutes, 0);
    assert_eq!(summary.average_runtime_minutes, 0.0);
    assert_eq!(summary.media_type_share.movie, 0.0);
    assert!(summary.most_watched_genre.is_none());
    assert!(summary.genre_counts.is_empty());
    assert!(summary.busiest_day.is_none());
    assert_eq!(summary.minutes_by_month.len(), 12);
    assert_eq!(summary.minutes_by_weekday.len(), 7);
}

#[test]
fn test_average_zero_without_known_runtime() {
    let events = vec![
        found("No Runtime", MediaType::Movie, date(2023, 5, 5), &["Drama"], None),
        unresolved("Gone", MediaType::Movie, date(2023, 5, 6)),
    ];

    let summary = aggregate(&events, &AggregateOptions::default());

    assert_eq!(summary.events_with_runtime, 0);
    assert_eq!(summary.average_runtime_minutes, 0.0);
    assert_eq!(summary.genre_counts.get("Drama"), Some(&1));
}

#[test]
fn test_buckets_sum_to_total() {
    let events = vec![
        found("A", MediaType::Movie, date(2022, 12, 31), &["Drama"], Some(100)),
        found("B", MediaType::Series, date(2023, 1, 2), &["Comedy"], Some(30)),
        found("C", MediaType::Series, date(2023, 1, 3), &[], Some(45)),
        unresolved("D", MediaType::Movie, date(2023, 7, 4)),
    ];

    let summary = aggregate(&events, &AggregateOptions::default());

    assert_eq!(summary.events_by_media_type.total(), summary.total_events);
    assert_eq!(summary.events_by_year.values().sum::<u64>(), summary.total_events);
    assert_eq!(summary.events_by_month.values().sum::<u64>(), summary.total_events);
    assert_eq!(summary.runtime_by_media_type.total(), summary.runtime_total_minutes);
    assert_eq!(
        summary.minutes_by_month.iter().map(|p| p.minutes).sum::<u64>(),
        summary.runtime_total_minutes
    );
    assert_eq!(
        summary.minutes_by_weekday.iter().map(|p| p.minutes).sum::<u64>(),
        summary.runtime_total_minutes
    );
    assert_eq!(summary.runtime_by_media_type.series, 75);
    assert_eq!(summary.average_runtime_minutes, 175.0 / 3.0);
}

#[test]
fn test_aggregate_is_deterministic() {
    let events = vec![
        found("A", MediaType::Movie, date(2023, 3, 1), &["Drama", "Crime"], Some(100)),
        found("B", MediaType::Series, date(2023, 3, 2), &["Comedy"], Some(25)),
    ];
    let options = AggregateOptions::default();

    assert_eq!(aggregate(&events, &options), aggregate(&events, &options));
}

#[test]
fn test_rating_rankings_respect_threshold() {
    let mut events = Vec::new();
    for day in 1..=5 {
        let event = WatchEvent::new("Drama", MediaType::Movie, date(2023, 4, day)).with_rating(8.0);
        let mut metadata = Metadata::found(&["Drama"], Some(100));
        metadata.directors = vec!["Frequent".to_string()];
        events.push(EnrichedEvent::new(event, metadata));
    }
    let single = WatchEvent::new("Comedy", MediaType::Movie, date(2023, 4, 10)).with_rating(10.0);
    let mut metadata = Metadata::found(&["Comedy"], Some(90));
    metadata.directors = vec!["Rare".to_string()];
    events.push(EnrichedEvent::new(single, metadata));

    let summary = aggregate(&events, &AggregateOptions::default());

    assert_eq!(summary.best_rated_genres.len(), 1);
    assert_eq!(summary.best_rated_genres[0].name, "Drama");
    assert_eq!(summary.best_rated_genres[0].score, 8.0);
    assert_eq!(summary.best_rated_genres[0].entries, 5);

    assert_eq!(summary.best_rated_directors.len(), 1);
    assert_eq!(summary.best_rated_directors[0].name, "Frequent");

    // Runtime rankings have no threshold
    assert_eq!(summary.genres_by_runtime.len(), 2);
    assert_eq!(summary.genres_by_runtime[0].name, "Drama");
    assert_eq!(summary.genres_by_runtime[0].score, 500.0);
}

#[test]
fn test_unresolved_rating_is_ignored() {
    let mut metadata = Metadata::not_found();
    metadata.genres.insert("Drama".to_string());
    let event = EnrichedEvent::new(
        WatchEvent::new("Lost", MediaType::Movie, date(2023, 1, 1)).with_rating(9.0),
        metadata,
    );

    let options = AggregateOptions { min_rated_entries: 1, ..AggregateOptions::default() };
    let summary = aggregate(&[event], &options);

    assert!(summary.best_rated_genres.is_empty());
    assert!(summary.genre_counts.is_empty());
}

#[test]
fn test_rankings_truncate_and_break_ties_by_name() {
    let events = vec![
        found("A", MediaType::Movie, date(2023, 6, 1), &["Zeta"], Some(60)),
        found("B", MediaType::Movie, date(2023, 6, 2), &["Alpha"], Some(60)),
        found("C", MediaType::Movie, date(2023, 6, 3), &["Mid"], Some(90)),
    ];
    let options = AggregateOptions { top_n: 2, ..AggregateOptions::default() };

    let summary = aggregate(&events, &options);

    let names: Vec<_> = summary.genres_by_runtime.iter().map(|e| e.name.as_str()).collect();
    assert_eq!(names, vec!["Mid", "Alpha"]);
}

#[test]
fn test_platforms_and_busiest_day() {
    let a = EnrichedEvent::new(
        WatchEvent::new("A", MediaType::Movie, date(2023, 8, 7)).with_platform("Netflix"),
        Metadata::found(&["Drama"], Some(100)),
    );
    let b = EnrichedEvent::new(
        WatchEvent::new("B", MediaType::Series, date(2023, 8, 7)).with_platform("Netflix"),
        Metadata::found(&["Drama"], Some(50)),
    );
    let c = found("C", MediaType::Movie, date(2023, 8, 1), &["Drama"], Some(150));
    let d = found("D", MediaType::Movie, date(2023, 8, 9), &["Drama"], Some(20));

    let summary = aggregate(&[a, b, c, d], &AggregateOptions::default());

    assert_eq!(summary.platform_minutes[0].name, "Unknown");
    assert_eq!(summary.platform_minutes[0].score, 170.0);
    assert_eq!(summary.platform_minutes[1].name, "Netflix");
    assert_eq!(summary.platform_minutes[1].score, 150.0);
    assert_eq!(summary.platform_minutes[1].entries, 2);

    // 150 minutes on both the 1st and the 7th, earliest wins
    let busiest = summary.busiest_day.unwrap();
    assert_eq!(busiest.date, date(2023, 8, 1));
    assert_eq!(busiest.minutes, 150);

    // 2023-08-07 is a Monday
    assert_eq!(summary.minutes_by_weekday[0].label, "Monday");
    assert_eq!(summary.minutes_by_weekday[0].minutes, 150);
    assert_eq!(summary.minutes_by_month[7].label, "August");
    assert_eq!(summary.minutes_by_month[7].minutes, 320);
}

mod properties {
    use super::*;
    use proptest::prelude::*;
    use std::collections::BTreeMap;

    const GENRES: &[&str] = &["Action", "Comedy", "Crime", "Drama", "Horror", "Sci-Fi"];

    /// Found and unresolved events of both media types, with and without
    /// runtime. Unresolved events still carry genres and runtime, which the
    /// aggregation must ignore.
    fn arb_event() -> impl Strategy<Value = EnrichedEvent> {
        (
            any::<bool>(),
            any::<bool>(),
            prop::option::of(1u32..400),
            prop::collection::btree_set(prop::sample::select(GENRES), 0..4),
            (2020i32..2025, 1u32..=12, 1u32..=28),
            prop::option::of(0.0f64..10.0),
        )
            .prop_map(|(is_movie, found, runtime, genres, (y, m, d), rating)| {
                let media_type = if is_movie { MediaType::Movie } else { MediaType::Series };
                let mut event = WatchEvent::new("Title", media_type, date(y, m, d));
                if let Some(rating) = rating {
                    event = event.with_rating(rating);
                }
                let metadata = Metadata {
                    found,
                    genres: genres.into_iter().map(str::to_string).collect(),
                    runtime_minutes: runtime,
                    ..Metadata::default()
                };
                EnrichedEvent::new(event, metadata)
            })
    }

    fn arb_events() -> impl Strategy<Value = Vec<EnrichedEvent>> {
        prop::collection::vec(arb_event(), 0..40)
    }

    proptest! {
        #[test]
        fn test_totals_match_length(events in arb_events()) {
            let summary = aggregate(&events, &AggregateOptions::default());
            let len = events.len() as u64;

            prop_assert_eq!(summary.total_events, len);
            prop_assert_eq!(summary.events_by_media_type.total(), len);
            prop_assert_eq!(summary.events_by_year.values().sum::<u64>(), len);
            prop_assert_eq!(summary.events_by_month.values().sum::<u64>(), len);
        }

        #[test]
        fn test_average_runtime_is_never_nan(events in arb_events()) {
            let summary = aggregate(&events, &AggregateOptions::default());
            let known: Vec<u64> = events
                .iter()
                .filter(|e| e.metadata.found)
                .filter_map(|e| e.metadata.runtime_minutes.map(u64::from))
                .collect();

            prop_assert!(!summary.average_runtime_minutes.is_nan());
            if known.is_empty() {
                prop_assert_eq!(summary.average_runtime_minutes, 0.0);
            } else {
                let expected = known.iter().sum::<u64>() as f64 / known.len() as f64;
                prop_assert!((summary.average_runtime_minutes - expected).abs() < 1e-9);
            }
        }

        #[test]
        fn test_aggregate_is_pure(events in arb_events()) {
            let options = AggregateOptions::default();
            prop_assert_eq!(aggregate(&events, &options), aggregate(&events, &options));
        }

        #[test]
        fn test_most_watched_genre_is_smallest_of_the_most_counted(events in arb_events()) {
            let summary = aggregate(&events, &AggregateOptions::default());

            let mut counts: BTreeMap<&str, u64> = BTreeMap::new();
            for event in events.iter().filter(|e| e.metadata.found) {
                for genre in &event.metadata.genres {
                    *counts.entry(genre.as_str()).or_insert(0) += 1;
                }
            }
            let expected = counts.values().max().and_then(|max| {
                counts
                    .iter()
                    .filter(|(_, count)| *count == max)
                    .map(|(genre, _)| genre.to_string())
                    .next()
            });

            prop_assert_eq!(summary.most_watched_genre, expected);
        }
    }
}
