use comfy_table::{modifiers, presets, Attribute, Cell, CellAlignment, Color, Table};
use rewind_models::{MediaType, PeriodMinutes, RankedEntry, Summary};

#[derive(Debug, Clone, Copy)]
enum Score {
    Minutes,
    Rating,
}

/// Render a summary as the human-readable year-in-review report.
///
/// Sections are separated by a blank line.
pub fn render(summary: &Summary) -> String {
    let heading = match summary.events_by_year.keys().collect::<Vec<_>>().as_slice() {
        [year] => format!("Your {} in review", year),
        _ => "Your watch log in review".to_string(),
    };
    let mut sections = vec![heading, overview_table(summary).to_string()];

    if summary.total_events == 0 {
        sections.push("Nothing watched in this period.".to_string());
        return sections.join("\n\n");
    }

    let rankings: [(&str, &[RankedEntry], Score); 9] = [
        ("Genres by time watched", summary.genres_by_runtime.as_slice(), Score::Minutes),
        ("Best rated genres", summary.best_rated_genres.as_slice(), Score::Rating),
        ("Actors by time watched", summary.actors_by_runtime.as_slice(), Score::Minutes),
        ("Best rated actors", summary.best_rated_actors.as_slice(), Score::Rating),
        ("Directors by time watched", summary.directors_by_runtime.as_slice(), Score::Minutes),
        ("Best rated directors", summary.best_rated_directors.as_slice(), Score::Rating),
        ("Production companies by time watched", summary.companies_by_runtime.as_slice(), Score::Minutes),
        ("Best rated production companies", summary.best_rated_companies.as_slice(), Score::Rating),
        ("Platforms", summary.platform_minutes.as_slice(), Score::Minutes),
    ];

    sections.extend(rankings.into_iter().map(|(title, entries, score)| {
        if entries.is_empty() {
            format!("{}\n  not enough data", title)
        } else {
            format!("{}\n{}", title, ranking_table(entries, score))
        }
    }));

    sections.push(format!(
        "Time watched by month\n{}",
        period_table("Month", &summary.minutes_by_month)
    ));
    sections.push(format!(
        "Time watched by day of week\n{}",
        period_table("Day", &summary.minutes_by_weekday)
    ));

    sections.join("\n\n")
}

/// "2h 05m" for an hour or more, "45m" below
pub fn format_minutes(minutes: u64) -> String {
    if minutes >= 60 {
        format!("{}h {:02}m", minutes / 60, minutes % 60)
    } else {
        format!("{}m", minutes)
    }
}

fn new_table() -> Table {
    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL);
    table.apply_modifier(modifiers::UTF8_ROUND_CORNERS);
    table
}

fn header(label: &str) -> Cell {
    Cell::new(label).fg(Color::Cyan).add_attribute(Attribute::Bold)
}

fn overview_table(summary: &Summary) -> Table {
    let mut table = new_table();
    table.set_header(vec![header("Overview"), header("")]);

    let counts = &summary.events_by_media_type;
    let share = &summary.media_type_share;
    let runtime = &summary.runtime_by_media_type;

    table.add_row(vec![Cell::new("Titles watched"), Cell::new(summary.total_events)]);
    for (label, media_type, percent) in [
        ("Movies", MediaType::Movie, share.movie),
        ("Series episodes", MediaType::Series, share.series),
    ] {
        table.add_row(vec![
            Cell::new(label),
            Cell::new(format!("{} ({:.1}%)", counts.get(media_type), percent)),
        ]);
    }
    table.add_row(vec![
        Cell::new("Time watched"),
        Cell::new(format!(
            "{} (movies {}, series {})",
            format_minutes(summary.runtime_total_minutes),
            format_minutes(runtime.movie),
            format_minutes(runtime.series)
        )),
    ]);
    table.add_row(vec![
        Cell::new("Average runtime"),
        Cell::new(format!("{:.0} min", summary.average_runtime_minutes)),
    ]);
    table.add_row(vec![
        Cell::new("Most watched genre"),
        Cell::new(summary.most_watched_genre.as_deref().unwrap_or("-")),
    ]);
    if let Some(day) = &summary.busiest_day {
        table.add_row(vec![
            Cell::new("Busiest day"),
            Cell::new(format!(
                "{} ({})",
                day.date.format("%A, %B %-d, %Y"),
                format_minutes(day.minutes)
            )),
        ]);
    }
    if summary.unresolved_events > 0 {
        table.add_row(vec![
            Cell::new("Without metadata"),
            Cell::new(summary.unresolved_events).fg(Color::Yellow),
        ]);
    }

    table
}

fn ranking_table(entries: &[RankedEntry], score: Score) -> Table {
    let mut table = new_table();
    let score_label = match score {
        Score::Minutes => "Time",
        Score::Rating => "Avg rating",
    };
    table.set_header(vec![header("#"), header("Name"), header(score_label), header("Titles")]);

    for (position, entry) in entries.iter().enumerate() {
        let score_text = match score {
            Score::Minutes => format_minutes(entry.score as u64),
            Score::Rating => format!("{:.2}", entry.score),
        };
        table.add_row(vec![
            Cell::new(position + 1),
            Cell::new(&entry.name),
            Cell::new(score_text).set_alignment(CellAlignment::Right),
            Cell::new(entry.entries).set_alignment(CellAlignment::Right),
        ]);
    }

    table
}

fn period_table(label: &str, periods: &[PeriodMinutes]) -> Table {
    let mut table = new_table();
    table.set_header(vec![header(label), header("Time")]);
    for period in periods {
        table.add_row(vec![
            Cell::new(&period.label),
            Cell::new(format_minutes(period.minutes)).set_alignment(CellAlignment::Right),
        ]);
    }
    table
}
