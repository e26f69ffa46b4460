use anyhow::{anyhow, Context, Result};
use chrono::NaiveDate;
use csv::{ReaderBuilder, StringRecord};
use rewind_models::{MediaType, WatchEvent};
use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::{self, debug, warn};

const TITLE_COLUMNS: &[&str] = &["name", "title"];
const MEDIA_TYPE_COLUMNS: &[&str] = &["movie or series", "type", "media type"];
const DATE_COLUMNS: &[&str] = &["date", "date watched"];
const RATING_COLUMNS: &[&str] = &["rating", "your rating"];
const PLATFORM_COLUMNS: &[&str] = &["platform"];
const IMDB_ID_COLUMNS: &[&str] = &["imdb id", "const"];

// Spreadsheet exports write M/D/YYYY; ISO dates are accepted as well
const DATE_FORMATS: &[&str] = &["%m/%d/%Y", "%Y-%m-%d"];

#[derive(Debug, Clone, Default)]
pub struct ParseOptions {
    /// Skip malformed rows with a warning instead of failing the whole file
    pub skip_malformed_rows: bool,
}

/// Column positions resolved from the header row
struct Columns {
    title: usize,
    media_type: usize,
    date: usize,
    rating: Option<usize>,
    platform: Option<usize>,
    imdb_id: Option<usize>,
}

impl Columns {
    fn from_headers(headers: &StringRecord) -> Result<Self> {
        let header_map: HashMap<String, usize> = headers
            .iter()
            .enumerate()
            .map(|(i, h)| (h.trim().trim_start_matches('\u{feff}').to_lowercase(), i))
            .collect();

        let available_columns: Vec<String> = headers.iter().map(|h| h.to_string()).collect();
        debug!("Available watch log columns: {:?}", available_columns);

        let find = |aliases: &[&str]| aliases.iter().find_map(|alias| header_map.get(*alias).copied());
        let require = |aliases: &[&str]| {
            find(aliases).ok_or_else(|| {
                anyhow!(
                    "Missing required column: {}. Available columns: {:?}",
                    aliases[0],
                    available_columns
                )
            })
        };

        Ok(Self {
            title: require(TITLE_COLUMNS)?,
            media_type: require(MEDIA_TYPE_COLUMNS)?,
            date: require(DATE_COLUMNS)?,
            rating: find(RATING_COLUMNS),
            platform: find(PLATFORM_COLUMNS),
            imdb_id: find(IMDB_ID_COLUMNS),
        })
    }
}

/// Parse the tab-separated watch log at `path`
pub fn parse_watch_log<P: AsRef<Path>>(path: P, options: &ParseOptions) -> Result<Vec<WatchEvent>> {
    let path = path.as_ref();
    let file = File::open(path)
        .with_context(|| format!("Failed to open watch log {}", path.display()))?;
    parse_watch_log_from_reader(file, options)
        .with_context(|| format!("Failed to parse watch log {}", path.display()))
}

pub fn parse_watch_log_from_reader<R: Read>(reader: R, options: &ParseOptions) -> Result<Vec<WatchEvent>> {
    let mut reader = ReaderBuilder::new()
        .delimiter(b'\t')
        .flexible(true)
        .from_reader(reader);

    let headers = reader.headers()?.clone();
    let columns = Columns::from_headers(&headers)?;

    let mut events = Vec::new();
    let mut row_count = 0;
    let mut skipped = 0;
    for result in reader.records() {
        let record = result?;
        row_count += 1;

        if record.iter().all(|cell| cell.trim().is_empty()) {
            debug!(row = row_count, "Skipping blank row");
            continue;
        }

        match parse_row(&record, &columns) {
            Ok(event) => {
                if events.len() < 3 {
                    debug!(
                        row = row_count,
                        title = %event.title,
                        media_type = %event.media_type,
                        date_watched = %event.date_watched,
                        "Parsed watch log row"
                    );
                }
                events.push(event);
            }
            Err(e) if options.skip_malformed_rows => {
                skipped += 1;
                warn!(row = row_count, error = %e, "Skipping malformed watch log row");
            }
            Err(e) => return Err(e.context(format!("Row {}", row_count))),
        }
    }

    tracing::info!(
        "Parsed {} total rows, {} watch events ({} skipped)",
        row_count,
        events.len(),
        skipped
    );
    Ok(events)
}

fn cell<'a>(record: &'a StringRecord, index: Option<usize>) -> &'a str {
    index.and_then(|i| record.get(i)).unwrap_or("").trim()
}

fn optional_cell(record: &StringRecord, index: Option<usize>) -> Option<String> {
    let value = cell(record, index);
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

fn parse_row(record: &StringRecord, columns: &Columns) -> Result<WatchEvent> {
    let title = cell(record, Some(columns.title));
    if title.is_empty() {
        return Err(anyhow!("Empty title"));
    }

    let media_type_str = cell(record, Some(columns.media_type));
    let media_type = MediaType::from_label(media_type_str)
        .ok_or_else(|| anyhow!("Unknown media type '{}' for '{}'", media_type_str, title))?;

    let date_str = cell(record, Some(columns.date));
    let date_watched = parse_date(date_str)
        .ok_or_else(|| anyhow!("Failed to parse date '{}' for '{}'", date_str, title))?;

    let rating = match optional_cell(record, columns.rating) {
        Some(rating_str) => Some(
            rating_str
                .replace(',', ".")
                .parse::<f64>()
                .ok()
                .filter(|r| r.is_finite())
                .ok_or_else(|| anyhow!("Failed to parse rating '{}' for '{}'", rating_str, title))?,
        ),
        None => None,
    };

    let mut event = WatchEvent::new(title, media_type, date_watched);
    if let Some(rating) = rating {
        event = event.with_rating(rating);
    }
    if let Some(platform) = optional_cell(record, columns.platform) {
        event = event.with_platform(platform);
    }
    if let Some(imdb_id) = optional_cell(record, columns.imdb_id) {
        event = event.with_imdb_id(imdb_id);
    }
    Ok(event)
}

pub(crate) fn parse_date(value: &str) -> Option<NaiveDate> {
    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(value, format).ok())
}
