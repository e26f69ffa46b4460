use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum MediaType {
    Movie,
    Series,
}

impl MediaType {
    /// Map a spreadsheet label ("Movie", "Series", "TV Series", ...) to a media type.
    ///
    /// Matching is case-insensitive and ignores surrounding whitespace.
    /// Returns None for labels that are neither a movie nor a series.
    pub fn from_label(label: &str) -> Option<Self> {
        match label.trim().to_lowercase().as_str() {
            "movie" | "film" | "tv movie" => Some(MediaType::Movie),
            "series" | "show" | "tv" | "tv series" | "tv show" | "tv mini series" | "episode"
            | "tv episode" => Some(MediaType::Series),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            MediaType::Movie => "Movie",
            MediaType::Series => "Series",
        }
    }
}

impl fmt::Display for MediaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
