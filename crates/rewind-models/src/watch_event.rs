use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use crate::media::MediaType;

/// One row of the watch log.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WatchEvent {
    pub title: String,
    pub media_type: MediaType,
    pub date_watched: NaiveDate,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>, // User-assigned, scale is whatever the log uses
    #[serde(skip_serializing_if = "Option::is_none")]
    pub platform: Option<String>, // Where it was watched (Netflix, cinema, ...)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub imdb_id: Option<String>, // Enables exact lookup instead of title search
}

impl WatchEvent {
    pub fn new(title: impl Into<String>, media_type: MediaType, date_watched: NaiveDate) -> Self {
        Self {
            title: title.into(),
            media_type,
            date_watched,
            rating: None,
            platform: None,
            imdb_id: None,
        }
    }

    pub fn with_rating(mut self, rating: f64) -> Self {
        self.rating = Some(rating);
        self
    }

    pub fn with_platform(mut self, platform: impl Into<String>) -> Self {
        self.platform = Some(platform.into());
        self
    }

    pub fn with_imdb_id(mut self, imdb_id: impl Into<String>) -> Self {
        self.imdb_id = Some(imdb_id.into());
        self
    }
}
