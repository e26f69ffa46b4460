use async_trait::async_trait;
use rewind_models::{MediaType, Metadata, WatchEvent};
use crate::error::LookupError;

/// What a provider needs to identify a title
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupQuery {
    pub title: String,
    pub media_type: MediaType,
    pub imdb_id: Option<String>,
}

impl LookupQuery {
    pub fn new(title: impl Into<String>, media_type: MediaType) -> Self {
        Self {
            title: title.into(),
            media_type,
            imdb_id: None,
        }
    }

    pub fn from_event(event: &WatchEvent) -> Self {
        Self {
            title: event.title.clone(),
            media_type: event.media_type,
            imdb_id: event.imdb_id.clone().filter(|id| !id.trim().is_empty()),
        }
    }
}

#[async_trait]
pub trait MetadataProvider: Send + Sync {
    fn provider_name(&self) -> &str;

    /// Look up a title.
    ///
    /// A title the database does not know is `Ok(Metadata::not_found())`;
    /// `Err` is reserved for failures to ask (network, auth, rate limit).
    async fn lookup(&self, query: &LookupQuery) -> Result<Metadata, LookupError>;
}
