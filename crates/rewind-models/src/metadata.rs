use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Canonical metadata for a title, as returned by the movie database.
///
/// A failed or empty lookup is represented by `Metadata::not_found()` rather than
/// an error, so that the watch event still counts toward totals.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct Metadata {
    pub found: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub release_year: Option<i32>,
    #[serde(default)]
    pub genres: BTreeSet<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub runtime_minutes: Option<u32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub tmdb_id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub canonical_title: Option<String>,
    #[serde(default)]
    pub directors: Vec<String>,
    #[serde(default)]
    pub cast: Vec<String>,
    #[serde(default)]
    pub production_companies: Vec<String>,
}

impl Metadata {
    pub fn not_found() -> Self {
        Self::default()
    }

    /// Found metadata with only the fields the aggregator needs
    pub fn found(genres: &[&str], runtime_minutes: Option<u32>) -> Self {
        Self {
            found: true,
            genres: genres.iter().map(|g| g.to_string()).collect(),
            runtime_minutes,
            ..Self::default()
        }
    }

    /// Runtime that counts toward statistics: only for found titles
    pub fn counted_runtime(&self) -> Option<u32> {
        if self.found {
            self.runtime_minutes
        } else {
            None
        }
    }
}
