use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

pub const DEFAULT_TMDB_BASE_URL: &str = "https://api.themoviedb.org/3";

#[derive(Debug, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub tmdb: TmdbConfig,
    #[serde(default)]
    pub input: InputConfig,
    #[serde(default)]
    pub report: ReportConfig,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct TmdbConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_language")]
    pub language: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
    /// Lookups in flight at once
    #[serde(default = "default_concurrency")]
    pub concurrency: usize,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct InputConfig {
    /// Skip rows that fail to parse (with a warning) instead of aborting the run
    #[serde(default)]
    pub skip_malformed_rows: bool,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ReportConfig {
    /// Restrict the review to one calendar year of watch dates
    #[serde(default)]
    pub year: Option<i32>,
    #[serde(default = "default_top_n")]
    pub top_n: usize,
    /// Minimum rated entries before a genre, actor or company is ranked by rating.
    /// Keeps "one hit wonders" out of the best-rated lists.
    #[serde(default = "default_min_rated_entries")]
    pub min_rated_entries: u64,
    #[serde(default = "default_min_rated_entries_directors")]
    pub min_rated_entries_directors: u64,
    #[serde(default = "default_max_cast")]
    pub max_cast: usize,
    #[serde(default = "default_max_directors")]
    pub max_directors: usize,
}

fn default_base_url() -> String {
    DEFAULT_TMDB_BASE_URL.to_string()
}

fn default_language() -> String {
    "en-US".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_max_retries() -> u32 {
    2
}

fn default_concurrency() -> usize {
    4
}

fn default_top_n() -> usize {
    20
}

fn default_min_rated_entries() -> u64 {
    5
}

fn default_min_rated_entries_directors() -> u64 {
    2
}

fn default_max_cast() -> usize {
    15
}

fn default_max_directors() -> usize {
    2
}

impl Default for TmdbConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            language: default_language(),
            timeout_secs: default_timeout_secs(),
            max_retries: default_max_retries(),
            concurrency: default_concurrency(),
        }
    }
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            year: None,
            top_n: default_top_n(),
            min_rated_entries: default_min_rated_entries(),
            min_rated_entries_directors: default_min_rated_entries_directors(),
            max_cast: default_max_cast(),
            max_directors: default_max_directors(),
        }
    }
}

impl Config {
    pub fn load_from_file(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Load the config file if it exists, otherwise fall back to defaults
    pub fn load_or_default(path: &Path) -> anyhow::Result<Self> {
        if path.exists() {
            debug!(path = %path.display(), "Loading config file");
            Self::load_from_file(path)
        } else {
            debug!(path = %path.display(), "No config file found, using defaults");
            Ok(Self::default())
        }
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if self.tmdb.base_url.trim().is_empty() {
            return Err(anyhow::anyhow!("tmdb.base_url cannot be empty"));
        }
        if self.tmdb.concurrency == 0 {
            return Err(anyhow::anyhow!("tmdb.concurrency must be at least 1"));
        }
        if self.tmdb.timeout_secs == 0 {
            return Err(anyhow::anyhow!("tmdb.timeout_secs must be at least 1"));
        }
        if self.report.top_n == 0 {
            return Err(anyhow::anyhow!("report.top_n must be at least 1"));
        }
        if let Some(year) = self.report.year {
            if !(1800..=9999).contains(&year) {
                return Err(anyhow::anyhow!("report.year is out of range: {}", year));
            }
        }
        Ok(())
    }
}
