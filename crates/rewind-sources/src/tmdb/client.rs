use crate::error::{LookupError, LookupResult};
use crate::tmdb::api::{self, CreditLimits, EpisodeDetails, EpisodeResult, FindResponse, MovieDetails, SearchResponse, ShowDetails};
use crate::traits::{LookupQuery, MetadataProvider};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use rewind_config::Config;
use rewind_models::{MediaType, Metadata};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, trace, warn};

const MAX_BACKOFF: Duration = Duration::from_secs(30);

/// Wait before retry number `attempt + 1`: the server's Retry-After when given,
/// else 1s, 2s, 4s, ... capped at `MAX_BACKOFF`.
pub(crate) fn retry_backoff(error: &LookupError, attempt: u32) -> Duration {
    match error {
        LookupError::RateLimited { retry_after: Some(retry_after) } => (*retry_after).min(MAX_BACKOFF),
        _ => Duration::from_secs(1u64 << attempt.min(5)).min(MAX_BACKOFF),
    }
}

/// IMDb ids are "tt" followed by digits; anything else must not reach the URL path
pub(crate) fn is_imdb_id(id: &str) -> bool {
    id.strip_prefix("tt")
        .is_some_and(|digits| !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()))
}

#[derive(Debug, Clone)]
pub struct TmdbSettings {
    pub api_key: String,
    pub base_url: String,
    pub language: String,
    pub timeout: Duration,
    pub max_retries: u32,
    pub limits: CreditLimits,
}

impl TmdbSettings {
    pub fn from_config(api_key: String, config: &Config) -> Self {
        Self {
            api_key,
            base_url: config.tmdb.base_url.clone(),
            language: config.tmdb.language.clone(),
            timeout: Duration::from_secs(config.tmdb.timeout_secs),
            max_retries: config.tmdb.max_retries,
            limits: CreditLimits {
                max_cast: config.report.max_cast,
                max_directors: config.report.max_directors,
            },
        }
    }
}

#[derive(Clone)]
pub struct TmdbClient {
    client: Client,
    settings: TmdbSettings,
}

impl TmdbClient {
    pub fn new(settings: TmdbSettings) -> LookupResult<Self> {
        let client = Client::builder()
            .timeout(settings.timeout)
            .user_agent(concat!("rewind/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { client, settings })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.settings.base_url.trim_end_matches('/'), path)
    }

    /// GET a TMDB endpoint, retrying rate limits and transient failures.
    ///
    /// Returns `Ok(None)` on 404 so callers can treat it as "not in the database".
    async fn get_json<T: DeserializeOwned>(&self, path: &str, params: &[(&str, &str)]) -> LookupResult<Option<T>> {
        let mut retries = 0;
        let max_retries = self.settings.max_retries;

        loop {
            match self.get_json_once(path, params).await {
                Ok(value) => return Ok(value),
                Err(e) if e.is_retryable() && retries < max_retries => {
                    let backoff = retry_backoff(&e, retries);
                    retries += 1;

                    warn!(
                        error = %e,
                        path = path,
                        retry = retries,
                        max_retries = max_retries,
                        backoff_ms = backoff.as_millis() as u64,
                        "Retrying TMDB request"
                    );

                    tokio::time::sleep(backoff).await;
                }
                Err(e) => return Err(e),
            }
        }
    }

    async fn get_json_once<T: DeserializeOwned>(&self, path: &str, params: &[(&str, &str)]) -> LookupResult<Option<T>> {
        let url = self.url(path);
        trace!(url = %url, "TMDB request");

        let response = self
            .client
            .get(&url)
            .query(&[("api_key", self.settings.api_key.as_str()), ("language", self.settings.language.as_str())])
            .query(params)
            .header("Accept", "application/json")
            .send()
            .await?;

        let status = response.status();
        match status {
            s if s.is_success() => {
                let body = response.json::<T>().await.map_err(|e| LookupError::InvalidResponse {
                    message: format!("{}: {}", path, e),
                })?;
                Ok(Some(body))
            }
            StatusCode::NOT_FOUND => Ok(None),
            StatusCode::UNAUTHORIZED => Err(LookupError::Unauthorized {
                message: "invalid or missing TMDB API key".to_string(),
            }),
            StatusCode::TOO_MANY_REQUESTS => {
                let retry_after = response
                    .headers()
                    .get(reqwest::header::RETRY_AFTER)
                    .and_then(|v| v.to_str().ok())
                    .and_then(|v| v.trim().parse::<u64>().ok())
                    .map(Duration::from_secs);
                Err(LookupError::RateLimited { retry_after })
            }
            _ => {
                let message = response.text().await.unwrap_or_else(|_| status.to_string());
                Err(LookupError::Http {
                    status: status.as_u16(),
                    message,
                })
            }
        }
    }

    async fn find_by_imdb_id(&self, imdb_id: &str) -> LookupResult<FindResponse> {
        let found = self
            .get_json::<FindResponse>(&format!("/find/{}", imdb_id), &[("external_source", "imdb_id")])
            .await?;
        Ok(found.unwrap_or_default())
    }

    async fn search_id(&self, title: &str, media_type: MediaType) -> LookupResult<Option<u64>> {
        let path = match media_type {
            MediaType::Movie => "/search/movie",
            MediaType::Series => "/search/tv",
        };
        let response = self.get_json::<SearchResponse>(path, &[("query", title)]).await?;
        Ok(response.and_then(|r| r.results.into_iter().next()).map(|r| r.id))
    }

    async fn movie_details(&self, tmdb_id: u64) -> LookupResult<Metadata> {
        let details = self
            .get_json::<MovieDetails>(&format!("/movie/{}", tmdb_id), &[("append_to_response", "credits")])
            .await?;
        Ok(details
            .map(|d| api::movie_metadata(d, self.settings.limits))
            .unwrap_or_else(Metadata::not_found))
    }

    async fn series_details(&self, show_id: u64, episode: Option<&EpisodeResult>) -> LookupResult<Metadata> {
        let Some(show) = self
            .get_json::<ShowDetails>(&format!("/tv/{}", show_id), &[("append_to_response", "credits")])
            .await?
        else {
            return Ok(Metadata::not_found());
        };

        let episode_details = match episode {
            Some(ep) => {
                self.get_json::<EpisodeDetails>(
                    &format!("/tv/{}/season/{}/episode/{}", show_id, ep.season_number, ep.episode_number),
                    &[("append_to_response", "credits")],
                )
                .await?
            }
            None => None,
        };

        Ok(api::series_metadata(show, episode_details, self.settings.limits))
    }

    /// Resolve a query to metadata: exact IMDb id match first, title search otherwise
    pub async fn lookup_metadata(&self, query: &LookupQuery) -> LookupResult<Metadata> {
        let imdb_id = query.imdb_id.as_deref().filter(|id| {
            let valid = is_imdb_id(id);
            if !valid {
                debug!(imdb_id = %id, title = %query.title, "Ignoring malformed IMDb id, searching by title");
            }
            valid
        });

        if let Some(imdb_id) = imdb_id {
            let found = self.find_by_imdb_id(imdb_id).await?;
            match query.media_type {
                MediaType::Movie => {
                    if let Some(movie) = found.movie_results.first() {
                        return self.movie_details(movie.id).await;
                    }
                }
                MediaType::Series => {
                    // Series rows usually log a single episode
                    if let Some(episode) = found.tv_episode_results.first() {
                        return self.series_details(episode.show_id, Some(episode)).await;
                    }
                    if let Some(show) = found.tv_results.first() {
                        return self.series_details(show.id, None).await;
                    }
                }
            }
            debug!(imdb_id = %imdb_id, title = %query.title, "No TMDB match for IMDb id");
            return Ok(Metadata::not_found());
        }

        match self.search_id(&query.title, query.media_type).await? {
            Some(tmdb_id) => match query.media_type {
                MediaType::Movie => self.movie_details(tmdb_id).await,
                MediaType::Series => self.series_details(tmdb_id, None).await,
            },
            None => {
                debug!(title = %query.title, media_type = %query.media_type, "No TMDB search results");
                Ok(Metadata::not_found())
            }
        }
    }
}

#[async_trait]
impl MetadataProvider for TmdbClient {
    fn provider_name(&self) -> &str {
        "tmdb"
    }

    async fn lookup(&self, query: &LookupQuery) -> Result<Metadata, LookupError> {
        self.lookup_metadata(query).await
    }
}
