use rewind_models::Metadata;
use serde::Deserialize;

/// Caps applied to people lists when building metadata
#[derive(Debug, Clone, Copy)]
pub struct CreditLimits {
    pub max_cast: usize,
    pub max_directors: usize,
}

impl Default for CreditLimits {
    fn default() -> Self {
        Self {
            max_cast: 15,
            max_directors: 2,
        }
    }
}

#[derive(Debug, Deserialize, Default)]
pub struct FindResponse {
    #[serde(default)]
    pub movie_results: Vec<IdResult>,
    #[serde(default)]
    pub tv_results: Vec<IdResult>,
    #[serde(default)]
    pub tv_episode_results: Vec<EpisodeResult>,
}

#[derive(Debug, Deserialize)]
pub struct IdResult {
    pub id: u64,
}

#[derive(Debug, Deserialize)]
pub struct EpisodeResult {
    pub id: u64,
    pub show_id: u64,
    pub season_number: u32,
    pub episode_number: u32,
}

#[derive(Debug, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub results: Vec<IdResult>,
}

#[derive(Debug, Deserialize)]
pub struct NamedItem {
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct CrewMember {
    pub name: String,
    #[serde(default)]
    pub job: String,
}

#[derive(Debug, Deserialize, Default)]
pub struct Credits {
    #[serde(default)]
    pub cast: Vec<NamedItem>,
    #[serde(default)]
    pub crew: Vec<CrewMember>,
}

#[derive(Debug, Deserialize)]
pub struct MovieDetails {
    pub id: u64,
    pub title: Option<String>,
    pub release_date: Option<String>,
    pub runtime: Option<u32>,
    #[serde(default)]
    pub genres: Vec<NamedItem>,
    #[serde(default)]
    pub production_companies: Vec<NamedItem>,
    #[serde(default)]
    pub credits: Credits,
}

#[derive(Debug, Deserialize)]
pub struct ShowDetails {
    pub id: u64,
    pub name: Option<String>,
    pub first_air_date: Option<String>,
    #[serde(default)]
    pub episode_run_time: Vec<u32>,
    #[serde(default)]
    pub genres: Vec<NamedItem>,
    #[serde(default)]
    pub production_companies: Vec<NamedItem>,
    #[serde(default)]
    pub created_by: Vec<NamedItem>,
    #[serde(default)]
    pub credits: Credits,
}

#[derive(Debug, Deserialize)]
pub struct EpisodeDetails {
    pub air_date: Option<String>,
    pub runtime: Option<u32>,
    #[serde(default)]
    pub crew: Vec<CrewMember>,
    #[serde(default)]
    pub credits: Credits,
}

/// Year component of a TMDB "YYYY-MM-DD" date (empty strings are common)
pub fn year_from_date(date: Option<&str>) -> Option<i32> {
    date.and_then(|d| d.split('-').next())
        .filter(|y| y.len() == 4)
        .and_then(|y| y.parse::<i32>().ok())
}

fn names(items: &[NamedItem]) -> Vec<String> {
    items.iter().map(|item| item.name.clone()).collect()
}

fn directors(crew: &[CrewMember], max: usize) -> Vec<String> {
    crew.iter()
        .filter(|member| member.job == "Director")
        .map(|member| member.name.clone())
        .take(max)
        .collect()
}

pub fn movie_metadata(details: MovieDetails, limits: CreditLimits) -> Metadata {
    Metadata {
        found: true,
        release_year: year_from_date(details.release_date.as_deref()),
        genres: details.genres.into_iter().map(|g| g.name).collect(),
        runtime_minutes: details.runtime.filter(|r| *r > 0),
        tmdb_id: Some(details.id),
        canonical_title: details.title,
        directors: directors(&details.credits.crew, limits.max_directors),
        cast: names(&details.credits.cast).into_iter().take(limits.max_cast).collect(),
        production_companies: names(&details.production_companies),
    }
}

/// Metadata for a series, or for one episode of it when the episode is known.
///
/// Episode runtime wins when TMDB has it; otherwise the show's episode runtimes
/// are averaged. Directors come from the episode, falling back to the show's creators.
pub fn series_metadata(show: ShowDetails, episode: Option<EpisodeDetails>, limits: CreditLimits) -> Metadata {
    let average_runtime = if show.episode_run_time.is_empty() {
        None
    } else {
        let total: u32 = show.episode_run_time.iter().sum();
        Some(total / show.episode_run_time.len() as u32)
    };

    let (runtime, release_year, directors_list) = match &episode {
        Some(ep) => {
            let crew = if ep.credits.crew.is_empty() { &ep.crew } else { &ep.credits.crew };
            let mut episode_directors = directors(crew, limits.max_directors);
            if episode_directors.is_empty() {
                episode_directors = names(&show.created_by).into_iter().take(limits.max_directors).collect();
            }
            (
                ep.runtime.filter(|r| *r > 0).or(average_runtime),
                year_from_date(ep.air_date.as_deref()).or_else(|| year_from_date(show.first_air_date.as_deref())),
                episode_directors,
            )
        }
        None => (
            average_runtime,
            year_from_date(show.first_air_date.as_deref()),
            names(&show.created_by).into_iter().take(limits.max_directors).collect(),
        ),
    };

    Metadata {
        found: true,
        release_year,
        genres: show.genres.into_iter().map(|g| g.name).collect(),
        runtime_minutes: runtime.filter(|r| *r > 0),
        tmdb_id: Some(show.id),
        canonical_title: show.name,
        directors: directors_list,
        cast: names(&show.credits.cast).into_iter().take(limits.max_cast).collect(),
        production_companies: names(&show.production_companies),
    }
}
