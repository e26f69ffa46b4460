use super::prompts::prompt_password;
use super::report;
use super::review_ui::{is_interactive, ReviewUI};
use crate::output::{Output, OutputFormat};
use color_eyre::eyre::{eyre, Context};
use color_eyre::Result;
use rewind_config::{Config, CredentialStore, PathManager};
use rewind_core::{aggregate, enrich_events, filter_by_year, AggregateOptions};
use rewind_sources::{parse_watch_log, ParseOptions, TmdbClient, TmdbSettings};
use serde_json::json;
use std::path::{Path, PathBuf};

const API_KEY_ENV: &str = "TMDB_API_KEY";

/// Command-line overrides for one review run
#[derive(Debug, Clone, Default)]
pub struct ReviewArgs {
    pub input: PathBuf,
    pub api_key: Option<String>,
    pub year: Option<i32>,
    pub concurrency: Option<usize>,
    pub top: Option<usize>,
    pub config: Option<PathBuf>,
    pub skip_malformed_rows: bool,
}

pub async fn run_review(args: ReviewArgs, output: &Output) -> Result<()> {
    tracing::debug!(input = %args.input.display(), "Review started");

    let path_manager = PathManager::default();
    let config_path = args.config.clone().unwrap_or_else(|| path_manager.config_file());
    let config = load_config(&config_path, &args)?;

    let events = parse_watch_log(
        &args.input,
        &ParseOptions {
            skip_malformed_rows: config.input.skip_malformed_rows,
        },
    )
    .map_err(|e| eyre!("{:#}", e))?;
    let parsed = events.len();

    let events = filter_by_year(events, config.report.year);
    if let Some(year) = config.report.year {
        output.info(format!("{} of {} entries watched in {}", events.len(), parsed, year));
    } else {
        output.info(format!("{} entries in the watch log", parsed));
    }

    // Nothing to look up, so no key is needed either
    let outcome = if events.is_empty() {
        rewind_core::EnrichmentOutcome {
            events: Vec::new(),
            stats: Default::default(),
        }
    } else {
        let api_key = resolve_api_key(args.api_key.clone(), &path_manager, output)?;
        let client = TmdbClient::new(TmdbSettings::from_config(api_key, &config))
            .map_err(|e| eyre!("Failed to create TMDB client: {}", e))?;

        let ui = ReviewUI::new(events.len(), output.is_quiet());
        let outcome = enrich_events(&client, events, config.tmdb.concurrency, |processed| {
            ui.set_position(processed)
        })
        .await;
        ui.finish();
        outcome
    };

    let stats = &outcome.stats;
    if stats.failed > 0 {
        let breakdown = stats
            .error_counts
            .iter()
            .map(|(category, count)| format!("{} {}", count, category))
            .collect::<Vec<_>>()
            .join(", ");
        output.warn(format!("{} lookups failed ({})", stats.failed, breakdown));
        if stats.error_counts.contains_key("unauthorized") {
            output.warn(format!(
                "TMDB rejected the API key; pass --api-key or set {}",
                API_KEY_ENV
            ));
        }
    }
    if stats.not_found > 0 {
        output.warn(format!("{} titles had no TMDB match", stats.not_found));
    }

    let summary = aggregate(&outcome.events, &AggregateOptions::from_config(&config.report));

    match output.format() {
        OutputFormat::Human => {
            output.report(&report::render(&summary));
            output.success(format!(
                "Reviewed {} titles ({} resolved)",
                summary.total_events,
                summary.total_events - summary.unresolved_events
            ));
        }
        OutputFormat::Json | OutputFormat::JsonPretty => {
            output.json(&json!({
                "year": config.report.year,
                "lookups": stats,
                "summary": summary,
            }));
        }
    }

    Ok(())
}

/// Load the config file (defaults when absent), apply flags, validate
fn load_config(path: &Path, args: &ReviewArgs) -> Result<Config> {
    let mut config = Config::load_or_default(path)
        .map_err(|e| eyre!("{:#}", e))
        .wrap_err_with(|| format!("Failed to load config from {}", path.display()))?;
    apply_overrides(&mut config, args);
    config
        .validate()
        .map_err(|e| eyre!("Invalid configuration: {}", e))?;
    Ok(config)
}

fn apply_overrides(config: &mut Config, args: &ReviewArgs) {
    if let Some(year) = args.year {
        config.report.year = Some(year);
    }
    if let Some(concurrency) = args.concurrency {
        config.tmdb.concurrency = concurrency;
    }
    if let Some(top) = args.top {
        config.report.top_n = top;
    }
    if args.skip_malformed_rows {
        config.input.skip_malformed_rows = true;
    }
}

/// First non-blank key, in order of precedence: flag, environment, credential store
fn pick_api_key(flag: Option<String>, env: Option<String>, stored: Option<&String>) -> Option<String> {
    flag.into_iter()
        .chain(env)
        .chain(stored.cloned())
        .map(|key| key.trim().to_string())
        .find(|key| !key.is_empty())
}

fn resolve_api_key(flag: Option<String>, path_manager: &PathManager, output: &Output) -> Result<String> {
    let credentials_file = path_manager.credentials_file();
    let mut cred_store = CredentialStore::new(credentials_file.clone());
    cred_store.load().map_err(|e| {
        eyre!("Failed to load credentials from {}: {}", credentials_file.display(), e)
    })?;

    if let Some(key) = pick_api_key(flag, std::env::var(API_KEY_ENV).ok(), cred_store.get_tmdb_api_key()) {
        return Ok(key);
    }

    if !is_interactive() {
        return Err(eyre!(
            "No TMDB API key configured. Pass --api-key, set {}, or run interactively to store one",
            API_KEY_ENV
        ));
    }

    let key = prompt_password("TMDB API key")?.trim().to_string();
    if key.is_empty() {
        return Err(eyre!("A TMDB API key is required"));
    }

    cred_store.set_tmdb_api_key(key.clone());
    cred_store.save().map_err(|e| {
        eyre!("Failed to save credentials to {}: {}", credentials_file.display(), e)
    })?;
    output.success(format!("API key saved to {}", credentials_file.display()));

    Ok(key)
}
