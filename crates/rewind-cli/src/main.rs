use clap::{ArgAction, Parser};
use commands::review::{self, ReviewArgs};
use rewind_config::PathManager;
use std::path::PathBuf;

mod commands;
mod logging;
mod output;

#[derive(Parser)]
#[command(name = "rewind")]
#[command(about = "Rewind - Your year of movies and series, in review")]
#[command(long_about = "Read a tab-separated watch log, look every title up on TMDB and print year-in-review statistics: time watched, favourite genres, people, studios and platforms, and when you watched the most.")]
#[command(version)]
struct Cli {
    /// Watch log to review (TSV with Date, Movie or Series, Name, Platform, Rating, IMDB ID columns)
    #[arg(value_name = "INPUT")]
    input: PathBuf,

    /// TMDB API key (falls back to TMDB_API_KEY, then the stored credential)
    #[arg(long, value_name = "KEY")]
    api_key: Option<String>,

    /// Only review entries watched in this year
    #[arg(long, value_name = "YYYY")]
    year: Option<i32>,

    /// Maximum concurrent TMDB requests
    #[arg(long, value_name = "N")]
    concurrency: Option<usize>,

    /// Length of each ranking
    #[arg(long, value_name = "N")]
    top: Option<usize>,

    /// Config file (default: <config dir>/rewind/config.toml)
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Skip rows that cannot be parsed instead of failing
    #[arg(long, action = ArgAction::SetTrue)]
    skip_malformed_rows: bool,

    /// Enable verbose output (use multiple times for more verbosity: -v, -vv)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,

    /// Suppress all output except errors and the report
    #[arg(short, long)]
    quiet: bool,

    /// Output format
    #[arg(long, default_value = "human", value_enum)]
    output: output::OutputFormat,

    /// Write logs to a daily-rotated file instead of stderr (default: <config dir>/rewind/logs/rewind.log)
    #[arg(long, value_name = "PATH", num_args = 0..=1)]
    log_file: Option<Option<PathBuf>>,
}

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();

    let log_file = cli
        .log_file
        .clone()
        .map(|path| path.unwrap_or_else(|| PathManager::default().default_log_file()));
    logging::init_logging_with_file(cli.verbose, cli.quiet, log_file)
        .map_err(|e| color_eyre::eyre::eyre!("{}", e))?;

    let output = output::Output::new(cli.output, cli.quiet);

    let args = ReviewArgs {
        input: cli.input,
        api_key: cli.api_key,
        year: cli.year,
        concurrency: cli.concurrency,
        top: cli.top,
        config: cli.config,
        skip_malformed_rows: cli.skip_malformed_rows,
    };

    if let Err(e) = review::run_review(args, &output).await {
        // color-eyre prints the report for humans; JSON consumers get a status line
        if output.format() != output::OutputFormat::Human {
            output.error(format!("{:#}", e));
            std::process::exit(1);
        }
        return Err(e);
    }

    Ok(())
}
