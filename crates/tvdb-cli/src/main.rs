//! tvdb - command line client for The TVDB API.

/// Application configuration (TOML).
mod config;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::instrument;
use tracing_subscriber::filter::EnvFilter;
#[cfg(not(feature = "otel"))]
use tracing_subscriber::fmt;
#[cfg(feature = "otel")]
use tracing_subscriber::layer::SubscriberExt;
#[cfg(feature = "otel")]
use tracing_subscriber::util::SubscriberInitExt;
use url::Url;

use crate::config::{AppConfig, resolve_config_path};
use tvdb_api::tvdb::{Episode, LocalTvdbApi, QueryOption, TvdbClient};

/// CLI argument parser.
#[derive(Parser)]
#[command(about, version)]
struct Cli {
    /// Override config directory.
    #[arg(long, global = true)]
    dir: Option<PathBuf>,

    /// Response language (overrides the config file, e.g. "fr").
    #[arg(long, global = true)]
    language: Option<String>,

    /// Subcommand to run.
    #[command(subcommand)]
    command: Commands,
}

/// Available subcommands.
#[derive(Subcommand)]
enum Commands {
    /// List languages supported by The TVDB.
    Languages,
    /// Search series by name.
    Search(SearchArgs),
    /// Show series details.
    Series(SeriesArgs),
    /// List episodes of a series.
    Episodes(EpisodesArgs),
    /// Store credentials and defaults in the config file.
    Config(ConfigArgs),
}

/// Arguments for the `search` subcommand.
#[derive(clap::Args)]
struct SearchArgs {
    /// Series name (e.g. "The Simpsons").
    name: String,
}

/// Arguments for the `series` subcommand.
#[derive(clap::Args)]
struct SeriesArgs {
    /// The TVDB series ID (e.g. 71663).
    id: u64,
}

/// Arguments for the `episodes` subcommand.
#[derive(clap::Args)]
struct EpisodesArgs {
    /// The TVDB series ID (e.g. 71663).
    id: u64,
    /// Filter by aired season number.
    #[arg(long)]
    aired_season: Option<u32>,
    /// Filter by aired episode number.
    #[arg(long)]
    aired_episode: Option<u32>,
    /// Filter by DVD season number.
    #[arg(long)]
    dvd_season: Option<u32>,
    /// Filter by DVD episode number.
    #[arg(long)]
    dvd_episode: Option<u32>,
    /// Filter by absolute episode number.
    #[arg(long)]
    absolute_number: Option<u32>,
}

impl EpisodesArgs {
    /// Query filters for the given flags, in flag order.
    fn filters(&self) -> Vec<QueryOption> {
        [
            self.aired_season.map(QueryOption::aired_season),
            self.aired_episode.map(QueryOption::aired_episode),
            self.dvd_season.map(QueryOption::dvd_season),
            self.dvd_episode.map(QueryOption::dvd_episode),
            self.absolute_number.map(QueryOption::absolute_number),
        ]
        .into_iter()
        .flatten()
        .collect()
    }
}

/// Arguments for the `config` subcommand.
#[derive(clap::Args)]
struct ConfigArgs {
    /// API key.
    #[arg(long)]
    api_key: Option<String>,
    /// User key.
    #[arg(long)]
    user_key: Option<String>,
    /// Username.
    #[arg(long)]
    username: Option<String>,
    /// Request timeout in seconds.
    #[arg(long)]
    timeout_secs: Option<u64>,
    /// API base URL override.
    #[arg(long)]
    base_url: Option<Url>,
}

/// Loads the config and logs in.
///
/// Credentials come from the config file, then `TVDB_*` environment
/// variables; `language` overrides the configured language.
///
/// # Errors
///
/// Returns an error if the config cannot be loaded or login fails.
#[instrument(skip_all)]
async fn build_tvdb_client(dir: Option<&PathBuf>, language: Option<&str>) -> Result<TvdbClient> {
    let path = resolve_config_path(dir.map(PathBuf::as_path))?;
    let config = AppConfig::load(&path)?.with_env(|key| std::env::var(key).ok());

    let mut builder = TvdbClient::builder()
        .options(config.client_options())
        .user_agent(concat!(
            env!("CARGO_PKG_NAME"),
            "/",
            env!("CARGO_PKG_VERSION")
        ));
    if let Some(lang) = language {
        builder = builder.language(lang);
    }
    if let Some(timeout) = config.timeout() {
        builder = builder.timeout(timeout);
    }
    if let Some(ref base_url) = config.tvdb.base_url {
        let url = Url::parse(base_url)
            .with_context(|| format!("invalid base_url in {}", path.display()))?;
        builder = builder.base_url(url);
    }

    builder.build().await.context("failed to build TVDB client")
}

/// Runs the `languages` subcommand.
///
/// # Errors
///
/// Returns an error if the client fails to build or the API request fails.
#[instrument(skip_all)]
async fn run_languages(client: &TvdbClient) -> Result<()> {
    let languages = client
        .languages()
        .await
        .context("TVDB languages request failed")?;

    tracing::info!("ID\tCode\tName\t\tEnglish Name");
    for language in &languages {
        tracing::info!(
            "{}\t{}\t{}\t\t{}",
            language.id,
            language.abbreviation,
            language.name,
            language.english_name,
        );
    }

    Ok(())
}

/// Runs the `search` subcommand.
///
/// # Errors
///
/// Returns an error if the API request fails.
#[instrument(skip_all)]
async fn run_search(client: &TvdbClient, args: &SearchArgs) -> Result<()> {
    let results = client
        .search_series_by_name(&args.name)
        .await
        .context("TVDB search/series request failed")?;

    tracing::info!(
        "Found {} series matching '{}'",
        results.len(),
        args.name
    );
    for series in &results {
        tracing::info!(
            "* {} (id: {}, first aired: {}, network: {})",
            series.series_name,
            series.id,
            or_dash(&series.first_aired),
            or_dash(&series.network),
        );
    }

    Ok(())
}

/// Runs the `series` subcommand.
///
/// # Errors
///
/// Returns an error if the API request fails.
#[instrument(skip_all)]
async fn run_series(client: &TvdbClient, args: &SeriesArgs) -> Result<()> {
    let series = client
        .series_by_id(args.id)
        .await
        .context("TVDB series request failed")?;

    if series.id == 0 {
        tracing::info!("No series found for ID {}", args.id);
        return Ok(());
    }

    tracing::info!("ID: {}", series.id);
    tracing::info!("Name: {}", series.series_name);
    tracing::info!("Status: {}", or_dash(&series.status));
    tracing::info!("First Aired: {}", or_dash(&series.first_aired));
    tracing::info!("Network: {}", or_dash(&series.network));
    tracing::info!("Runtime: {}", or_dash(&series.runtime));
    tracing::info!("Genre: {}", series.genre.join(", "));
    tracing::info!("IMDB: {}", or_dash(&series.imdb_id));
    tracing::info!("Rating: {} ({} votes)", series.site_rating, series.site_rating_count);
    tracing::info!("Overview: {}", or_dash(&series.overview));

    Ok(())
}

/// Runs the `episodes` subcommand.
///
/// # Errors
///
/// Returns an error if any page request fails.
#[instrument(skip_all)]
async fn run_episodes(client: &TvdbClient, args: &EpisodesArgs) -> Result<()> {
    let filters = args.filters();
    let episodes = client
        .episodes_by_series_id(args.id, &filters)
        .await
        .context("TVDB episodes request failed")?;

    tracing::info!("Series {} has {} episode(s)", args.id, episodes.len());
    for episode in &episodes {
        tracing::info!("- {}", format_episode(episode));
    }

    Ok(())
}

/// Runs the `config` subcommand.
///
/// # Errors
///
/// Returns an error if the config cannot be loaded or saved.
#[instrument(skip_all)]
fn run_config(args: &ConfigArgs, dir: Option<&PathBuf>, language: Option<&str>) -> Result<()> {
    let path = resolve_config_path(dir.map(PathBuf::as_path))?;
    let mut config = AppConfig::load(&path)?;

    if let Some(ref v) = args.api_key {
        config.tvdb.api_key = Some(v.clone());
    }
    if let Some(ref v) = args.user_key {
        config.tvdb.user_key = Some(v.clone());
    }
    if let Some(ref v) = args.username {
        config.tvdb.username = Some(v.clone());
    }
    if let Some(v) = language {
        config.tvdb.language = Some(String::from(v));
    }
    if let Some(v) = args.timeout_secs {
        config.tvdb.timeout_secs = Some(v);
    }
    if let Some(ref v) = args.base_url {
        config.tvdb.base_url = Some(v.to_string());
    }

    config.save(&path)?;
    tracing::info!("Saved config to {}", path.display());
    Ok(())
}

/// Formats an episode as `S01E02: Title`.
fn format_episode(episode: &Episode) -> String {
    format!(
        "S{:02}E{:02}: {}",
        episode.aired_season,
        episode.aired_episode_number,
        or_dash(&episode.episode_name),
    )
}

/// Returns `"-"` for empty strings.
fn or_dash(value: &str) -> &str {
    if value.is_empty() { "-" } else { value }
}

/// Entry point.
///
/// # Errors
///
/// Returns an error if subcommand execution fails.
#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    #[cfg(not(feature = "otel"))]
    {
        fmt()
            .with_env_filter(
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
            )
            .with_target(false)
            .init();
    }

    #[cfg(feature = "otel")]
    {
        let env_filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
        let fmt_layer = tracing_subscriber::fmt::layer().with_target(false);

        let otel_layer = std::env::var("OTEL_EXPORTER_OTLP_ENDPOINT")
            .ok()
            .and_then(|_| {
                let exporter = opentelemetry_otlp::SpanExporter::builder()
                    .with_http()
                    .build()
                    .ok()?;

                let tracer_provider = opentelemetry_sdk::trace::SdkTracerProvider::builder()
                    .with_simple_exporter(exporter)
                    .build();

                let tracer = opentelemetry::trace::TracerProvider::tracer(
                    &tracer_provider,
                    env!("CARGO_PKG_NAME"),
                );
                opentelemetry::global::set_tracer_provider(tracer_provider);

                Some(tracing_opentelemetry::layer().with_tracer(tracer))
            });

        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt_layer)
            .with(otel_layer)
            .init();
    }

    let cli = Cli::parse();
    let dir = cli.dir.as_ref();
    let language = cli.language.as_deref();

    match cli.command {
        Commands::Config(ref args) => run_config(args, dir, language),
        Commands::Languages => {
            let client = build_tvdb_client(dir, language).await?;
            run_languages(&client).await
        }
        Commands::Search(ref args) => {
            let client = build_tvdb_client(dir, language).await?;
            run_search(&client, args).await
        }
        Commands::Series(ref args) => {
            let client = build_tvdb_client(dir, language).await?;
            run_series(&client, args).await
        }
        Commands::Episodes(ref args) => {
            let client = build_tvdb_client(dir, language).await?;
            run_episodes(&client, args).await
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn episodes_args(aired_season: Option<u32>, aired_episode: Option<u32>) -> EpisodesArgs {
        EpisodesArgs {
            id: 71_663,
            aired_season,
            aired_episode,
            dvd_season: None,
            dvd_episode: None,
            absolute_number: None,
        }
    }

    #[test]
    fn test_filters_empty_without_flags() {
        // Arrange
        let args = episodes_args(None, None);

        // Act
        let filters = args.filters();

        // Assert
        assert!(filters.is_empty());
    }

    #[test]
    fn test_filters_from_flags() {
        // Arrange
        let args = episodes_args(Some(8), Some(1));

        // Act
        let filters = args.filters();

        // Assert
        assert_eq!(
            filters,
            vec![QueryOption::aired_season(8), QueryOption::aired_episode(1)]
        );
    }

    #[test]
    fn test_format_episode() {
        // Arrange
        let episode = Episode {
            aired_season: 8,
            aired_episode_number: 1,
            episode_name: String::from("Treehouse of Horror VII"),
            ..Episode::default()
        };

        // Act & Assert
        assert_eq!(format_episode(&episode), "S08E01: Treehouse of Horror VII");
    }

    #[test]
    fn test_format_episode_without_name() {
        // Arrange
        let episode = Episode::default();

        // Act & Assert
        assert_eq!(format_episode(&episode), "S00E00: -");
    }
}
