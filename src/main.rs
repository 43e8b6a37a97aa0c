//! Command-line entry point: mirror one day of Gameday XML.

use chrono::NaiveDate;
use clap::Parser;
use color_eyre::eyre::{eyre, Result, WrapErr};
use mlbpipe::discovery::{index_url_for_date, GAMEDAY_BASE_URL};
use mlbpipe::{CoordinatorBuilder, RunSummary};
use reqwest::Url;
use std::path::PathBuf;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

/// Download game.xml, players.xml and inning_all.xml for every game of a day.
#[derive(Debug, Parser)]
#[command(name = "mlbpipe", version, about)]
struct Cli {
    /// Day to mirror, as YYYY-MM-DD.
    #[arg(short, long, conflicts_with = "index_url", required_unless_present = "index_url")]
    date: Option<NaiveDate>,

    /// Index page to scan instead of the one derived from --date.
    #[arg(long)]
    index_url: Option<Url>,

    /// Gameday root used with --date.
    #[arg(long, default_value = GAMEDAY_BASE_URL)]
    base_url: Url,

    /// Directory the game directories are written to.
    #[arg(short, long, default_value = ".")]
    output: PathBuf,

    /// Maximum number of concurrent fetches (0 for no limit).
    #[arg(long, default_value_t = mlbpipe::coordinator::DEFAULT_MAX_IN_FLIGHT)]
    max_in_flight: usize,

    /// Per-fetch deadline in seconds (0 for none).
    #[arg(long, default_value_t = mlbpipe::coordinator::DEFAULT_TIMEOUT.as_secs())]
    timeout: u64,

    /// Hide the progress bar.
    #[arg(short, long)]
    quiet: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "mlbpipe=info".into()),
        )
        .init();

    let cli = Cli::parse();

    let cancel = CancellationToken::new();
    let on_interrupt = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("Interrupted, cancelling outstanding fetches");
            on_interrupt.cancel();
        }
    });

    let summary = run(cli, cancel).await?;
    info!(
        games = summary.games,
        saved = summary.saved,
        failed = summary.failed,
        "Run complete"
    );
    Ok(())
}

/// Mirrors the day selected by `cli`.
///
/// Resources that could not be saved are only counted in the summary; an
/// error means the index itself could not be processed.
async fn run(cli: Cli, cancel: CancellationToken) -> Result<RunSummary> {
    let index = match (cli.index_url, cli.date) {
        (Some(url), _) => url,
        (None, Some(date)) => index_url_for_date(&cli.base_url, date)?,
        (None, None) => return Err(eyre!("either --date or --index-url is required")),
    };

    let mut builder = if cli.quiet {
        CoordinatorBuilder::hidden()
    } else {
        CoordinatorBuilder::new()
    }
    .directory(cli.output)
    .cancel_token(cancel);
    builder = match cli.max_in_flight {
        0 => builder.unbounded(),
        n => builder.max_in_flight(n),
    };
    builder = match cli.timeout {
        0 => builder.no_timeout(),
        secs => builder.timeout(Duration::from_secs(secs)),
    };
    let coordinator = builder.build()?;

    coordinator
        .run_index(&index)
        .await
        .wrap_err_with(|| format!("could not process index {}", index))
}
