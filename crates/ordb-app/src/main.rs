use std::future::Future;
use std::pin::Pin;
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use ordb_config::Config;
use ordb_lang_bokmaal::BokmaalLoader;
use ordb_pager::ansi;
use tokio::signal;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

pub mod cli;
pub mod controller;
pub mod inflection;
pub mod render;
pub mod state;

#[cfg(test)]
mod tests;

use self::cli::Args;
use self::controller::LookupController;
use self::state::AppState;

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    let args = Args::parse();

    // Logs go to stderr, stdout belongs to the pager
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| args.log_filter().into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    // Shutdown future (Ctrl+C)
    let shutdown = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("failed to listen for ctrl+c: {e}");
            std::future::pending::<()>().await;
        }
    };

    match run(args, shutdown).await {
        Ok(RunOutcome::Completed) => ExitCode::SUCCESS,
        Ok(RunOutcome::Interrupted) => {
            println!("{}", ansi::RESET);
            eprintln!("Search interrupted.");
            // The pager thread may still be blocked reading stdin
            std::process::exit(130);
        }
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    Completed,
    Interrupted,
}

pub async fn run(args: Args, shutdown: impl Future<Output = ()>) -> anyhow::Result<RunOutcome> {
    tokio::pin!(shutdown);

    let config = Config::load(args.config.as_deref()).context("Failed to load configuration")?;
    let state = AppState::new(&args, config)?;

    let corpus = BokmaalLoader::open(&state.config.database_path)
        .await
        .with_context(|| {
            format!(
                "Cannot open dictionary at {}",
                state.config.database_path.display()
            )
        })?;

    let controller = LookupController::new(&state, &corpus);
    let lookup = async {
        if args.stats {
            controller.statistics().await
        } else {
            controller.run(args.query.as_deref().unwrap_or_default()).await
        }
    };
    let rendered = tokio::select! {
        _ = &mut shutdown => {
            tracing::info!("Shutdown requested");
            None
        }
        result = lookup => Some(result),
    };

    corpus.close().await;

    let Some(text) = rendered else {
        return Ok(RunOutcome::Interrupted);
    };
    let text = text?;

    let pager = state.pager.clone();
    match until_shutdown(move || pager.page(&text), shutdown).await? {
        Some(outcome) => {
            let outcome = outcome?;
            tracing::debug!("Pager finished: {outcome:?}");
            Ok(RunOutcome::Completed)
        }
        None => {
            tracing::info!("Shutdown requested while paging");
            Ok(RunOutcome::Interrupted)
        }
    }
}

/// Run a blocking job off the runtime, giving up on it when `shutdown` fires
pub async fn until_shutdown<T, F>(
    job: F,
    shutdown: Pin<&mut impl Future<Output = ()>>,
) -> anyhow::Result<Option<T>>
where
    F: FnOnce() -> T + Send + 'static,
    T: Send + 'static,
{
    let task = tokio::task::spawn_blocking(job);
    tokio::select! {
        _ = shutdown => Ok(None),
        result = task => Ok(Some(result.context("Pager task panicked")?)),
    }
}
