use std::future::Future;
use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use shobdo_config::Config;
use tokio::signal;

pub mod cli;
pub mod commands;
pub mod controller;
pub mod events;
pub mod logging;
pub mod render;
pub mod state;
pub mod ui;

#[cfg(test)]
mod tests;

use self::cli::Cli;
use self::controller::AppController;
use self::state::AppState;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(e) = dotenvy::dotenv() {
        if !e.not_found() {
            eprintln!("Failed to read .env: {e}");
        }
    }

    let config = match load_config(&cli) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {e:#}");
            return ExitCode::FAILURE;
        }
    };

    logging::init(&config.log);

    let state = match AppState::new(config) {
        Ok(state) => Arc::new(state),
        Err(e) => {
            tracing::error!("startup failed: {e:#}");
            eprintln!("Error: {e:#}");
            return ExitCode::FAILURE;
        }
    };

    let result = match cli.command {
        Some(command) => commands::run_command(&state, command).await,
        None => {
            // Shutdown future (Ctrl+C)
            let shutdown = async {
                if let Err(e) = signal::ctrl_c().await {
                    tracing::error!("Failed to listen for ctrl+c: {e}");
                    std::future::pending::<()>().await;
                }
            };
            run(state, shutdown).await.map(|_| ExitCode::SUCCESS)
        }
    };

    result.unwrap_or_else(|e| {
        tracing::error!("{e:#}");
        eprintln!("Error: {e:#}");
        ExitCode::FAILURE
    })
}

/// Environment (or `--config` file) first, then command-line overrides
fn load_config(cli: &Cli) -> anyhow::Result<Config> {
    let mut config = match &cli.config {
        Some(path) => Config::from_file(path)?,
        None => Config::new(),
    };

    if let Some(path) = &cli.storage {
        config.storage.path = path.clone();
    }

    if cli.ephemeral {
        config.storage.ephemeral = true;
    }

    if let Some(model) = &cli.model {
        config.gemini.model = model.clone();
    }

    Ok(config)
}

/// Interactive session, ends on `:quit`, end of input or `shutdown`
pub async fn run(state: Arc<AppState>, shutdown: impl Future<Output = ()>) -> anyhow::Result<()> {
    let interactive = atty::is(atty::Stream::Stdin);
    let controller = AppController::new(state);
    let mut tasks = controller.spawn_tasks(interactive)?;

    tokio::pin!(shutdown);
    let mut shutting_down = false;

    loop {
        tokio::select! {
            _ = &mut shutdown, if !shutting_down => {
                tracing::info!("Shutdown requested");
                shutting_down = true;
                controller.shutdown();
            }
            joined = tasks.join_next() => {
                let Some(joined) = joined else {
                    break;
                };

                match joined {
                    Ok(Ok(())) => tracing::debug!("session task exited"),
                    Ok(Err(e)) => tracing::error!("session task failed: {e:#}"),
                    Err(e) => tracing::error!("session task panicked: {e}"),
                }

                // One side gone means the session is over
                controller.shutdown();
            }
        }
    }

    Ok(())
}
