//! breakfree - BreakFree session CLI
//!
//! Restores the local session on every run, applies one command, and prints
//! the resulting session state as JSON.
//!
//! # Examples
//!
//! ```bash
//! breakfree status --pretty
//! breakfree sign-in --email admin@breakfree.com --password admin123
//! breakfree sign-out
//! ```

mod cli;
mod commands;
mod error;
mod logger;
mod report;


use crate::{
    cli::Cli,
    commands::Commands,
    error::{CliError, Result as CliErrorResult},
    report::SessionReport,
};

use bf_config::Config;
use bf_session::{FileStore, SessionBootstrapper, SessionCache, SessionSettings, build_backend};

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use log::{error, info};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli).await {
        Ok(output) => {
            println!("{output}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("{e}");
            eprintln!("Error: {}", e.user_message());
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> CliErrorResult<String> {
    let config = Config::load()?;
    config.validate()?;

    logger::initialize(
        config.logging.level,
        log_file_path(&config)?,
        config.logging.colored,
    )?;

    info!("Starting breakfree v{}", env!("CARGO_PKG_VERSION"));
    config.log_summary();

    let store = Arc::new(FileStore::open(config.cache_path()?)?);
    let backend = build_backend(&config, store.clone())?;
    let session = SessionBootstrapper::new(
        backend,
        SessionCache::new(store),
        SessionSettings::from(&config),
    );

    let outcome = session.bootstrap().await;

    let report = match cli.command {
        Commands::Status => SessionReport::new(&session.state()).with_outcome(outcome),
        Commands::SignIn { email, password } => {
            session.sign_in(&email, &password).await?;
            SessionReport::new(&session.state())
        }
        Commands::SignOut => {
            session.sign_out().await;
            SessionReport::new(&session.state())
        }
        Commands::RefreshProfile => {
            let outcome = session.refresh_profile().await?;
            SessionReport::new(&session.state()).with_outcome(outcome)
        }
    };

    report.render(cli.pretty).map_err(CliError::from)
}

/// Log file under the config directory, if one is configured.
fn log_file_path(config: &Config) -> CliErrorResult<Option<PathBuf>> {
    let Some(ref filename) = config.logging.file else {
        return Ok(None);
    };

    let log_dir = Config::config_dir()?.join(&config.logging.dir);
    std::fs::create_dir_all(&log_dir).map_err(|e| {
        CliError::logger(format!(
            "Failed to create log directory {}: {e}",
            log_dir.display()
        ))
    })?;

    Ok(Some(log_dir.join(filename)))
}
