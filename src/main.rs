use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

use coursefind::cli::{Cli, Commands};
use coursefind::config::Config;
use coursefind::logging::{init_early_logging, init_logging};
use coursefind::metrics;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Determine project root (current directory)
    let project_root = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));

    // Load configuration (if available, otherwise use defaults)
    // The guard MUST be held until program exit to ensure logs are flushed
    let (config, _logging_guard) = match Config::load(&project_root) {
        Ok(config) => {
            let guard = init_logging(&config.logging, &project_root)?;
            (config, Some(guard))
        }
        Err(e) => {
            init_early_logging();
            tracing::warn!("Using default configuration: {:#}", e);
            (Config::default(), None)
        }
    };

    tracing::debug!("Project root: {}", project_root.display());

    metrics::register_metrics();

    match cli.command {
        Commands::Init { force } => {
            coursefind::commands::init::run(force).await?;
        }
        Commands::Serve { host, port, corpus } => {
            coursefind::commands::serve::run(&config, &project_root, host, port, corpus).await?;
        }
        Commands::Search {
            query,
            corpus,
            limit,
        } => {
            coursefind::commands::search::run(&config, &project_root, &query, corpus, limit).await?;
        }
        Commands::Interactive {
            server,
            debounce_ms,
        } => {
            coursefind::commands::interactive::run(&config, server, debounce_ms).await?;
        }
    }

    Ok(())
}
