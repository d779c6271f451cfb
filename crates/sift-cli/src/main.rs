//! sift - index local documents and answer questions from them
#![cfg_attr(
    test,
    allow(
        dead_code,
        clippy::expect_used,
        clippy::unwrap_used,
        clippy::panic,
        clippy::missing_panics_doc,
        clippy::missing_errors_doc,
        reason = "Test allows"
    )
)]

use anyhow::{Context as _, Result};
use clap::Parser as _;
use cli::{Cli, Commands};
use sift_core::SiftConfig;
use sift_core::config::LoggingConfig;

mod cli;
mod handlers;
mod logging;
mod output;

/// Load the configuration named on the command line (or the default one),
/// then apply environment and `--store` overrides.
fn resolve_config(cli: &Cli) -> Result<SiftConfig> {
    let mut config = match &cli.config {
        Some(path) => SiftConfig::load_from_file(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => SiftConfig::load_or_create().context("loading ~/.sift/config.toml")?,
    };
    config.apply_process_env();
    if let Some(store) = &cli.store {
        config.store.path.clone_from(store);
    }
    config.validate()?;
    Ok(config)
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Commands::InitConfig { force } = cli.command {
        logging::init_logging(&LoggingConfig::default())?;
        return handlers::handle_init_config(cli.config, force);
    }

    let config = resolve_config(&cli)?;
    logging::init_logging(&config.logging)?;

    match &cli.command {
        Commands::Index { path } => handlers::handle_index(&config, path, cli.json).await,
        Commands::Query {
            question,
            top_k,
            no_sources,
        } => handlers::handle_query(&config, question, *top_k, !no_sources, cli.json).await,
        Commands::Search { question, top_k } => {
            handlers::handle_search(&config, question, *top_k, cli.json).await
        }
        Commands::Chunk { file } => handlers::handle_chunk(&config, file, cli.json),
        Commands::Stats => handlers::handle_stats(&config, cli.json).await,
        Commands::InitConfig { .. } => Ok(()),
    }
}
