//! Command routing logic for CLI

use crate::args::{Cli, Commands};
use crate::commands;
use crate::logging::init_logging;
use anyhow::Context;
use triage_core::load_config;

/// Load configuration, set up logging and run the selected command
pub async fn route(cli: Cli) -> anyhow::Result<()> {
    let config = load_config(cli.config.as_deref()).context("Failed to load configuration")?;
    init_logging(&config.logging, cli.log_level.as_deref())?;

    match cli.command {
        Commands::Classify {
            texts,
            no_rate_limit,
            verbose_outcome,
        } => commands::classify::run(&config, texts, !no_rate_limit, verbose_outcome).await,
        Commands::Limits { json } => commands::limits::run(&config, json),
    }
}
