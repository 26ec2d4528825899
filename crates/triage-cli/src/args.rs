//! CLI argument definitions using clap

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "triage")]
#[command(about = "Classify support tickets with a rate-limited language model")]
#[command(version)]
pub struct Cli {
    /// Path to a TOML configuration file (defaults to ./triage.toml if present)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Log filter used when RUST_LOG is unset (overrides logging.level)
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Classify ticket texts given as arguments, or one per stdin line
    Classify {
        /// Ticket texts; read from stdin when omitted
        texts: Vec<String>,

        /// Bypass the token bucket
        #[arg(long)]
        no_rate_limit: bool,

        /// Print why a ticket was left unclassified
        #[arg(long)]
        verbose_outcome: bool,
    },

    /// Show the effective rate limit configuration
    Limits {
        /// Print as JSON instead of TOML
        #[arg(long)]
        json: bool,
    },
}
