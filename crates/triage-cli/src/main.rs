//! Triage CLI
//!
//! Classifies support tickets with a language model, behind the same token
//! bucket the library enforces for every other caller in the process.
//!
//! ```bash
//! triage classify "I was charged twice this month"
//! cat tickets.txt | triage classify --verbose-outcome
//! triage limits
//! ```
//!
//! Set `RUST_LOG` (e.g. `RUST_LOG=triage_core=debug`) to override the
//! configured log level.

mod args;
mod commands;
mod logging;
mod router;

use args::Cli;
use clap::Parser;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    router::route(cli).await
}
