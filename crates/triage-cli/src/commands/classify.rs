//! `triage classify` command

use anyhow::Context;
use futures::future::join_all;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::info;
use triage_core::classifier::{ClassificationOutcome, UNKNOWN_LABEL};
use triage_core::rate_limiter::global::init_shared_limiter;
use triage_core::{ChatScopeProvider, OpenAiCompatibleProvider, TicketClassifier, TriageConfig};

pub async fn run(
    config: &TriageConfig,
    texts: Vec<String>,
    enforce_rate_limit: bool,
    verbose_outcome: bool,
) -> anyhow::Result<()> {
    let texts = if texts.is_empty() {
        read_stdin_lines().await?
    } else {
        texts
    };

    let provider = OpenAiCompatibleProvider::new(config.provider.clone())
        .context("Failed to create chat provider")?;
    info!(provider = provider.name(), model = %config.provider.model, "Chat provider ready");
    let limiter = init_shared_limiter(config.rate_limit.clone())
        .context("Failed to initialize rate limiter")?;
    let scopes = ChatScopeProvider::new(Arc::new(provider));
    let classifier = TicketClassifier::new(limiter, Arc::new(scopes));

    info!(count = texts.len(), enforce_rate_limit, "Classifying tickets");

    let outcomes = join_all(
        texts
            .iter()
            .map(|text| classifier.classify_detailed(text, enforce_rate_limit)),
    )
    .await;

    for outcome in &outcomes {
        println!("{}", render(outcome, verbose_outcome));
    }

    let stats = classifier.limiter().statistics();
    info!(
        granted = stats.granted,
        denied = stats.denied,
        available = stats.available,
        "Rate limiter state"
    );
    Ok(())
}

async fn read_stdin_lines() -> anyhow::Result<Vec<String>> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut texts = Vec::new();
    while let Some(line) = lines.next_line().await.context("Failed to read stdin")? {
        if !line.trim().is_empty() {
            texts.push(line);
        }
    }
    Ok(texts)
}

fn render(outcome: &ClassificationOutcome, verbose: bool) -> String {
    match (outcome.label(), verbose) {
        (Some(ticket_type), _) => ticket_type.to_string(),
        (None, false) => UNKNOWN_LABEL.to_string(),
        (None, true) => format!("{}\t({})", UNKNOWN_LABEL, outcome),
    }
}
