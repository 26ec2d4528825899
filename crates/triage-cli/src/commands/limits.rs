//! `triage limits` command

use anyhow::Context;
use triage_core::{RateLimitConfig, TriageConfig};

pub fn run(config: &TriageConfig, json: bool) -> anyhow::Result<()> {
    println!("{}", render(&config.rate_limit, json)?);
    Ok(())
}

fn render(limits: &RateLimitConfig, json: bool) -> anyhow::Result<String> {
    let body = if json {
        serde_json::to_string_pretty(limits).context("Failed to encode limits as JSON")?
    } else {
        toml::to_string(limits).context("Failed to encode limits as TOML")?
    };

    Ok(format!(
        "{}\n# steady state: {:.2} permits/s",
        body.trim_end(),
        limits.permits_per_second()
    ))
}
