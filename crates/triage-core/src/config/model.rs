//! Top-level configuration model

use crate::config::logging_config::LoggingConfig;
use crate::config::provider::ProviderConfig;
use crate::error::{TriageError, TriageResult};
use crate::rate_limiter::RateLimitConfig;
use serde::{Deserialize, Serialize};

/// Complete Triage configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TriageConfig {
    /// Admission control for classification requests
    pub rate_limit: RateLimitConfig,
    /// Language model backend
    pub provider: ProviderConfig,
    /// Log output
    pub logging: LoggingConfig,
}

impl TriageConfig {
    /// Validate every section
    pub fn validate(&self) -> TriageResult<()> {
        self.rate_limit
            .validate()
            .map_err(|e| e.with_context("Validating [rate_limit]"))?;
        self.provider
            .validate()
            .map_err(|e| e.with_context("Validating [provider]"))?;
        if self.logging.level.trim().is_empty() {
            return Err(TriageError::config("logging.level cannot be empty"));
        }
        Ok(())
    }
}
