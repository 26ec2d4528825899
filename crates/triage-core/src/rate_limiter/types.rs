//! Rate limiter configuration and state types

use crate::error::{TriageError, TriageResult};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tokio::time::Instant;

/// Token bucket configuration
///
/// The defaults admit bursts of up to 100 classifications and then settle at
/// 5 permits every 10 seconds (one every 2 seconds on average).
///
/// ```
/// use std::time::Duration;
/// use triage_core::rate_limiter::RateLimitConfig;
///
/// let config = RateLimitConfig::default()
///     .with_capacity(20)
///     .with_refill_amount(2)
///     .with_refill_interval(Duration::from_secs(1));
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RateLimitConfig {
    /// Maximum number of tokens the bucket can hold
    pub capacity: u32,
    /// Tokens added per elapsed interval
    pub refill_amount: u32,
    /// Length of one refill interval
    #[serde(with = "humantime_serde")]
    pub refill_interval: Duration,
    /// Refill automatically from elapsed time. When false, tokens are only
    /// added through [`TokenBucket::replenish`](super::TokenBucket::replenish).
    pub auto_replenish: bool,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            capacity: 100,
            refill_amount: 5,
            refill_interval: Duration::from_secs(10),
            auto_replenish: true,
        }
    }
}

impl RateLimitConfig {
    /// Create a configuration with the given bucket shape
    pub fn new(capacity: u32, refill_amount: u32, refill_interval: Duration) -> Self {
        Self {
            capacity,
            refill_amount,
            refill_interval,
            auto_replenish: true,
        }
    }

    /// Set bucket capacity
    pub fn with_capacity(mut self, capacity: u32) -> Self {
        self.capacity = capacity;
        self
    }

    /// Set tokens added per interval
    pub fn with_refill_amount(mut self, amount: u32) -> Self {
        self.refill_amount = amount;
        self
    }

    /// Set the refill interval
    pub fn with_refill_interval(mut self, interval: Duration) -> Self {
        self.refill_interval = interval;
        self
    }

    /// Enable or disable time-based replenishment
    pub fn with_auto_replenish(mut self, auto_replenish: bool) -> Self {
        self.auto_replenish = auto_replenish;
        self
    }

    /// Steady-state permits per second
    pub fn permits_per_second(&self) -> f64 {
        if self.refill_interval.is_zero() {
            return 0.0;
        }
        self.refill_amount as f64 / self.refill_interval.as_secs_f64()
    }

    /// Validate the bucket shape
    pub fn validate(&self) -> TriageResult<()> {
        if self.capacity == 0 {
            return Err(TriageError::config("rate_limit.capacity must be greater than 0"));
        }
        if self.refill_interval.is_zero() {
            return Err(TriageError::config(
                "rate_limit.refill_interval must be greater than 0",
            ));
        }
        if self.refill_amount > self.capacity {
            return Err(TriageError::config(format!(
                "rate_limit.refill_amount ({}) cannot exceed capacity ({})",
                self.refill_amount, self.capacity
            )));
        }
        Ok(())
    }
}

/// Snapshot of a limiter's balance and lifetime counters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RateLimiterStatistics {
    /// Tokens currently available
    pub available: u32,
    /// Acquisitions granted since creation
    pub granted: u64,
    /// Acquisitions denied since creation
    pub denied: u64,
}

/// Internal state for the token bucket
#[derive(Debug)]
pub(super) struct BucketState {
    /// Current number of tokens available, never above capacity
    pub tokens: u32,
    /// Start of the current, not yet credited, refill interval
    pub last_refill: Instant,
    pub granted: u64,
    pub denied: u64,
}

impl BucketState {
    pub fn new(initial_tokens: u32) -> Self {
        Self {
            tokens: initial_tokens,
            last_refill: Instant::now(),
            granted: 0,
            denied: 0,
        }
    }
}
