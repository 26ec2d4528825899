//! Token bucket admission controller

use super::types::{BucketState, RateLimitConfig, RateLimiterStatistics};
use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;
use tracing::trace;

/// Token bucket rate limiter
///
/// Tokens are credited in whole refill intervals and each admitted operation
/// consumes exactly one. Refill and deduction happen under a single lock, so
/// concurrent callers can never be granted more tokens than the bucket holds.
///
/// Cloning shares the underlying bucket, so every clone draws from the same
/// balance.
#[derive(Debug, Clone)]
pub struct TokenBucket {
    config: RateLimitConfig,
    state: Arc<Mutex<BucketState>>,
}

impl TokenBucket {
    /// Create a full bucket with the given configuration
    pub fn new(config: RateLimitConfig) -> Self {
        let capacity = config.capacity;
        Self::with_initial_tokens(config, capacity)
    }

    /// Create a bucket holding `tokens` (capped at capacity)
    pub fn with_initial_tokens(config: RateLimitConfig, tokens: u32) -> Self {
        let state = BucketState::new(tokens.min(config.capacity));
        Self {
            config,
            state: Arc::new(Mutex::new(state)),
        }
    }

    /// Get the current configuration
    pub fn config(&self) -> &RateLimitConfig {
        &self.config
    }

    /// Try to take one token without waiting.
    ///
    /// Returns `true` when the caller may proceed. A denial is a normal
    /// outcome and should not be retried internally.
    pub fn try_acquire(&self) -> bool {
        let mut state = self.state.lock();
        self.refill_owed(&mut state, Instant::now());

        if state.tokens >= 1 {
            state.tokens -= 1;
            state.granted += 1;
            trace!(remaining = state.tokens, "Rate limiter: token acquired");
            true
        } else {
            state.denied += 1;
            trace!("Rate limiter: no tokens available");
            false
        }
    }

    /// Credit one interval's worth of tokens by hand.
    ///
    /// Only meaningful when `auto_replenish` is off; returns `false` and
    /// leaves the balance untouched otherwise.
    pub fn replenish(&self) -> bool {
        if self.config.auto_replenish {
            return false;
        }

        let mut state = self.state.lock();
        state.tokens = state
            .tokens
            .saturating_add(self.config.refill_amount)
            .min(self.config.capacity);
        true
    }

    /// Check current token count without consuming
    pub fn available_tokens(&self) -> u32 {
        let mut state = self.state.lock();
        self.refill_owed(&mut state, Instant::now());
        state.tokens
    }

    /// Current balance plus lifetime grant/deny counters
    pub fn statistics(&self) -> RateLimiterStatistics {
        let mut state = self.state.lock();
        self.refill_owed(&mut state, Instant::now());
        RateLimiterStatistics {
            available: state.tokens,
            granted: state.granted,
            denied: state.denied,
        }
    }

    /// Apply the refill accrued since `last_refill`.
    ///
    /// Only whole intervals are credited; the remainder stays on the clock
    /// so that the next interval completes on schedule.
    fn refill_owed(&self, state: &mut BucketState, now: Instant) {
        if !self.config.auto_replenish {
            return;
        }

        let interval = self.config.refill_interval.as_nanos();
        if interval == 0 {
            return;
        }

        let elapsed = now.saturating_duration_since(state.last_refill).as_nanos();
        let intervals = elapsed / interval;
        if intervals == 0 {
            return;
        }

        let added = intervals.saturating_mul(u128::from(self.config.refill_amount));
        let refilled = (u128::from(state.tokens) + added).min(u128::from(self.config.capacity));
        // refilled <= capacity, which is a u32
        state.tokens = refilled as u32;

        let remainder = (elapsed % interval) as u64;
        state.last_refill = now - Duration::from_nanos(remainder);
    }
}

impl Default for TokenBucket {
    fn default() -> Self {
        Self::new(RateLimitConfig::default())
    }
}
