//! Process-wide limiter shared by every classifier in the process

use super::bucket::TokenBucket;
use super::types::RateLimitConfig;
use crate::error::{TriageError, TriageResult};
use std::sync::OnceLock;
use tracing::info;

static SHARED_LIMITER: OnceLock<TokenBucket> = OnceLock::new();

/// Get the process-wide limiter, creating it with the default configuration
/// on first use.
pub fn shared_limiter() -> TokenBucket {
    SHARED_LIMITER
        .get_or_init(|| TokenBucket::new(RateLimitConfig::default()))
        .clone()
}

/// Install the process-wide limiter at startup.
///
/// Fails if the configuration is invalid or a limiter was already created,
/// either by an earlier call or by [`shared_limiter`].
pub fn init_shared_limiter(config: RateLimitConfig) -> TriageResult<TokenBucket> {
    config.validate()?;

    let mut installed = false;
    let limiter = SHARED_LIMITER.get_or_init(|| {
        installed = true;
        TokenBucket::new(config.clone())
    });

    if !installed {
        return Err(TriageError::config(
            "Shared rate limiter is already initialized",
        ));
    }

    info!(
        capacity = config.capacity,
        refill_amount = config.refill_amount,
        refill_interval = ?config.refill_interval,
        "Shared rate limiter initialized"
    );
    Ok(limiter.clone())
}
