//! Rate limiter for classification requests
//!
//! Implements a token bucket that refills in whole intervals, so that
//! externally triggered classifications cannot overwhelm the language model
//! backend or run up cost.

mod bucket;
mod limiter;
mod types;


pub use bucket::TokenBucket;
pub use types::{RateLimitConfig, RateLimiterStatistics};

// Re-export process-wide limiter functions
pub mod global {
    pub use super::limiter::{init_shared_limiter, shared_limiter};
}
