//! Triage Core Library
//!
//! Rate-limited classification of support tickets. A process-wide token
//! bucket gates calls, a chat capability supplies the model's answer, and the
//! answer is accepted only when it names one of the known ticket types.

pub mod classifier;
pub mod config;
pub mod error;
pub mod llm;
pub mod rate_limiter;
pub mod scope;

// Re-export commonly used types
pub use classifier::{ClassificationOutcome, TicketClassifier, TicketType};
pub use config::{TriageConfig, load_config};
pub use error::{TriageError, TriageResult};
pub use llm::{ChatCapability, OpenAiCompatibleProvider};
pub use rate_limiter::{RateLimitConfig, TokenBucket};
pub use scope::{ChatScopeProvider, ScopeProvider};
