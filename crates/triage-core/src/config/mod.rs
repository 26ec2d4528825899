//! Configuration management for Triage
//!
//! Settings are layered: built-in defaults, then an optional TOML file, then
//! `TRIAGE_*` environment variables (`__` separates sections, e.g.
//! `TRIAGE_RATE_LIMIT__CAPACITY=50`).

pub mod loader;
pub mod logging_config;
pub mod model;
pub mod provider;

pub use loader::{DEFAULT_CONFIG_FILE, ENV_PREFIX, load_config};
pub use logging_config::{LogFormat, LoggingConfig};
pub use model::TriageConfig;
pub use provider::ProviderConfig;
