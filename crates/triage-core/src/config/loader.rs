//! Layered configuration loading

use crate::config::model::TriageConfig;
use crate::error::{TriageError, TriageResult};
use config::{Config, Environment, File, FileFormat};
use std::path::Path;
use tracing::debug;

/// File picked up from the working directory when no path is given
pub const DEFAULT_CONFIG_FILE: &str = "triage.toml";

/// Prefix of configuration environment variables
pub const ENV_PREFIX: &str = "TRIAGE";

/// Load configuration from defaults, a TOML file and the environment.
///
/// An explicit `path` must exist. Without one, `triage.toml` in the working
/// directory is used if present.
pub fn load_config(path: Option<&Path>) -> TriageResult<TriageConfig> {
    let defaults = Config::try_from(&TriageConfig::default())
        .map_err(|e| TriageError::config(format!("Failed to encode defaults: {}", e)))?;

    let file = match path {
        Some(path) => {
            debug!(path = %path.display(), "Loading configuration file");
            File::from(path).format(FileFormat::Toml).required(true)
        }
        None => File::new(DEFAULT_CONFIG_FILE, FileFormat::Toml).required(false),
    };

    let config: TriageConfig = Config::builder()
        .add_source(defaults)
        .add_source(file)
        .add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator("__"),
        )
        .build()?
        .try_deserialize()?;

    config.validate()?;
    Ok(config)
}
