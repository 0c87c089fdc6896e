//! Config file source: an explicit path, or the one named by GENSET_CONFIG.

use config::builder::DefaultState;
use config::ConfigBuilder;
use config::ConfigError;
use config::File;
use std::path::{Path, PathBuf};
use tracing::warn;

/// Environment variable naming the config file when no path is given.
pub const CONFIG_PATH_ENV: &str = "GENSET_CONFIG";

/// Path from GENSET_CONFIG, if set and non-empty.
pub fn env_config_path() -> Option<PathBuf> {
    std::env::var(CONFIG_PATH_ENV)
        .ok()
        .filter(|value| !value.trim().is_empty())
        .map(PathBuf::from)
}

/// Add a config file to the builder. The format follows the file extension.
///
/// A `required` file that is missing fails the load; an optional one is
/// skipped with a warning.
pub fn add_to_builder(
    builder: ConfigBuilder<DefaultState>,
    path: &Path,
    required: bool,
) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    if !required && !path.exists() {
        warn!(
            config_path = %path.display(),
            "Configuration file not found, using defaults and environment"
        );
        return Ok(builder);
    }

    Ok(builder.add_source(File::from(path).required(required)))
}
