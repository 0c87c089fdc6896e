//! Config loading facade: assembles sources in precedence order.

use super::merge::builder_with_defaults;
use super::sources::{environment, file};
use super::GensetConfig;
use crate::error::SetupError;
use std::path::Path;
use tracing::debug;

/// Loads [`GensetConfig`] from defaults, an optional file and the environment
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration.
    ///
    /// Precedence (lowest to highest): defaults, the file at `path` (or
    /// GENSET_CONFIG when `path` is `None`), GENSET_* environment variables.
    /// A missing file is not an error here.
    pub fn load(path: Option<&Path>) -> Result<GensetConfig, SetupError> {
        let env_path = file::env_config_path();
        let mut builder = builder_with_defaults()?;
        if let Some(path) = path.or(env_path.as_deref()) {
            builder = file::add_to_builder(builder, path, false)?;
        }
        builder = environment::add_to_builder(builder)?;

        let config: GensetConfig = builder.build()?.try_deserialize()?;
        debug!(enabled = ?config.generators.enabled, "Configuration loaded");
        Ok(config)
    }

    /// Load configuration from a file that must exist, plus environment overrides
    pub fn load_from_file(path: &Path) -> Result<GensetConfig, SetupError> {
        let mut builder = builder_with_defaults()?;
        builder = file::add_to_builder(builder, path, true)?;
        builder = environment::add_to_builder(builder)?;
        Ok(builder.build()?.try_deserialize()?)
    }
}
