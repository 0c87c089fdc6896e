//! Configuration System
//!
//! Process-level settings: which generator kinds are enabled and how logging
//! is set up. Layered from defaults, an optional config file and environment
//! variable overrides.

use crate::declaration::GeneratorKind;
use crate::error::SetupError;
use crate::logging::LoggingConfig;
use serde::{Deserialize, Serialize};

mod facade;
mod merge;
mod sources;

pub use facade::ConfigLoader;
pub use sources::environment::ENV_PREFIX;
pub use sources::file::CONFIG_PATH_ENV;

/// Root configuration structure
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GensetConfig {
    /// Enabled generator kinds
    #[serde(default)]
    pub generators: GeneratorsConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Generator settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratorsConfig {
    /// Kind names, e.g. `List`, `GitRepository`, `Matrix`
    #[serde(default = "default_enabled")]
    pub enabled: Vec<String>,
}

fn default_enabled() -> Vec<String> {
    GeneratorKind::ALL
        .iter()
        .map(|kind| kind.as_str().to_string())
        .collect()
}

impl Default for GeneratorsConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
        }
    }
}

impl GeneratorsConfig {
    pub fn new<I, S>(enabled: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            enabled: enabled.into_iter().map(Into::into).collect(),
        }
    }

    /// Parsed enabled kinds, de-duplicated, in configured order
    pub fn enabled_kinds(&self) -> Result<Vec<GeneratorKind>, SetupError> {
        let mut kinds = Vec::new();
        for name in self.enabled.iter().filter(|name| !name.trim().is_empty()) {
            let kind: GeneratorKind = name.parse()?;
            if !kinds.contains(&kind) {
                kinds.push(kind);
            }
        }
        Ok(kinds)
    }
}

/// Configuration validation errors
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    Generators(String),
    Logging(String),
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationError::Generators(msg) => write!(f, "Generators: {}", msg),
            ValidationError::Logging(msg) => write!(f, "Logging: {}", msg),
        }
    }
}

impl std::error::Error for ValidationError {}

impl GensetConfig {
    /// Validate the entire configuration
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        for name in self.generators.enabled.iter().filter(|n| !n.trim().is_empty()) {
            if let Err(err) = name.parse::<GeneratorKind>() {
                errors.push(ValidationError::Generators(err.to_string()));
            }
        }

        if let Err(e) = self.logging.validate() {
            errors.push(ValidationError::Logging(e));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}
