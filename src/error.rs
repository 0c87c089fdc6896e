//! Error types for generator resolution, generation and composition.

use crate::declaration::GeneratorKind;
use thiserror::Error;

/// Errors surfaced by generators and the composition engine
#[derive(Debug, Error)]
pub enum GeneratorError {
    #[error("generator declaration is empty")]
    EmptyDeclaration,

    #[error("matrix generator needs two (or more) generators, got {found}")]
    InsufficientGenerators { found: usize },

    #[error("generator `{0}` not enabled")]
    NotEnabled(GeneratorKind),

    #[error("{kind} generator failed: {source}")]
    SubGenerator {
        kind: GeneratorKind,
        #[source]
        source: Box<GeneratorError>,
    },

    #[error("failed to merge key `{key}`: {reason}")]
    Merge { key: String, reason: String },

    #[error("invalid generator declaration: {0}")]
    InvalidDeclaration(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl GeneratorError {
    /// Wrap an error returned by the generator of `kind`.
    pub fn sub_generator(kind: GeneratorKind, source: GeneratorError) -> Self {
        GeneratorError::SubGenerator {
            kind,
            source: Box::new(source),
        }
    }
}

/// Errors raised while wiring the process: configuration, registry, logging
#[derive(Debug, Error)]
pub enum SetupError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Unknown generator kind in configuration: {0}")]
    UnknownGenerator(String),

    #[error("Generator `{0}` is enabled but no implementation was provided")]
    MissingImplementation(GeneratorKind),

    #[error("Logging error: {0}")]
    Logging(String),
}

impl From<config::ConfigError> for SetupError {
    fn from(err: config::ConfigError) -> Self {
        SetupError::Config(err.to_string())
    }
}
