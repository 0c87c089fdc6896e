//! Merge rules: defaults first, then file, then environment.

use crate::declaration::GeneratorKind;
use config::builder::DefaultState;
use config::Config;
use config::ConfigBuilder;
use config::ConfigError;

/// Create a Config builder with merge policy defaults applied.
pub fn builder_with_defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    let all_kinds: Vec<String> = GeneratorKind::ALL
        .iter()
        .map(|kind| kind.as_str().to_string())
        .collect();

    Config::builder()
        .set_default("generators.enabled", all_kinds)?
        .set_default("logging.level", "info")?
        .set_default("logging.format", "text")?
        .set_default("logging.output", "stdout")
}
