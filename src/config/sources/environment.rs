//! Environment source: GENSET_<SECTION>__<KEY>, e.g. GENSET_GENERATORS__ENABLED.

use config::builder::DefaultState;
use config::ConfigBuilder;
use config::ConfigError;
use config::Environment;

pub const ENV_PREFIX: &str = "GENSET";

/// Add environment overrides to builder. List values are comma-separated.
pub fn add_to_builder(
    builder: ConfigBuilder<DefaultState>,
) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    Ok(builder.add_source(
        Environment::with_prefix(ENV_PREFIX)
            .prefix_separator("_")
            .separator("__")
            .list_separator(",")
            .with_list_parse_key("generators.enabled")
            .try_parsing(true),
    ))
}
