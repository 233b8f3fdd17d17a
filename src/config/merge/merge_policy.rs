//! Merge rules: defaults, override order, conflict handling.

use config::Config;
use config::ConfigBuilder;
use config::ConfigError;
use config::Environment;

/// Prefix for environment overrides, e.g. `KEYFORGE__DEFAULTS__BIT_SIZE=4096`.
pub const ENV_PREFIX: &str = "KEYFORGE";
pub const ENV_SEPARATOR: &str = "__";

/// Create a Config builder with merge policy defaults applied.
pub fn builder_with_defaults() -> Result<ConfigBuilder<config::builder::DefaultState>, ConfigError>
{
    Config::builder()
        .set_default("logging.enabled", false)?
        .set_default("logging.level", "debug")?
        .set_default("logging.format", "text")?
        .set_default("logging.output", "stderr")
}

/// Environment source; always added last so it overrides every file.
pub fn environment() -> Environment {
    Environment::with_prefix(ENV_PREFIX)
        .separator(ENV_SEPARATOR)
        .try_parsing(true)
}
