//! Configuration System
//!
//! Layered configuration: built-in defaults, then the global config file, then
//! `KEYFORGE__`-prefixed environment variables. CLI flags are applied on top by
//! the caller.

use crate::error::KeygenError;
use crate::logging::LoggingConfig;
use crate::request::KeygenOptions;
use crate::resolver::ResolverConfig;
use serde::{Deserialize, Serialize};
use std::path::Path;

mod merge {
    pub mod merge_policy;
}
mod sources {
    pub mod global_file;
}

pub use merge::merge_policy::{ENV_PREFIX, ENV_SEPARATOR};
pub use sources::global_file::global_config_path;

/// Root configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct KeyforgeConfig {
    /// Default generation options, overridden per call
    #[serde(default)]
    pub defaults: KeygenOptions,

    /// Binary resolution settings
    #[serde(default)]
    pub resolver: ResolverConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Configuration validation errors
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    Defaults(String),
    Logging(String),
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationError::Defaults(msg) => write!(f, "Defaults: {}", msg),
            ValidationError::Logging(msg) => write!(f, "Logging: {}", msg),
        }
    }
}

impl std::error::Error for ValidationError {}

impl KeyforgeConfig {
    /// Validate the entire configuration
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        if self.defaults.timeout_secs == Some(0) {
            errors.push(ValidationError::Defaults(
                "timeout_secs must be greater than zero".to_string(),
            ));
        }
        if let Some(bits) = self.defaults.bit_size.as_deref() {
            if !bits.is_empty() && bits.parse::<u32>().is_err() {
                errors.push(ValidationError::Defaults(format!(
                    "bit_size '{}' is not a number",
                    bits
                )));
            }
        }

        if !matches!(self.logging.format.as_str(), "json" | "text") {
            errors.push(ValidationError::Logging(format!(
                "Invalid log format: {} (must be 'json' or 'text')",
                self.logging.format
            )));
        }
        if !matches!(self.logging.output.as_str(), "stdout" | "stderr") {
            errors.push(ValidationError::Logging(format!(
                "Invalid log output: {} (must be 'stdout' or 'stderr')",
                self.logging.output
            )));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

/// Loads `KeyforgeConfig` from its sources.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load defaults, the global config file (if present), and environment overrides.
    pub fn load() -> Result<KeyforgeConfig, KeygenError> {
        let builder = merge::merge_policy::builder_with_defaults()?;
        let builder = sources::global_file::add_to_builder(builder)?;
        let config = builder
            .add_source(merge::merge_policy::environment())
            .build()?;
        Self::finish(config.try_deserialize()?)
    }

    /// Load a single explicit file (must exist) plus environment overrides.
    pub fn load_from_file(path: &Path) -> Result<KeyforgeConfig, KeygenError> {
        let config = merge::merge_policy::builder_with_defaults()?
            .add_source(config::File::from(path).required(true))
            .add_source(merge::merge_policy::environment())
            .build()?;
        Self::finish(config.try_deserialize()?)
    }

    fn finish(config: KeyforgeConfig) -> Result<KeyforgeConfig, KeygenError> {
        config.validate().map_err(|errors| {
            let error_msgs: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
            KeygenError::Config(format!(
                "Configuration validation failed:\n{}",
                error_msgs.join("\n")
            ))
        })?;
        Ok(config)
    }
}
