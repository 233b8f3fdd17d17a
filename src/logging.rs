//! Logging System
//!
//! Diagnostic output through the `tracing` crate. Components emit one event per
//! major step tagged with a `component` field. Nothing is printed unless logging
//! is enabled by configuration, a CLI flag, or the verbosity environment flag.

use crate::error::KeygenError;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;
use tracing_subscriber::fmt::time::ChronoUtc;
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Registry};

/// Environment variables that switch on verbose diagnostics.
pub const VERBOSE_ENV_VARS: [&str; 2] = ["KEYFORGE_VERBOSE", "VERBOSE"];

/// Filter directive override, same syntax as `RUST_LOG`.
pub const LOG_FILTER_ENV: &str = "KEYFORGE_LOG";

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Emit diagnostics even without the verbosity flag
    #[serde(default)]
    pub enabled: bool,

    /// Log level: trace, debug, info, warn, error, off
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Output format: json, text
    #[serde(default = "default_format")]
    pub format: String,

    /// Output destination: stdout, stderr
    #[serde(default = "default_output")]
    pub output: String,

    /// Enable colored output (text format only)
    #[serde(default = "default_true")]
    pub color: bool,
}

fn default_log_level() -> String {
    "debug".to_string()
}

fn default_format() -> String {
    "text".to_string()
}

fn default_output() -> String {
    // stdout carries key material in the CLI
    "stderr".to_string()
}

fn default_true() -> bool {
    true
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            level: default_log_level(),
            format: default_format(),
            output: default_output(),
            color: default_true(),
        }
    }
}

/// Process-wide verbosity flag, read from the environment once.
pub fn verbose_enabled() -> bool {
    static VERBOSE: OnceLock<bool> = OnceLock::new();
    *VERBOSE.get_or_init(|| {
        VERBOSE_ENV_VARS
            .iter()
            .any(|name| std::env::var(name).map(|v| is_truthy(&v)).unwrap_or(false))
    })
}

fn is_truthy(value: &str) -> bool {
    !matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "" | "0" | "false" | "no" | "off"
    )
}

/// Initialize the logging system
///
/// Priority order (highest to lowest):
/// 1. `KEYFORGE_LOG` filter directives
/// 2. Configuration (`enabled`, or the verbosity flag, plus `level`)
/// 3. Off
pub fn init_logging(config: Option<&LoggingConfig>) -> Result<(), KeygenError> {
    let default_config = LoggingConfig::default();
    let config = config.unwrap_or(&default_config);

    let filter = build_env_filter(config, verbose_enabled())?;
    let writer = parse_output(&config.output)?;
    let base_subscriber = Registry::default().with(filter);

    let result = match config.format.as_str() {
        "json" => base_subscriber
            .with(
                fmt::layer()
                    .json()
                    .with_target(true)
                    .with_timer(ChronoUtc::rfc_3339())
                    .with_writer(writer),
            )
            .try_init(),
        "text" => base_subscriber
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_timer(ChronoUtc::rfc_3339())
                    .with_ansi(config.color)
                    .with_writer(writer),
            )
            .try_init(),
        other => {
            return Err(KeygenError::Config(format!(
                "Invalid log format: {} (must be 'json' or 'text')",
                other
            )))
        }
    };

    result.map_err(|e| KeygenError::Config(format!("Failed to install logger: {}", e)))
}

/// Build the filter from the environment override or configuration.
fn build_env_filter(config: &LoggingConfig, verbose: bool) -> Result<EnvFilter, KeygenError> {
    if let Ok(filter) = EnvFilter::try_from_env(LOG_FILTER_ENV) {
        return Ok(filter);
    }

    if !(config.enabled || verbose) || config.level == "off" {
        return Ok(EnvFilter::new("off"));
    }

    EnvFilter::try_new(&config.level)
        .map_err(|e| KeygenError::Config(format!("Invalid log level '{}': {}", config.level, e)))
}

fn parse_output(output: &str) -> Result<BoxMakeWriter, KeygenError> {
    match output {
        "stdout" => Ok(BoxMakeWriter::new(std::io::stdout)),
        "stderr" => Ok(BoxMakeWriter::new(std::io::stderr)),
        _ => Err(KeygenError::Config(format!(
            "Invalid log output: {} (must be 'stdout' or 'stderr')",
            output
        ))),
    }
}
