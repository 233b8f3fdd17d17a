//! Error types for key pair generation.

use std::path::PathBuf;
use thiserror::Error;

/// Result alias used across the crate.
pub type KeygenResult<T> = Result<T, KeygenError>;

/// Filesystem operation that failed, carried by [`KeygenError::Filesystem`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FsOp {
    Probe,
    Read,
    Remove,
}

impl std::fmt::Display for FsOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            FsOp::Probe => "probe",
            FsOp::Read => "read",
            FsOp::Remove => "remove",
        };
        f.write_str(name)
    }
}

/// Every failure a generation call can surface. Exactly one value per failed call.
#[derive(Debug, Error)]
pub enum KeygenError {
    #[error("Key generator binary unavailable: {path}: {source}")]
    BinaryUnavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{} already exists", .path.display())]
    AlreadyExists { path: PathBuf },

    #[error("Failed to {op} {}: {source}", .path.display())]
    Filesystem {
        op: FsOp,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Stderr text of the key generator, verbatim.
    #[error("{0}")]
    GenerationFailed(String),

    #[error("Key generator {}", describe_exit(.code))]
    ExitCode { code: Option<i32> },

    #[error("Key generator did not finish within {seconds}s")]
    Timeout { seconds: u64 },

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Runtime error: {0}")]
    Runtime(String),
}

fn describe_exit(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("exited with code {}", code),
        None => "was terminated by a signal".to_string(),
    }
}

impl KeygenError {
    pub(crate) fn fs(op: FsOp, path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        KeygenError::Filesystem {
            op,
            path: path.into(),
            source,
        }
    }
}

impl From<config::ConfigError> for KeygenError {
    fn from(err: config::ConfigError) -> Self {
        KeygenError::Config(err.to_string())
    }
}
