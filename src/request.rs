//! Generation options and the resolved per-call request.
//!
//! `KeygenOptions` is what callers and configuration files supply; every field is
//! optional. `into_request` applies defaults once, before any side effect, and
//! yields an immutable `GenerationRequest`.

use crate::resolver::default_executable;
use crate::types::{KeyFilePair, KeyFormat};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_KEY_TYPE: &str = "rsa";
pub const DEFAULT_BIT_SIZE: &str = "2048";
pub const DEFAULT_KEY_FILE_NAME: &str = "id_rsa";

/// Caller-facing options. Unset fields fall back to defaults in [`KeygenOptions::into_request`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeygenOptions {
    /// Base path for both key files
    pub location: Option<PathBuf>,
    /// Key generator binary (path or command name)
    pub executable_path: Option<PathBuf>,
    pub key_type: Option<String>,
    pub bit_size: Option<String>,
    pub comment: Option<String>,
    pub passphrase: Option<String>,
    pub format: Option<KeyFormat>,
    /// Return file contents in the result
    pub read: Option<bool>,
    /// Clear pre-existing key files
    pub force: Option<bool>,
    /// Delete key files after reading them
    pub destroy: Option<bool>,
    /// Kill the key generator after this many seconds
    pub timeout_secs: Option<u64>,
}

/// Empty strings count as unset.
fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

fn non_empty_path(value: Option<PathBuf>) -> Option<PathBuf> {
    value.filter(|p| !p.as_os_str().is_empty())
}

/// Default base location: `<temp dir>/id_rsa`.
pub fn default_location() -> PathBuf {
    std::env::temp_dir().join(DEFAULT_KEY_FILE_NAME)
}

impl KeygenOptions {
    /// Overlay these options on `base`; fields set here win.
    pub fn merged_over(self, base: &KeygenOptions) -> KeygenOptions {
        KeygenOptions {
            location: self.location.or_else(|| base.location.clone()),
            executable_path: self
                .executable_path
                .or_else(|| base.executable_path.clone()),
            key_type: self.key_type.or_else(|| base.key_type.clone()),
            bit_size: self.bit_size.or_else(|| base.bit_size.clone()),
            comment: self.comment.or_else(|| base.comment.clone()),
            passphrase: self.passphrase.or_else(|| base.passphrase.clone()),
            format: self.format.or(base.format),
            read: self.read.or(base.read),
            force: self.force.or(base.force),
            destroy: self.destroy.or(base.destroy),
            timeout_secs: self.timeout_secs.or(base.timeout_secs),
        }
    }

    /// Apply defaults and freeze the request.
    pub fn into_request(self) -> GenerationRequest {
        GenerationRequest {
            location: non_empty_path(self.location).unwrap_or_else(default_location),
            executable_path: non_empty_path(self.executable_path)
                .unwrap_or_else(default_executable),
            key_type: non_empty(self.key_type).unwrap_or_else(|| DEFAULT_KEY_TYPE.to_string()),
            bit_size: non_empty(self.bit_size).unwrap_or_else(|| DEFAULT_BIT_SIZE.to_string()),
            comment: self.comment.unwrap_or_default(),
            passphrase: self.passphrase.unwrap_or_default(),
            output_format: self.format.unwrap_or_default(),
            read_back: self.read.unwrap_or(true),
            force_overwrite: self.force.unwrap_or(true),
            destroy_after_read: self.destroy.unwrap_or(false),
            timeout: self.timeout_secs.map(Duration::from_secs),
        }
    }
}

/// Fully defaulted configuration for one generation call.
#[derive(Clone, PartialEq)]
pub struct GenerationRequest {
    pub location: PathBuf,
    pub executable_path: PathBuf,
    pub key_type: String,
    pub bit_size: String,
    pub comment: String,
    pub passphrase: String,
    pub output_format: KeyFormat,
    pub read_back: bool,
    pub force_overwrite: bool,
    /// Only honored when `read_back` is set; destruction happens on the read path.
    pub destroy_after_read: bool,
    pub timeout: Option<Duration>,
}

impl GenerationRequest {
    pub fn key_files(&self) -> KeyFilePair {
        KeyFilePair::from_location(&self.location)
    }
}

impl Default for GenerationRequest {
    fn default() -> Self {
        KeygenOptions::default().into_request()
    }
}

// Passphrase stays out of logs and panic messages.
impl std::fmt::Debug for GenerationRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GenerationRequest")
            .field("location", &self.location)
            .field("executable_path", &self.executable_path)
            .field("key_type", &self.key_type)
            .field("bit_size", &self.bit_size)
            .field("comment", &self.comment)
            .field("passphrase", &"<redacted>")
            .field("output_format", &self.output_format)
            .field("read_back", &self.read_back)
            .field("force_overwrite", &self.force_overwrite)
            .field("destroy_after_read", &self.destroy_after_read)
            .field("timeout", &self.timeout)
            .finish()
    }
}
