//! Core data types: key encodings, the output file pair, and generation results.

use crate::error::KeygenError;
use serde::{Deserialize, Serialize};
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// On-disk key encoding requested from the key generator (`-m`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum KeyFormat {
    #[default]
    #[serde(rename = "RFC4716", alias = "rfc4716")]
    Rfc4716,
    #[serde(rename = "PKCS8", alias = "pkcs8")]
    Pkcs8,
    #[serde(rename = "PEM", alias = "pem")]
    Pem,
}

impl KeyFormat {
    pub fn as_str(self) -> &'static str {
        match self {
            KeyFormat::Rfc4716 => "RFC4716",
            KeyFormat::Pkcs8 => "PKCS8",
            KeyFormat::Pem => "PEM",
        }
    }
}

impl std::fmt::Display for KeyFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for KeyFormat {
    type Err = KeygenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "RFC4716" => Ok(KeyFormat::Rfc4716),
            "PKCS8" => Ok(KeyFormat::Pkcs8),
            "PEM" => Ok(KeyFormat::Pem),
            other => Err(KeygenError::InvalidRequest(format!(
                "Unknown key format '{}' (expected RFC4716, PKCS8 or PEM)",
                other
            ))),
        }
    }
}

/// Private and public key paths derived from one base location.
///
/// The two paths are always derived together so existence and removal
/// decisions treat them as a unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyFilePair {
    pub private_key: PathBuf,
    pub public_key: PathBuf,
}

impl KeyFilePair {
    pub fn from_location(location: &Path) -> Self {
        let mut public: OsString = location.as_os_str().to_owned();
        public.push(".pub");
        Self {
            private_key: location.to_path_buf(),
            public_key: PathBuf::from(public),
        }
    }
}

/// Key material returned when read-back is enabled. Contents are opaque text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedKeys {
    pub private_key: String,
    pub public_key: String,
}

/// What the key generator left behind once it exited.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubprocessOutcome {
    /// `None` when the process was terminated by a signal.
    pub exit_code: Option<i32>,
    pub stderr_text: String,
}
