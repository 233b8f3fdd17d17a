//! Binary resolution: find a key generator that can actually be started.
//!
//! Runs once per configuration, before any key file is probed or removed, so a
//! bad executable path never leaves the filesystem half-modified.

use crate::error::{KeygenError, KeygenResult};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::process::Stdio;
use tokio::process::Command;
use tracing::{debug, info};

/// Harmless argument used to probe a candidate; the exit status is ignored.
pub const PROBE_ARG: &str = "-?";

/// Platform default command name, resolved through the search path.
pub fn default_executable() -> PathBuf {
    if cfg!(windows) {
        PathBuf::from("ssh-keygen.exe")
    } else {
        PathBuf::from("ssh-keygen")
    }
}

/// Host OS and CPU architecture, as reported by `std::env::consts`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HostPlatform {
    pub os: &'static str,
    pub arch: &'static str,
}

impl HostPlatform {
    pub fn current() -> Self {
        Self {
            os: std::env::consts::OS,
            arch: std::env::consts::ARCH,
        }
    }

    /// File name of the bundled key generator for this platform, if one ships.
    pub fn bundled_binary_name(&self) -> Option<&'static str> {
        if self.os != "windows" {
            return None;
        }
        match self.arch {
            "x86" => Some("ssh-keygen-32.exe"),
            "x86_64" => Some("ssh-keygen-64.exe"),
            _ => None,
        }
    }
}

/// Resolver settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolverConfig {
    /// Directory holding bundled key generator binaries (default: `bin/` next to the executable)
    pub bundled_dir: Option<PathBuf>,
}

impl ResolverConfig {
    pub fn bundled_dir(&self) -> Option<PathBuf> {
        self.bundled_dir.clone().or_else(default_bundled_dir)
    }
}

fn default_bundled_dir() -> Option<PathBuf> {
    let exe = std::env::current_exe().ok()?;
    exe.parent().map(|dir| dir.join("bin"))
}

/// A key generator path that was successfully started.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedBinary {
    pub path: PathBuf,
    /// True when the supplied path failed and a bundled binary was chosen.
    pub used_fallback: bool,
}

/// Ordered candidates: the supplied path first, then any bundled fallback.
pub fn candidate_paths(
    supplied: &Path,
    platform: HostPlatform,
    bundled_dir: Option<&Path>,
) -> Vec<PathBuf> {
    let mut candidates = vec![supplied.to_path_buf()];
    if let (Some(dir), Some(name)) = (bundled_dir, platform.bundled_binary_name()) {
        let fallback = dir.join(name);
        if fallback != supplied {
            candidates.push(fallback);
        }
    }
    candidates
}

/// Start `path` with [`PROBE_ARG`] and wait for it. Only a spawn failure is an error.
pub async fn probe(path: &Path) -> std::io::Result<()> {
    let mut child = Command::new(path)
        .arg(PROBE_ARG)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .kill_on_drop(true)
        .spawn()?;
    child.wait().await?;
    Ok(())
}

/// Resolve the key generator for `supplied` on `platform`.
///
/// Returns the first candidate that starts. When none does, the error names the
/// supplied path and carries the error from probing it.
pub async fn resolve_binary(
    supplied: &Path,
    platform: HostPlatform,
    config: &ResolverConfig,
) -> KeygenResult<ResolvedBinary> {
    let bundled_dir = config.bundled_dir();
    let candidates = candidate_paths(supplied, platform, bundled_dir.as_deref());

    let mut first_error = None;
    for (index, candidate) in candidates.iter().enumerate() {
        debug!(component = "resolver", candidate = %candidate.display(), "probing key generator");
        match probe(candidate).await {
            Ok(()) => {
                info!(component = "resolver", path = %candidate.display(), "key generator resolved");
                return Ok(ResolvedBinary {
                    path: candidate.clone(),
                    used_fallback: index > 0,
                });
            }
            Err(e) => {
                debug!(component = "resolver", candidate = %candidate.display(), error = %e, "probe failed");
                first_error.get_or_insert(e);
            }
        }
    }

    Err(KeygenError::BinaryUnavailable {
        path: supplied.to_path_buf(),
        source: first_error.unwrap_or_else(|| {
            std::io::Error::new(std::io::ErrorKind::NotFound, "no candidate paths")
        }),
    })
}
