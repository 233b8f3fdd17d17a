//! Availability gate: enforce the overwrite policy before the key generator runs.
//!
//! Existence is an accessibility probe, so the check-then-remove sequence is
//! not atomic. Callers must not run two generations against one location at once.

use crate::error::{FsOp, KeygenError, KeygenResult};
use crate::fs::KeyFileSystem;
use crate::types::KeyFilePair;
use futures::future::try_join;
use std::path::Path;
use tracing::{debug, info};

/// Check both key files and clear them when `force` is set.
///
/// Without `force`, an existing file fails the gate with `AlreadyExists`; the
/// private key is reported before the public key. With `force`, existing files
/// are removed concurrently and the first removal error is returned. On success
/// neither file exists.
pub async fn check_availability(
    fs: &dyn KeyFileSystem,
    files: &KeyFilePair,
    force: bool,
) -> KeygenResult<()> {
    debug!(
        component = "gate",
        private_key = %files.private_key.display(),
        public_key = %files.public_key.display(),
        "checking availability"
    );
    let (private_exists, public_exists) = futures::join!(
        fs.is_accessible(&files.private_key),
        fs.is_accessible(&files.public_key)
    );

    if !force {
        if private_exists {
            return Err(KeygenError::AlreadyExists {
                path: files.private_key.clone(),
            });
        }
        if public_exists {
            return Err(KeygenError::AlreadyExists {
                path: files.public_key.clone(),
            });
        }
        return Ok(());
    }

    try_join(
        remove_if(fs, &files.private_key, private_exists),
        remove_if(fs, &files.public_key, public_exists),
    )
    .await?;
    Ok(())
}

async fn remove_if(fs: &dyn KeyFileSystem, path: &Path, exists: bool) -> KeygenResult<()> {
    if !exists {
        return Ok(());
    }
    info!(component = "gate", path = %path.display(), "removing existing key file");
    fs.remove_file(path)
        .await
        .map_err(|e| KeygenError::fs(FsOp::Remove, path, e))
}
