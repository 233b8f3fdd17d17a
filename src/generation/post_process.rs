//! Post-processing after a successful run: read back, and optionally destroy, the key files.

use crate::error::{FsOp, KeygenError, KeygenResult};
use crate::fs::KeyFileSystem;
use crate::types::{GeneratedKeys, KeyFilePair};
use std::path::Path;
use tracing::info;

/// Read the private key, then the public key, each fully handled before the next.
///
/// With `destroy`, each file is removed right after its read completes and both
/// texts are trimmed with [`trim_key_text`]. Any error aborts the call; files
/// already removed stay removed.
pub async fn read_key_files(
    fs: &dyn KeyFileSystem,
    files: &KeyFilePair,
    destroy: bool,
) -> KeygenResult<GeneratedKeys> {
    let private_key = read_one(fs, &files.private_key, destroy).await?;
    let public_key = read_one(fs, &files.public_key, destroy).await?;

    if destroy {
        return Ok(GeneratedKeys {
            private_key: trim_key_text(&private_key),
            public_key: trim_key_text(&public_key),
        });
    }
    Ok(GeneratedKeys {
        private_key,
        public_key,
    })
}

async fn read_one(fs: &dyn KeyFileSystem, path: &Path, destroy: bool) -> KeygenResult<String> {
    info!(component = "post_process", path = %path.display(), "reading key file");
    let text = fs
        .read_to_string(path)
        .await
        .map_err(|e| KeygenError::fs(FsOp::Read, path, e))?;

    if destroy {
        info!(component = "post_process", path = %path.display(), "destroying key file");
        fs.remove_file(path)
            .await
            .map_err(|e| KeygenError::fs(FsOp::Remove, path, e))?;
    }
    Ok(text)
}

/// Drop everything from the last newline on, then trim both ends.
///
/// Text without any newline trims to the empty string.
pub fn trim_key_text(text: &str) -> String {
    match text.rfind('\n') {
        Some(index) => text[..index].trim().to_string(),
        None => String::new(),
    }
}
