//! CLI output: error mapping and result formatting.

use crate::error::KeygenError;
use crate::request::GenerationRequest;
use crate::resolver::ResolvedBinary;
use crate::types::GeneratedKeys;
use serde_json::json;

/// Map domain errors to a string for CLI output.
pub fn map_error(e: &KeygenError) -> String {
    match e {
        KeygenError::GenerationFailed(stderr) => {
            format!("ssh-keygen failed: {}", stderr.trim_end())
        }
        other => other.to_string(),
    }
}

/// Text output: both keys, or where they were written when read-back is off.
pub fn format_generation_text(request: &GenerationRequest, keys: Option<&GeneratedKeys>) -> String {
    let files = request.key_files();
    match keys {
        Some(keys) => format!(
            "{}\n\n{}",
            keys.private_key.trim_end(),
            keys.public_key.trim_end()
        ),
        None => format!(
            "Key pair written to {} and {}",
            files.private_key.display(),
            files.public_key.display()
        ),
    }
}

pub fn format_generation_json(
    request: &GenerationRequest,
    keys: Option<&GeneratedKeys>,
) -> Result<String, KeygenError> {
    let files = request.key_files();
    let value = json!({
        "privateKeyPath": files.private_key.display().to_string(),
        "publicKeyPath": files.public_key.display().to_string(),
        "destroyed": request.read_back && request.destroy_after_read,
        "keys": keys,
    });
    serde_json::to_string_pretty(&value)
        .map_err(|e| KeygenError::Runtime(format!("Failed to render JSON: {}", e)))
}

pub fn format_resolved(binary: &ResolvedBinary) -> String {
    if binary.used_fallback {
        format!("{} (bundled fallback)", binary.path.display())
    } else {
        binary.path.display().to_string()
    }
}
