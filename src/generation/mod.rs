//! Generation orchestrator: run the key generator, classify its exit, then read back.
//!
//! The gate has already run when these functions are called. Exit is fully
//! observed before any key file is read, and each read completes before its
//! file is removed.

pub mod args;
pub mod post_process;
pub mod subprocess;

pub use args::build_args;
pub use post_process::{read_key_files, trim_key_text};
pub use subprocess::run_key_generator;

use crate::error::{KeygenError, KeygenResult};
use crate::fs::KeyFileSystem;
use crate::request::GenerationRequest;
use crate::types::{GeneratedKeys, SubprocessOutcome};
use std::path::Path;
use tracing::{debug, info};

/// Classify a finished run. Stderr output wins over the exit code.
pub fn classify(outcome: SubprocessOutcome) -> KeygenResult<()> {
    if !outcome.stderr_text.is_empty() {
        return Err(KeygenError::GenerationFailed(outcome.stderr_text));
    }
    match outcome.exit_code {
        Some(0) => Ok(()),
        code => Err(KeygenError::ExitCode { code }),
    }
}

/// Spawn `binary` for `request` and realize its read/destroy semantics.
///
/// Returns `None` when read-back is off; the key files then stay on disk. A
/// failed run never touches the key files.
pub async fn run_generation(
    fs: &dyn KeyFileSystem,
    binary: &Path,
    request: &GenerationRequest,
) -> KeygenResult<Option<GeneratedKeys>> {
    let args = build_args(request);
    info!(
        component = "orchestrator",
        binary = %binary.display(),
        args = ?args::redacted_args(&args),
        "running key generator"
    );

    let outcome = run_key_generator(binary, &args, request.timeout).await?;
    classify(outcome)?;
    debug!(component = "orchestrator", "key generator succeeded");

    if !request.read_back {
        return Ok(None);
    }
    read_key_files(fs, &request.key_files(), request.destroy_after_read)
        .await
        .map(Some)
}
