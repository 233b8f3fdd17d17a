//! Key Generation API
//!
//! Public call surface. `KeyGenerator` resolves the key generator binary once and
//! then runs any number of independent generations. The free functions offer the
//! same single call in three completion styles: `generate` (future),
//! `generate_blocking`, and `generate_with_callback`. All three share one code path.

use crate::error::{KeygenError, KeygenResult};
use crate::fs::{KeyFileSystem, TokioFileSystem};
use crate::gate::check_availability;
use crate::generation::run_generation;
use crate::request::{GenerationRequest, KeygenOptions};
use crate::resolver::{resolve_binary, HostPlatform, ResolvedBinary, ResolverConfig};
use crate::types::GeneratedKeys;
use std::path::Path;
use std::sync::Arc;
use tracing::debug;

/// Result of one generation call: key texts when read-back is on, `None` otherwise.
pub type GenerationOutput = KeygenResult<Option<GeneratedKeys>>;

/// Key generator service
///
/// Holds the resolved binary and the filesystem capability. Holds no per-call
/// state, so concurrent calls are independent as long as they use distinct
/// locations.
pub struct KeyGenerator {
    binary: ResolvedBinary,
    fs: Arc<dyn KeyFileSystem>,
}

impl KeyGenerator {
    /// Resolve `executable` for the current host.
    pub async fn new(executable: &Path, resolver: &ResolverConfig) -> KeygenResult<Self> {
        Self::with_platform(executable, HostPlatform::current(), resolver).await
    }

    /// Resolve `executable` for an explicit platform.
    pub async fn with_platform(
        executable: &Path,
        platform: HostPlatform,
        resolver: &ResolverConfig,
    ) -> KeygenResult<Self> {
        let binary = resolve_binary(executable, platform, resolver).await?;
        Ok(Self {
            binary,
            fs: Arc::new(TokioFileSystem),
        })
    }

    /// Replace the filesystem capability.
    pub fn with_file_system(mut self, fs: Arc<dyn KeyFileSystem>) -> Self {
        self.fs = fs;
        self
    }

    pub fn binary(&self) -> &ResolvedBinary {
        &self.binary
    }

    /// Gate, spawn, then post-process. The request's `executable_path` is ignored;
    /// the binary resolved at construction is used.
    pub async fn generate(&self, request: &GenerationRequest) -> GenerationOutput {
        let files = request.key_files();
        check_availability(self.fs.as_ref(), &files, request.force_overwrite).await?;
        debug!(component = "orchestrator", location = %request.location.display(), "gate passed");
        run_generation(self.fs.as_ref(), &self.binary.path, request).await
    }
}

/// Generate a key pair (future style).
pub async fn generate(options: KeygenOptions) -> GenerationOutput {
    generate_with_resolver(options, &ResolverConfig::default()).await
}

/// Generate a key pair with explicit resolver settings.
pub async fn generate_with_resolver(
    options: KeygenOptions,
    resolver: &ResolverConfig,
) -> GenerationOutput {
    let request = options.into_request();
    let generator = KeyGenerator::new(&request.executable_path, resolver).await?;
    generator.generate(&request).await
}

/// Generate a key pair, blocking the calling thread until it completes.
///
/// Builds a private current-thread runtime, so it must not be called from
/// inside a tokio runtime.
pub fn generate_blocking(options: KeygenOptions) -> GenerationOutput {
    if tokio::runtime::Handle::try_current().is_ok() {
        return Err(KeygenError::Runtime(
            "generate_blocking cannot run inside an async runtime; await generate() instead"
                .to_string(),
        ));
    }
    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|e| KeygenError::Runtime(format!("Failed to create runtime: {}", e)))?;
    rt.block_on(generate(options))
}

/// Generate a key pair and deliver the outcome to `callback` (callback style).
///
/// Returns immediately. Runs on the ambient tokio runtime when called from one,
/// otherwise on a dedicated thread.
pub fn generate_with_callback<F>(options: KeygenOptions, callback: F)
where
    F: FnOnce(GenerationOutput) + Send + 'static,
{
    match tokio::runtime::Handle::try_current() {
        Ok(handle) => {
            handle.spawn(async move {
                callback(generate(options).await);
            });
        }
        Err(_) => {
            std::thread::spawn(move || callback(generate_blocking(options)));
        }
    }
}
