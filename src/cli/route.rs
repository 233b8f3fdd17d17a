//! CLI route: single route table and run context. Dispatches to the generation API.

use crate::api::KeyGenerator;
use crate::config::{ConfigLoader, KeyforgeConfig};
use crate::error::KeygenError;
use crate::resolver::{default_executable, resolve_binary, HostPlatform};
use std::path::PathBuf;

use crate::cli::output::{format_generation_json, format_generation_text, format_resolved};
use crate::cli::parse::{Commands, GenerateArgs};

/// Runtime context for CLI execution: loaded configuration only.
pub struct RunContext {
    config: KeyforgeConfig,
}

impl RunContext {
    /// Create run context from an optional config path. Uses ConfigLoader only.
    pub fn new(config_path: Option<PathBuf>) -> Result<Self, KeygenError> {
        let config = match config_path {
            Some(ref path) => ConfigLoader::load_from_file(path)?,
            None => ConfigLoader::load()?,
        };
        Ok(Self { config })
    }

    pub fn from_config(config: KeyforgeConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &KeyforgeConfig {
        &self.config
    }

    /// Execute a command and return the text to print on stdout.
    pub fn execute(&self, command: &Commands) -> Result<String, KeygenError> {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|e| KeygenError::Runtime(format!("Failed to create runtime: {}", e)))?;

        match command {
            Commands::Generate(args) => rt.block_on(self.handle_generate(args)),
            Commands::Resolve { path } => rt.block_on(self.handle_resolve(path.clone())),
        }
    }

    async fn handle_generate(&self, args: &GenerateArgs) -> Result<String, KeygenError> {
        let request = args
            .to_options()
            .merged_over(&self.config.defaults)
            .into_request();
        let generator = KeyGenerator::new(&request.executable_path, &self.config.resolver).await?;
        let keys = generator.generate(&request).await?;

        if args.json {
            format_generation_json(&request, keys.as_ref())
        } else {
            Ok(format_generation_text(&request, keys.as_ref()))
        }
    }

    async fn handle_resolve(&self, path: Option<PathBuf>) -> Result<String, KeygenError> {
        let candidate = path
            .or_else(|| self.config.defaults.executable_path.clone())
            .unwrap_or_else(default_executable);
        let resolved =
            resolve_binary(&candidate, HostPlatform::current(), &self.config.resolver).await?;
        Ok(format_resolved(&resolved))
    }
}
