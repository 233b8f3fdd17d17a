//! CLI parse: clap types for Keyforge. No behavior beyond mapping flags to options.

use crate::request::KeygenOptions;
use crate::types::KeyFormat;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Keyforge CLI - SSH key pair generation via ssh-keygen
#[derive(Parser)]
#[command(name = "keyforge")]
#[command(about = "Generate SSH key pairs with ssh-keygen and manage the key files")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration file path (overrides default config loading)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging (default: off)
    #[arg(long, global = true)]
    pub verbose: bool,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long, global = true)]
    pub log_format: Option<String>,

    /// Log output (stdout, stderr)
    #[arg(long, global = true)]
    pub log_output: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Generate a key pair
    Generate(GenerateArgs),
    /// Show which ssh-keygen binary would be used
    Resolve {
        /// Candidate path or command name (default: platform ssh-keygen)
        #[arg(long)]
        path: Option<PathBuf>,
    },
}

#[derive(Args, Debug, Clone, Default)]
pub struct GenerateArgs {
    /// Private key path; the public key goes to <location>.pub
    #[arg(long)]
    pub location: Option<PathBuf>,

    /// ssh-keygen binary to run
    #[arg(long = "ssh-keygen-path")]
    pub executable_path: Option<PathBuf>,

    /// Key type (default: rsa)
    #[arg(long = "type")]
    pub key_type: Option<String>,

    /// Key size in bits (default: 2048)
    #[arg(long)]
    pub bits: Option<String>,

    /// Key comment
    #[arg(long)]
    pub comment: Option<String>,

    /// Passphrase for the private key (default: none)
    #[arg(long)]
    pub passphrase: Option<String>,

    /// Key encoding: RFC4716, PKCS8 or PEM
    #[arg(long)]
    pub format: Option<KeyFormat>,

    /// Leave the keys on disk without printing them
    #[arg(long)]
    pub no_read: bool,

    /// Fail if a key file already exists instead of replacing it
    #[arg(long)]
    pub no_force: bool,

    /// Delete the key files after reading them
    #[arg(long)]
    pub destroy: bool,

    /// Kill ssh-keygen after this many seconds
    #[arg(long)]
    pub timeout_secs: Option<u64>,

    /// Print JSON instead of text
    #[arg(long)]
    pub json: bool,
}

impl GenerateArgs {
    /// Options set on the command line; unset flags stay `None` so configuration can fill them.
    pub fn to_options(&self) -> KeygenOptions {
        KeygenOptions {
            location: self.location.clone(),
            executable_path: self.executable_path.clone(),
            key_type: self.key_type.clone(),
            bit_size: self.bits.clone(),
            comment: self.comment.clone(),
            passphrase: self.passphrase.clone(),
            format: self.format,
            read: self.no_read.then_some(false),
            force: self.no_force.then_some(false),
            destroy: self.destroy.then_some(true),
            timeout_secs: self.timeout_secs,
        }
    }
}
