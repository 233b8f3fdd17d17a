//! Keyforge: SSH key pair generation
//!
//! Generates key pairs by running an external `ssh-keygen`, then manages the
//! resulting key files: overwrite policy before the run, optional read-back and
//! destruction after it. Key material is treated as opaque text.

pub mod api;
pub mod cli;
pub mod config;
pub mod error;
pub mod fs;
pub mod gate;
pub mod generation;
pub mod logging;
pub mod request;
pub mod resolver;
pub mod types;

pub use api::{
    generate, generate_blocking, generate_with_callback, generate_with_resolver,
    GenerationOutput, KeyGenerator,
};
pub use error::{KeygenError, KeygenResult};
pub use request::{GenerationRequest, KeygenOptions};
pub use types::{GeneratedKeys, KeyFilePair, KeyFormat};
