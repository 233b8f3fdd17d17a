//! CLI domain: parse, route, and output only.
//! No generation logic; the route table dispatches to the public API.

mod output;
mod parse;
mod route;

pub use output::{format_generation_json, format_generation_text, format_resolved, map_error};
pub use parse::{Cli, Commands, GenerateArgs};
pub use route::RunContext;
