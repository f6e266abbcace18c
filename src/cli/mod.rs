//! # CLI
//!
//! Argument parsing and the `init` / `serve` commands.

pub mod args;
pub mod commands;
pub mod errors;

pub use commands::{run, Config};
pub use errors::{CliError, CliResult};
