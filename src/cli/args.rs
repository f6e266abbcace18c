//! CLI argument definitions using clap
//!
//! Commands:
//! - menagerie init --config <path>
//! - menagerie serve --config <path> [--port <port>]

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Menagerie - a small self-hostable animal registry
#[derive(Parser, Debug)]
#[command(name = "menagerie")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Initialize the data file and images directory
    Init {
        /// Path to configuration file
        #[arg(long, default_value = "./menagerie.json")]
        config: PathBuf,
    },

    /// Start the registry HTTP server
    Serve {
        /// Path to configuration file
        #[arg(long, default_value = "./menagerie.json")]
        config: PathBuf,

        /// Override the configured port
        #[arg(long)]
        port: Option<u16>,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
