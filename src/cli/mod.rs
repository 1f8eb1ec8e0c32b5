//! CLI module for authgate
//!
//! Provides command-line interface parsing for the authgate binary.
//! Uses clap for argument parsing and owo-colors for colored terminal output.

pub mod init;
pub mod output;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// authgate - a minimal credential gate
///
/// Registers users, stores Argon2 password hashes and issues signed JWTs.
#[derive(Parser, Debug)]
#[command(
    name = "authgate",
    author = "Dirmacs <build@dirmacs.com>",
    version,
    about = "authgate - minimal registration and login service",
    long_about = "Registers users, stores Argon2id password hashes and issues HS256 JWTs\n\
                  valid for 72 hours.\n\n\
                  Run without arguments to start the server, or use 'init' to scaffold a config.",
    after_help = "EXAMPLES:\n    \
                  authgate init                # Write authgate.toml and .env.example\n    \
                  authgate                     # Start the server\n    \
                  authgate --config my.toml    # Use a custom config file\n    \
                  authgate config --validate   # Check config and secrets\n    \
                  authgate openapi             # Print the OpenAPI document"
)]
pub struct Cli {
    /// Path to the configuration file
    #[arg(short, long, default_value = "authgate.toml", global = true)]
    pub config: PathBuf,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Write a starter authgate.toml, .env.example and data/ directory
    Init {
        /// Directory to initialize (defaults to current directory)
        #[arg(default_value = ".")]
        path: PathBuf,

        /// Overwrite existing files
        #[arg(short, long)]
        force: bool,

        /// Host address for the server
        #[arg(long, default_value = "127.0.0.1")]
        host: String,

        /// Port for the server
        #[arg(long, default_value = "3000")]
        port: u16,
    },

    /// Show the resolved configuration
    Config {
        /// Also check that referenced secrets are set
        #[arg(long)]
        validate: bool,
    },

    /// Print the OpenAPI document as JSON
    Openapi,
}

impl Cli {
    /// Parse CLI arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
