//! Command-line interface definitions using clap

use clap::{Parser, Subcommand};

/// link-shortener - short names, permanent redirects, request counters
#[derive(Parser)]
#[command(name = "link-shortener")]
#[command(version)]
#[command(about = "A small link shortener with a Basic-auth management API", long_about = None)]
pub struct Cli {
    /// Configuration file (default: config.toml)
    #[arg(long, short = 'c', global = true)]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the HTTP server (default)
    Serve,

    /// List all links
    List,

    /// Add a link
    Add {
        /// Link name, e.g. `docs` or `/` for the root page
        name: String,

        /// Redirect target
        target: String,

        /// Replace an existing link (resets its counter)
        #[arg(long)]
        force: bool,
    },

    /// Change the target of an existing link
    Update {
        name: String,

        /// New redirect target
        target: String,
    },

    /// Remove a link
    Remove { name: String },

    /// Create or replace a management account
    SetUser {
        username: String,

        password: String,

        /// Grant root instead of admin permission
        #[arg(long)]
        root: bool,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigCommands,
    },
}

/// Configuration management commands
#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Generate example configuration file
    Generate {
        /// Output path (default: config.example.toml, `-` for stdout)
        output_path: Option<String>,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}
