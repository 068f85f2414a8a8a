//! CLI interface module
//!
//! Every command opens storage directly; no running server is required.

pub mod commands;

use std::fmt;
use std::sync::Arc;

use crate::cli::{Commands, ConfigCommands};
use crate::config::StaticConfig;
use crate::services::{LinkRegistry, UserStore};
use crate::storage::{KvStore, StorageFactory};
use commands::{add_link, config_generate, list_links, remove_link, set_user, update_link};

#[derive(Debug)]
pub enum CliError {
    StorageError(String),
    CommandError(String),
}

impl CliError {
    /// Format as simple output
    pub fn format_simple(&self) -> String {
        match self {
            CliError::StorageError(msg) => format!("Storage error: {}", msg),
            CliError::CommandError(msg) => format!("Command error: {}", msg),
        }
    }

    /// Format as colored output
    pub fn format_colored(&self) -> String {
        use colored::Colorize;
        match self {
            CliError::StorageError(msg) => {
                format!("{} {}", "Storage error:".red().bold(), msg.white())
            }
            CliError::CommandError(msg) => {
                format!("{} {}", "Command error:".red().bold(), msg.white())
            }
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for CliError {}

impl From<crate::errors::LinkShortenerError> for CliError {
    fn from(err: crate::errors::LinkShortenerError) -> Self {
        CliError::StorageError(err.to_string())
    }
}

async fn open_store(config: &StaticConfig) -> Result<Arc<dyn KvStore>, CliError> {
    let store = StorageFactory::create(&config.database).await?;
    if store.backend_name() == "memory" {
        eprintln!("Warning: memory storage does not persist; changes are discarded on exit");
    }
    Ok(store)
}

/// Run a CLI command from clap-parsed input
pub async fn run_cli_command(cmd: Commands, config: &StaticConfig) -> Result<(), CliError> {
    // config generate doesn't need storage
    if let Commands::Config { action } = cmd {
        let ConfigCommands::Generate { output_path, force } = action;
        return config_generate(output_path, force);
    }

    let store = open_store(config).await?;

    match cmd {
        Commands::List => list_links(&LinkRegistry::new(store)).await,
        Commands::Add {
            name,
            target,
            force,
        } => add_link(&LinkRegistry::new(store), name, target, force).await,
        Commands::Update { name, target } => {
            update_link(&LinkRegistry::new(store), name, target).await
        }
        Commands::Remove { name } => remove_link(&LinkRegistry::new(store), name).await,
        Commands::SetUser {
            username,
            password,
            root,
        } => set_user(&UserStore::new(store), username, password, root).await,
        Commands::Serve => Err(CliError::CommandError(
            "serve is handled by the server mode".to_string(),
        )),
        Commands::Config { .. } => unreachable!("handled above"),
    }
}
