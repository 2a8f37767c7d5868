//! Configuration-related CLI commands.

use std::path::Path;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use crate::cli::load_config;
use crate::config::Config;

/// Configuration operations.
#[derive(Parser)]
pub struct ConfigCommand {
    /// Configuration subcommand to execute.
    #[command(subcommand)]
    pub command: ConfigSubcommands,
}

/// Configuration subcommands.
#[derive(Subcommand)]
pub enum ConfigSubcommands {
    /// Shows the effective configuration, creating the default file if missing.
    Show(ShowCommand),
}

/// Show command options.
#[derive(Parser)]
pub struct ShowCommand {}

impl ConfigCommand {
    /// Executes the config command.
    pub fn execute(self, config_path: Option<&Path>) -> Result<i32> {
        match self.command {
            ConfigSubcommands::Show(show_cmd) => show_cmd.execute(config_path),
        }
    }
}

impl ShowCommand {
    /// Executes the show command.
    pub fn execute(self, config_path: Option<&Path>) -> Result<i32> {
        let path = match config_path {
            Some(path) => path.to_path_buf(),
            None => Config::default_path()?,
        };
        let config = load_config(Some(&path))?;

        println!("# {}", path.display());
        println!(
            "{}",
            serde_json::to_string_pretty(&config).context("Failed to serialize config")?
        );
        Ok(0)
    }
}
