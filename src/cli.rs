//! CLI interface for commitsmith.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use crate::config::Config;
use crate::git::GitRepository;
use crate::utils::check_git_repository;

pub mod commit;
pub mod config;
pub mod help;
pub mod lint;
pub mod notes;
pub mod release;
pub mod validate;

/// commitsmith: conventional commits and release tags from the terminal.
#[derive(Parser)]
#[command(name = "commitsmith")]
#[command(about = "Conventional commit and release helper", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Path to the configuration file (defaults to ~/.commitsmith/config.json).
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// The main command to execute.
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands.
#[derive(Subcommand)]
pub enum Commands {
    /// Interactively authors a conventional commit from staged changes.
    Commit(commit::CommitCommand),
    /// Checks the staging area for ignored files.
    Validate(validate::ValidateCommand),
    /// Creates an annotated release tag carrying generated release notes.
    Release(release::ReleaseCommand),
    /// Prints release notes for commits since the last tag.
    Notes(notes::NotesCommand),
    /// Checks a commit message against the conventional grammar.
    Lint(lint::LintCommand),
    /// Configuration inspection.
    Config(config::ConfigCommand),
    /// Displays comprehensive help for all commands.
    #[command(name = "help-all")]
    HelpAll(help::HelpCommand),
}

impl Cli {
    /// Executes the CLI command, returning the process exit code.
    pub fn execute(self) -> Result<i32> {
        let config_path = self.config;
        let config_path = config_path.as_deref();

        match self.command {
            Commands::Commit(cmd) => cmd.execute(config_path),
            Commands::Validate(cmd) => cmd.execute(config_path),
            Commands::Release(cmd) => cmd.execute(config_path),
            Commands::Notes(cmd) => cmd.execute(config_path),
            Commands::Lint(cmd) => cmd.execute(config_path),
            Commands::Config(cmd) => cmd.execute(config_path),
            Commands::HelpAll(cmd) => cmd.execute(),
        }
    }
}

/// Loads configuration from the global `--config` path or the default location.
pub(crate) fn load_config(path: Option<&Path>) -> Result<Config> {
    Config::load(path)
}

/// Opens the repository containing the current directory.
pub(crate) fn open_repository() -> Result<GitRepository> {
    let cwd = std::env::current_dir().context("Failed to determine current directory")?;
    let root = check_git_repository(&cwd)?;
    Ok(GitRepository::open_at(root))
}
