//! Staging-area validation command.

use std::path::Path;

use anyhow::Result;
use clap::Parser;

use crate::cli::{load_config, open_repository};
use crate::prompt::Prompter;
use crate::workflow::validate_staging;

/// Validate command options.
#[derive(Parser)]
pub struct ValidateCommand {
    /// Unstages ignored files instead of failing.
    #[arg(long)]
    pub unstage: bool,
}

impl ValidateCommand {
    /// Executes the validate command.
    pub fn execute(self, config_path: Option<&Path>) -> Result<i32> {
        let config = load_config(config_path)?;
        let repo = open_repository()?;
        let mut prompter = Prompter::stdio();

        let outcome = validate_staging(&repo, &config, &mut prompter, self.unstage)?;
        Ok(outcome.exit_code())
    }
}
