//! Interactive commit command.

use std::path::Path;

use anyhow::Result;
use clap::Parser;

use crate::cli::{load_config, open_repository};
use crate::prompt::Prompter;
use crate::workflow::CommitFlow;

/// Commit command options.
#[derive(Parser)]
pub struct CommitCommand {}

impl CommitCommand {
    /// Executes the commit command.
    pub fn execute(self, config_path: Option<&Path>) -> Result<i32> {
        let config = load_config(config_path)?;
        let repo = open_repository()?;
        let mut prompter = Prompter::stdio();

        let outcome = CommitFlow::new(&repo, &config, &mut prompter).run()?;
        Ok(outcome.exit_code())
    }
}
