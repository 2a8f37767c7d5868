//! Release tagging command.

use std::path::Path;

use anyhow::Result;
use clap::Parser;

use crate::cli::{load_config, open_repository};
use crate::prompt::Prompter;
use crate::release::ReleaseVersion;
use crate::workflow::{ReleaseFlow, ReleaseOptions};

/// Release command options.
#[derive(Parser)]
pub struct ReleaseCommand {
    /// Version to release (e.g. v1.2.3 or 1.2.3).
    #[arg(value_name = "VERSION")]
    pub version: String,

    /// Pushes the new tag to the remote.
    #[arg(long)]
    pub push: bool,

    /// Remote receiving the tag when pushing.
    #[arg(long, default_value = "origin")]
    pub remote: String,

    /// Collects commits after this tag instead of the latest one.
    #[arg(long, value_name = "TAG")]
    pub since: Option<String>,
}

impl ReleaseCommand {
    /// Executes the release command.
    pub fn execute(self, config_path: Option<&Path>) -> Result<i32> {
        // Reject malformed versions before touching the repository.
        ReleaseVersion::parse(&self.version)?;

        let config = load_config(config_path)?;
        let repo = open_repository()?;
        let mut prompter = Prompter::stdio();

        let options = ReleaseOptions {
            push: self.push,
            remote: self.remote,
            since: self.since,
            ..ReleaseOptions::default()
        };

        let outcome = ReleaseFlow::new(&repo, &config, &mut prompter, options).run(&self.version)?;
        Ok(outcome.exit_code())
    }
}
