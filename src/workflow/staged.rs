//! Staging-area validation against the ignore list.

use std::io::{BufRead, Write};

use anyhow::Result;

use crate::config::Config;
use crate::git::{GitRepository, GitRunner};
use crate::prompt::Prompter;
use crate::workflow::FlowOutcome;

/// Staged paths and the subset matching an ignore pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StagedCheck {
    /// Every staged path.
    pub staged: Vec<String>,
    /// Staged paths matching an ignore pattern.
    pub ignored: Vec<String>,
}

impl StagedCheck {
    /// Reads the staging area and flags ignored paths.
    pub fn run<G: GitRunner>(repo: &GitRepository<G>, config: &Config) -> Result<Self> {
        let staged = repo.staged_files()?;
        let ignored = config.ignored_among(&staged).into_iter().cloned().collect();
        Ok(Self { staged, ignored })
    }

    /// Something is staged and nothing staged is ignored.
    pub fn is_valid(&self) -> bool {
        !self.staged.is_empty() && self.ignored.is_empty()
    }

    /// Prints the outcome of the check in operator-facing form.
    pub(crate) fn report<R: BufRead, W: Write>(&self, out: &mut Prompter<R, W>) -> Result<()> {
        if self.staged.is_empty() {
            out.say("❌ No files staged for commit")?;
        } else if !self.ignored.is_empty() {
            out.say("⚠️  Found ignored files in staging area:")?;
            for file in &self.ignored {
                out.say(format!("   - {file}"))?;
            }
        } else {
            out.say(format!("✅ Validated {} staged files", self.staged.len()))?;
        }
        Ok(())
    }
}

/// Checks the staging area, optionally unstaging ignored files.
pub fn validate_staging<G, R, W>(
    repo: &GitRepository<G>,
    config: &Config,
    out: &mut Prompter<R, W>,
    unstage: bool,
) -> Result<FlowOutcome>
where
    G: GitRunner,
    R: BufRead,
    W: Write,
{
    let mut check = StagedCheck::run(repo, config)?;
    check.report(out)?;

    if !check.ignored.is_empty() {
        if !unstage {
            out.say("")?;
            out.say(format!(
                "🔧 To unstage: git reset HEAD {}",
                check.ignored.join(" ")
            ))?;
            return Ok(FlowOutcome::Aborted);
        }

        repo.unstage(&check.ignored)?;
        out.say("✅ Unstaged ignored files")?;

        check = StagedCheck::run(repo, config)?;
        check.report(out)?;
    }

    Ok(if check.is_valid() {
        FlowOutcome::Completed
    } else {
        FlowOutcome::Aborted
    })
}
