//! Interactive release tagging.

use std::fs;
use std::io::{BufRead, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing::{info, warn};

use crate::config::Config;
use crate::git::{GitRepository, GitRunner};
use crate::prompt::Prompter;
use crate::release::{collect_commits, ReleaseNotes, ReleaseVersion};
use crate::workflow::{FlowOutcome, RULE_WIDTH};

/// Settings for one release run.
#[derive(Debug, Clone)]
pub struct ReleaseOptions {
    /// Push the tag after creating it.
    pub push: bool,
    /// Remote receiving the tag.
    pub remote: String,
    /// Tag to collect commits from instead of the latest one.
    pub since: Option<String>,
    /// Directory receiving saved notes when the release is declined.
    pub notes_dir: PathBuf,
}

impl Default for ReleaseOptions {
    fn default() -> Self {
        Self {
            push: false,
            remote: "origin".to_string(),
            since: None,
            notes_dir: PathBuf::from("."),
        }
    }
}

/// Previews release notes and turns them into an annotated tag.
pub struct ReleaseFlow<'a, G: GitRunner, R, W> {
    repo: &'a GitRepository<G>,
    config: &'a Config,
    prompter: &'a mut Prompter<R, W>,
    options: ReleaseOptions,
}

impl<'a, G, R, W> ReleaseFlow<'a, G, R, W>
where
    G: GitRunner,
    R: BufRead,
    W: Write,
{
    /// Creates a release flow over `repo`.
    pub fn new(
        repo: &'a GitRepository<G>,
        config: &'a Config,
        prompter: &'a mut Prompter<R, W>,
        options: ReleaseOptions,
    ) -> Self {
        Self {
            repo,
            config,
            prompter,
            options,
        }
    }

    /// Releases `version`. The version is checked before git is touched.
    pub fn run(mut self, version: &str) -> Result<FlowOutcome> {
        let version = ReleaseVersion::parse(version)?;

        self.prompter
            .say(format!("🏷️  Creating release: {version}"))?;
        self.prompter.say("=".repeat(RULE_WIDTH))?;

        let commits = collect_commits(self.repo, self.options.since.as_deref(), self.config)?;
        if commits.is_empty() {
            self.prompter.say("⚠️  No new commits since last release")?;
            if !self.prompter.confirm("Create release anyway?")? {
                return Ok(FlowOutcome::Cancelled);
            }
        }

        let notes = ReleaseNotes::build(version.as_str(), commits, self.config);
        let text = notes.render_text();

        self.prompter.say("")?;
        self.prompter.say("📄 Release Notes Preview:")?;
        self.prompter.say("-".repeat(RULE_WIDTH))?;
        self.prompter.say(text.trim_end())?;
        self.prompter.say("-".repeat(RULE_WIDTH))?;

        if !self
            .prompter
            .confirm("\n✅ Create release with these notes?")?
        {
            return self.keep_notes_for_editing(&version, &text);
        }

        self.create_tag(&version, &text)?;
        self.prompter
            .say(format!("✅ Created release tag: {version}"))?;
        info!(tag = %version, commits = notes.commit_count(), "created release tag");

        if self.options.push {
            self.push_tag(&version)?;
        } else {
            self.prompter.say(format!(
                "💡 To push tag, run: git push {} {version}",
                self.options.remote
            ))?;
        }

        Ok(FlowOutcome::Completed)
    }

    fn keep_notes_for_editing(
        &mut self,
        version: &ReleaseVersion,
        text: &str,
    ) -> Result<FlowOutcome> {
        if self.prompter.confirm("📝 Save notes to file for editing?")? {
            let path = self.options.notes_dir.join(version.notes_file_name());
            fs::write(&path, text)
                .with_context(|| format!("Failed to write release notes: {}", path.display()))?;

            self.prompter
                .say(format!("✅ Saved to {}", path.display()))?;
            self.prompter.say(format!(
                "   Edit and run: git tag -a {version} -F {}",
                path.display()
            ))?;
        }

        Ok(FlowOutcome::Cancelled)
    }

    fn create_tag(&self, version: &ReleaseVersion, text: &str) -> Result<()> {
        let mut notes_file = tempfile::Builder::new()
            .prefix("release-notes-")
            .suffix(".md")
            .tempfile()
            .context("Failed to create temporary release notes file")?;
        notes_file
            .write_all(text.as_bytes())
            .and_then(|()| notes_file.flush())
            .context("Failed to write temporary release notes file")?;

        let tagged = self
            .repo
            .create_annotated_tag(version.as_str(), notes_file.path());

        if let Err(e) = notes_file.close() {
            warn!("Failed to remove temporary release notes file: {e}");
        }

        tagged
    }

    fn push_tag(&mut self, version: &ReleaseVersion) -> Result<()> {
        let remote = &self.options.remote;

        self.prompter.say("📤 Pushing tag to remote...")?;
        self.repo
            .push_tag(remote, version.as_str())
            .with_context(|| {
                format!(
                    "Tag {version} was created locally; push it manually with: git push {remote} {version}"
                )
            })?;
        self.prompter.say("✅ Tag pushed successfully")?;
        Ok(())
    }
}
