//! Git repository operations

use std::path::Path;

use anyhow::{bail, Context, Result};
use tracing::debug;

use crate::git::{GitCli, GitRunner};

/// Separates fields within one `git log` record.
const FIELD_SEP: char = '\u{1f}';
/// Terminates one `git log` record.
const RECORD_SEP: char = '\u{1e}';
/// `--pretty` format producing `hash FS subject FS body RS` records.
const LOG_FORMAT: &str = "--pretty=format:%H%x1f%s%x1f%b%x1e";

/// One non-merge commit as reported by `git log`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    /// Full SHA-1 hash of the commit
    pub hash: String,
    /// First line of the commit message
    pub subject: String,
    /// Remaining message text, possibly empty
    pub body: String,
}

impl LogEntry {
    /// Subject and body joined by a newline.
    pub fn full_message(&self) -> String {
        format!("{}\n{}", self.subject, self.body)
    }
}

/// Git repository wrapper driving an external `git` process
pub struct GitRepository<R: GitRunner = GitCli> {
    runner: R,
}

impl GitRepository<GitCli> {
    /// Open repository at specified path
    pub fn open_at<P: AsRef<Path>>(path: P) -> Self {
        Self::new(GitCli::in_dir(path))
    }
}

impl<R: GitRunner> GitRepository<R> {
    /// Wraps an arbitrary runner.
    pub fn new(runner: R) -> Self {
        Self { runner }
    }

    /// Access to the underlying runner
    pub fn runner(&self) -> &R {
        &self.runner
    }

    /// Runs git and fails on a non-zero exit status.
    fn run_checked(&self, args: &[&str]) -> Result<String> {
        let output = self.runner.run(args)?;
        Ok(output.into_stdout(args)?)
    }

    /// Get paths currently staged for commit
    pub fn staged_files(&self) -> Result<Vec<String>> {
        let stdout = self
            .run_checked(&["diff", "--cached", "--name-only"])
            .context("Failed to list staged files")?;

        Ok(stdout
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(String::from)
            .collect())
    }

    /// Remove files from the staging area, leaving the working tree untouched
    pub fn unstage(&self, files: &[String]) -> Result<()> {
        if files.is_empty() {
            return Ok(());
        }

        let mut args = vec!["reset", "-q", "HEAD", "--"];
        args.extend(files.iter().map(String::as_str));

        self.run_checked(&args)
            .with_context(|| format!("Failed to unstage {} file(s)", files.len()))?;
        Ok(())
    }

    /// Get the textual diff of staged changes
    pub fn staged_diff(&self) -> Result<String> {
        self.run_checked(&["diff", "--cached"])
            .context("Failed to read staged diff")
    }

    /// Most recent tag reachable from HEAD, or `None` when there is none
    pub fn latest_tag(&self) -> Result<Option<String>> {
        let output = self.runner.run(&["describe", "--tags", "--abbrev=0"])?;

        if !output.success() {
            debug!(stderr = %output.stderr.trim(), "no reachable tag");
            return Ok(None);
        }

        let tag = output.stdout.trim();
        Ok((!tag.is_empty()).then(|| tag.to_string()))
    }

    /// Whether HEAD points at a commit (false in a freshly initialised repository)
    pub fn has_commits(&self) -> Result<bool> {
        let output = self
            .runner
            .run(&["rev-parse", "--verify", "--quiet", "HEAD"])?;
        Ok(output.success())
    }

    /// Revision range covering everything after `since` (or the latest tag) up to HEAD
    pub fn release_range(&self, since: Option<&str>) -> Result<String> {
        let base = match since {
            Some(tag) => {
                reject_option_like(tag)?;
                Some(tag.to_string())
            }
            None => self.latest_tag()?,
        };

        Ok(match base {
            Some(tag) => format!("{tag}..HEAD"),
            None => "HEAD".to_string(),
        })
    }

    /// Non-merge commits in `range`, oldest first; empty when HEAD is unborn
    pub fn log(&self, range: &str) -> Result<Vec<LogEntry>> {
        reject_option_like(range)?;

        let args = ["log", range, "--no-merges", "--reverse", LOG_FORMAT];
        let output = self.runner.run(&args)?;

        if !output.success() && !self.has_commits()? {
            debug!("HEAD has no commits yet");
            return Ok(Vec::new());
        }

        let stdout = output
            .into_stdout(&args)
            .with_context(|| format!("Failed to read commit log for {range}"))?;

        Ok(parse_log(&stdout))
    }

    /// Create a commit from the staging area
    pub fn commit(&self, message: &str) -> Result<String> {
        self.run_checked(&["commit", "-m", message])
            .context("Failed to create commit")
    }

    /// Create an annotated tag whose message is read from `message_file`
    pub fn create_annotated_tag(&self, name: &str, message_file: &Path) -> Result<()> {
        let file = message_file.to_string_lossy();
        self.run_checked(&["tag", "-a", name, "-F", file.as_ref()])
            .with_context(|| format!("Failed to create tag {name}"))?;
        Ok(())
    }

    /// Push a single tag to a remote
    pub fn push_tag(&self, remote: &str, name: &str) -> Result<()> {
        self.run_checked(&["push", remote, name])
            .with_context(|| format!("Failed to push tag {name} to {remote}"))?;
        Ok(())
    }
}

/// Refuses revisions that git would read as an option.
fn reject_option_like(revision: &str) -> Result<()> {
    if revision.starts_with('-') {
        bail!("Invalid revision '{revision}': must not start with '-'");
    }
    Ok(())
}

/// Splits `git log` output produced with [`LOG_FORMAT`] into entries.
fn parse_log(output: &str) -> Vec<LogEntry> {
    output
        .split(RECORD_SEP)
        .filter_map(|record| {
            let record = record.trim_start_matches(['\n', '\r']);
            if record.trim().is_empty() {
                return None;
            }

            let mut fields = record.splitn(3, FIELD_SEP);
            let hash = fields.next()?.trim();
            let subject = fields.next()?;
            let body = fields.next().unwrap_or("");

            Some(LogEntry {
                hash: hash.to_string(),
                subject: subject.to_string(),
                body: body.trim_end().to_string(),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::git::GitOutput;
    use crate::test_utils::ScriptedGitRunner;

    fn record(hash: &str, subject: &str, body: &str) -> String {
        format!("{hash}\u{1f}{subject}\u{1f}{body}\u{1e}")
    }

    #[test]
    fn staged_files_skips_blank_lines() {
        let repo = GitRepository::new(ScriptedGitRunner::new(vec![GitOutput::ok(
            "src/main.rs\n\nCLAUDE.md\n",
        )]));

        let files = repo.staged_files().unwrap();
        assert_eq!(files, vec!["src/main.rs", "CLAUDE.md"]);
        assert_eq!(
            repo.runner().calls(),
            vec![vec!["diff", "--cached", "--name-only"]]
        );
    }

    #[test]
    fn staged_files_propagates_failure() {
        let repo = GitRepository::new(ScriptedGitRunner::new(vec![GitOutput::failed(
            128,
            "fatal: not a git repository",
        )]));

        let err = repo.staged_files().unwrap_err();
        assert!(format!("{err:#}").contains("not a git repository"));
    }

    #[test]
    fn unstage_empty_list_is_noop() {
        let repo = GitRepository::new(ScriptedGitRunner::new(vec![]));
        assert!(repo.unstage(&[]).is_ok());
        assert!(repo.runner().calls().is_empty());
    }

    #[test]
    fn unstage_passes_paths_after_separator() {
        let repo = GitRepository::new(ScriptedGitRunner::new(vec![GitOutput::ok("")]));
        repo.unstage(&["CLAUDE.md".to_string(), "notes/CLAUDE.md".to_string()])
            .unwrap();
        assert_eq!(
            repo.runner().calls(),
            vec![vec![
                "reset",
                "-q",
                "HEAD",
                "--",
                "CLAUDE.md",
                "notes/CLAUDE.md"
            ]]
        );
    }

    #[test]
    fn latest_tag_none_when_describe_fails() {
        let repo = GitRepository::new(ScriptedGitRunner::new(vec![GitOutput::failed(
            128,
            "fatal: No names found, cannot describe anything.",
        )]));
        assert_eq!(repo.latest_tag().unwrap(), None);
    }

    #[test]
    fn release_range_uses_latest_tag() {
        let repo = GitRepository::new(ScriptedGitRunner::new(vec![GitOutput::ok("v0.4.1\n")]));
        assert_eq!(repo.release_range(None).unwrap(), "v0.4.1..HEAD");
    }

    #[test]
    fn release_range_falls_back_to_full_history() {
        let repo = GitRepository::new(ScriptedGitRunner::new(vec![GitOutput::failed(128, "")]));
        assert_eq!(repo.release_range(None).unwrap(), "HEAD");
    }

    #[test]
    fn release_range_with_explicit_tag_skips_describe() {
        let repo = GitRepository::new(ScriptedGitRunner::new(vec![]));
        assert_eq!(repo.release_range(Some("v1.0.0")).unwrap(), "v1.0.0..HEAD");
        assert!(repo.runner().calls().is_empty());
    }

    #[test]
    fn log_parses_multiline_bodies() {
        let output = format!(
            "{}\n{}",
            record("aaaaaaa1111", "feat(cli): add flag", "Body line one\nThanks @alice\n"),
            record("bbbbbbb2222", "fix: handle | in subject", ""),
        );
        let repo = GitRepository::new(ScriptedGitRunner::new(vec![GitOutput::ok(output)]));

        let entries = repo.log("v1.0.0..HEAD").unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].hash, "aaaaaaa1111");
        assert_eq!(entries[0].subject, "feat(cli): add flag");
        assert_eq!(entries[0].body, "Body line one\nThanks @alice");
        assert_eq!(entries[1].subject, "fix: handle | in subject");
        assert_eq!(entries[1].body, "");

        let call = &repo.runner().calls()[0];
        assert_eq!(call[0], "log");
        assert_eq!(call[1], "v1.0.0..HEAD");
        assert!(call.contains(&"--no-merges".to_string()));
    }

    #[test]
    fn log_of_unborn_head_is_empty() {
        let repo = GitRepository::new(ScriptedGitRunner::new(vec![
            GitOutput::failed(128, "fatal: ambiguous argument 'HEAD': unknown revision"),
            GitOutput::failed(1, ""),
        ]));

        assert!(repo.log("HEAD").unwrap().is_empty());
        assert_eq!(
            repo.runner().calls()[1],
            vec!["rev-parse", "--verify", "--quiet", "HEAD"]
        );
    }

    #[test]
    fn log_failure_with_commits_propagates() {
        let repo = GitRepository::new(ScriptedGitRunner::new(vec![
            GitOutput::failed(128, "fatal: bad revision 'v9..HEAD'"),
            GitOutput::ok("0123456789abcdef\n"),
        ]));

        let err = repo.log("v9..HEAD").unwrap_err();
        assert!(format!("{err:#}").contains("bad revision"));
    }

    #[test]
    fn option_like_since_is_rejected_before_git() {
        let repo = GitRepository::new(ScriptedGitRunner::new(vec![]));

        let err = repo.release_range(Some("--output=/tmp/x")).unwrap_err();
        assert!(err.to_string().contains("must not start with '-'"));
        assert!(repo.log("--output=/tmp/x").is_err());
        assert!(repo.runner().calls().is_empty());
    }

    #[test]
    fn parse_log_empty_output() {
        assert!(parse_log("").is_empty());
        assert!(parse_log("\n").is_empty());
    }

    #[test]
    fn create_annotated_tag_reads_message_from_file() {
        let repo = GitRepository::new(ScriptedGitRunner::new(vec![GitOutput::ok("")]));
        repo.create_annotated_tag("v1.2.3", Path::new("/tmp/notes.md"))
            .unwrap();
        assert_eq!(
            repo.runner().calls(),
            vec![vec!["tag", "-a", "v1.2.3", "-F", "/tmp/notes.md"]]
        );
    }
}
