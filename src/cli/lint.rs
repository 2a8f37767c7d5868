//! Commit message lint command, usable as a `commit-msg` hook.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::Parser;

use crate::cli::load_config;
use crate::conventional::validate_message;

/// Lint command options.
#[derive(Parser)]
pub struct LintCommand {
    /// Commit message to check.
    #[arg(value_name = "MESSAGE", conflicts_with = "file")]
    pub message: Option<String>,

    /// Reads the message from a commit message file (e.g. .git/COMMIT_EDITMSG).
    #[arg(long, value_name = "PATH")]
    pub file: Option<PathBuf>,
}

impl LintCommand {
    /// Executes the lint command.
    pub fn execute(self, config_path: Option<&Path>) -> Result<i32> {
        let message = match (self.message, self.file) {
            (Some(message), _) => message,
            (None, Some(path)) => {
                let contents = fs::read_to_string(&path).with_context(|| {
                    format!("Failed to read commit message file: {}", path.display())
                })?;
                subject_line(&contents).to_string()
            }
            (None, None) => bail!("Provide a commit message or --file PATH"),
        };

        let config = load_config(config_path)?;
        match validate_message(&message, &config) {
            Ok(()) => {
                println!("✅ Valid commit message");
                Ok(0)
            }
            Err(reason) => {
                println!("❌ {reason}");
                println!("   Message: {message}");
                Ok(1)
            }
        }
    }
}

/// First line that is neither blank nor a `#` comment.
fn subject_line(contents: &str) -> &str {
    contents
        .lines()
        .map(str::trim_end)
        .find(|line| !line.trim().is_empty() && !line.starts_with('#'))
        .unwrap_or("")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn subject_skips_comments_and_blanks() {
        let contents = "\n# Please enter the commit message\nfeat(cli): add lint\n\nBody text\n";
        assert_eq!(subject_line(contents), "feat(cli): add lint");
    }

    #[test]
    fn subject_of_comment_only_file_is_empty() {
        assert_eq!(subject_line("# nothing here\n#\n"), "");
    }

    #[test]
    fn subject_strips_trailing_whitespace() {
        assert_eq!(subject_line("fix: trim me   \r\n"), "fix: trim me");
    }

    fn lint(message: Option<&str>, file: Option<PathBuf>, config: &Path) -> Result<i32> {
        LintCommand {
            message: message.map(String::from),
            file,
        }
        .execute(Some(config))
    }

    #[test]
    fn lint_reports_exit_codes() {
        let dir = tempfile::tempdir().unwrap();
        let config = dir.path().join("config.json");

        assert_eq!(lint(Some("feat: add lint"), None, &config).unwrap(), 0);
        assert_eq!(lint(Some("Add lint"), None, &config).unwrap(), 1);
        assert_eq!(lint(Some("FEAT: add lint"), None, &config).unwrap(), 1);
    }

    #[test]
    fn lint_reads_message_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = dir.path().join("config.json");
        let message = dir.path().join("COMMIT_EDITMSG");
        fs::write(&message, "# comment\ndocs: describe hook setup\n").unwrap();

        assert_eq!(lint(None, Some(message), &config).unwrap(), 0);
    }

    #[test]
    fn lint_without_input_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let config = dir.path().join("config.json");
        assert!(lint(None, None, &config).is_err());
    }
}
