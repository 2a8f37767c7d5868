//! Process-level access to the `git` binary.

use std::path::{Path, PathBuf};
use std::process::Command;

use tracing::debug;

use crate::git::GitError;

/// Captured result of a single `git` invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GitOutput {
    /// Process exit code (-1 when terminated by a signal).
    pub code: i32,
    /// Standard output, lossily decoded.
    pub stdout: String,
    /// Standard error, lossily decoded.
    pub stderr: String,
}

impl GitOutput {
    /// Builds a successful output with the given stdout.
    pub fn ok(stdout: impl Into<String>) -> Self {
        Self {
            code: 0,
            stdout: stdout.into(),
            stderr: String::new(),
        }
    }

    /// Builds a failed output with the given exit code and stderr.
    pub fn failed(code: i32, stderr: impl Into<String>) -> Self {
        Self {
            code,
            stdout: String::new(),
            stderr: stderr.into(),
        }
    }

    /// Whether the process exited with status zero.
    pub fn success(&self) -> bool {
        self.code == 0
    }

    /// Converts a non-zero exit into a [`GitError::CommandFailed`], yielding stdout otherwise.
    pub fn into_stdout(self, args: &[&str]) -> Result<String, GitError> {
        if self.success() {
            Ok(self.stdout)
        } else {
            Err(GitError::CommandFailed {
                args: args.join(" "),
                code: self.code,
                stderr: self.stderr.trim().to_string(),
            })
        }
    }
}

/// Runs `git` with a list of arguments and captures its output.
///
/// A non-zero exit status is not an error at this level; only failing to
/// start the process is. Callers decide which exit codes matter.
pub trait GitRunner {
    /// Runs `git <args>` and waits for it to finish.
    fn run(&self, args: &[&str]) -> Result<GitOutput, GitError>;
}

/// [`GitRunner`] backed by the `git` executable on `PATH`.
#[derive(Debug, Clone, Default)]
pub struct GitCli {
    workdir: Option<PathBuf>,
}

impl GitCli {
    /// Runs git inside the given directory.
    pub fn in_dir<P: AsRef<Path>>(path: P) -> Self {
        Self {
            workdir: Some(path.as_ref().to_path_buf()),
        }
    }
}

impl GitRunner for GitCli {
    fn run(&self, args: &[&str]) -> Result<GitOutput, GitError> {
        debug!(?args, workdir = ?self.workdir, "running git");

        let mut command = Command::new("git");
        command.args(args);
        if let Some(dir) = &self.workdir {
            command.current_dir(dir);
        }

        let output = command.output().map_err(|source| GitError::Spawn {
            args: args.join(" "),
            source,
        })?;

        let result = GitOutput {
            code: output.status.code().unwrap_or(-1),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        };
        debug!(code = result.code, "git finished");

        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn into_stdout_passes_through_success() {
        let out = GitOutput::ok("a.txt\n");
        assert_eq!(out.into_stdout(&["diff"]).unwrap(), "a.txt\n");
    }

    #[test]
    fn into_stdout_reports_failure() {
        let out = GitOutput::failed(1, "  fatal: bad revision\n");
        let err = out.into_stdout(&["log", "nope..HEAD"]).unwrap_err();
        match err {
            GitError::CommandFailed { args, code, stderr } => {
                assert_eq!(args, "log nope..HEAD");
                assert_eq!(code, 1);
                assert_eq!(stderr, "fatal: bad revision");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
