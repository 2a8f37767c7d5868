//! Git invocation errors.

use thiserror::Error;

/// Failures raised while running the `git` binary.
#[derive(Error, Debug)]
pub enum GitError {
    /// The `git` process could not be started at all.
    #[error("Failed to run git {args}: {source}")]
    Spawn {
        /// Space-joined argument list.
        args: String,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// `git` ran but exited with a non-zero status.
    #[error("git {args} exited with status {code}: {stderr}")]
    CommandFailed {
        /// Space-joined argument list.
        args: String,
        /// Exit code, or -1 when terminated by a signal.
        code: i32,
        /// Trimmed standard error output.
        stderr: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn command_failed_display_includes_stderr() {
        let err = GitError::CommandFailed {
            args: "tag -a v1.0.0".to_string(),
            code: 128,
            stderr: "fatal: tag 'v1.0.0' already exists".to_string(),
        };
        let text = err.to_string();
        assert!(text.contains("tag -a v1.0.0"));
        assert!(text.contains("128"));
        assert!(text.contains("already exists"));
    }
}
