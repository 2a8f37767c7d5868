//! Preflight validation checks for early failure detection
//!
//! Commands call these before prompting so that running outside a
//! repository fails with a clear message instead of a raw git error.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::debug;

/// Validate that `start` is inside a git work tree, returning its root
pub fn check_git_repository(start: &Path) -> Result<PathBuf> {
    let repo = git2::Repository::discover(start).context(
        "Not in a git repository. Please run this command from within a git repository.",
    )?;

    let workdir = repo
        .workdir()
        .context("Repository has no working directory (bare repositories are not supported)")?
        .to_path_buf();
    debug!(workdir = %workdir.display(), "found git repository");

    Ok(workdir)
}
