//! Release notes aggregation and version handling.

pub mod notes;
pub mod version;

use anyhow::Result;
use tracing::debug;

use crate::config::Config;
use crate::git::{GitRepository, GitRunner};

pub use notes::{
    categorize, extract_contributors, extract_issue_refs, ReleaseCommit, ReleaseNotes, Section,
};
pub use version::{ReleaseVersion, VersionError};

/// Collects release entries for every non-merge commit after `since`.
///
/// Without `since` the most recent tag is used, and without any tag the
/// whole history up to HEAD.
pub fn collect_commits<R: GitRunner>(
    repo: &GitRepository<R>,
    since: Option<&str>,
    config: &Config,
) -> Result<Vec<ReleaseCommit>> {
    let range = repo.release_range(since)?;
    let entries = repo.log(&range)?;
    debug!(%range, count = entries.len(), "collected commits for release");

    Ok(entries
        .iter()
        .map(|entry| ReleaseCommit::from_log_entry(entry, config.auto_extract_contributors))
        .collect())
}

/// Builds release notes for `version` from the commits after `since`.
pub fn build_notes<R: GitRunner>(
    repo: &GitRepository<R>,
    version: &str,
    since: Option<&str>,
    config: &Config,
) -> Result<ReleaseNotes> {
    let commits = collect_commits(repo, since, config)?;
    Ok(ReleaseNotes::build(version, commits, config))
}
