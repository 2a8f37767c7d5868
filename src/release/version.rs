//! Release version strings.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;

/// `[v]X.Y.Z` followed by anything (pre-release or build suffixes).
static VERSION_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^v?\d+\.\d+\.\d+").expect("Invalid regex"));

/// Rejected version string.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Invalid version format '{0}'. Expected: v1.2.3 or 1.2.3")]
pub struct VersionError(pub String);

/// A validated release version that always starts with `v`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseVersion(String);

impl ReleaseVersion {
    /// Validates `input` and normalizes it to carry a leading `v`.
    pub fn parse(input: &str) -> Result<Self, VersionError> {
        let input = input.trim();
        if !VERSION_REGEX.is_match(input) {
            return Err(VersionError(input.to_string()));
        }

        if input.starts_with('v') {
            Ok(Self(input.to_string()))
        } else {
            Ok(Self(format!("v{input}")))
        }
    }

    /// The normalized tag name.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// File name used when notes are saved for manual editing.
    pub fn notes_file_name(&self) -> String {
        format!("release-notes-{}.md", self.0)
    }
}

impl fmt::Display for ReleaseVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
