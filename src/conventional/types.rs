//! The closed vocabulary of commit types.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A conventional commit type code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CommitType {
    /// A new feature.
    Feat,
    /// An improvement to existing behaviour.
    Impr,
    /// A bug fix.
    Fix,
    /// Documentation only.
    Docs,
    /// Formatting, whitespace and similar.
    Style,
    /// Restructuring without behaviour change.
    Refactor,
    /// Performance work.
    Perf,
    /// Tests only.
    Test,
    /// Build system or dependencies.
    Build,
    /// Continuous integration configuration.
    Ci,
    /// Reverts an earlier commit.
    Revert,
    /// Anything else.
    Chore,
}

impl CommitType {
    /// Every type, in canonical order.
    pub const ALL: [Self; 12] = [
        Self::Feat,
        Self::Impr,
        Self::Fix,
        Self::Docs,
        Self::Style,
        Self::Refactor,
        Self::Perf,
        Self::Test,
        Self::Build,
        Self::Ci,
        Self::Revert,
        Self::Chore,
    ];

    /// The lowercase code used in commit messages.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Feat => "feat",
            Self::Impr => "impr",
            Self::Fix => "fix",
            Self::Docs => "docs",
            Self::Style => "style",
            Self::Refactor => "refactor",
            Self::Perf => "perf",
            Self::Test => "test",
            Self::Build => "build",
            Self::Ci => "ci",
            Self::Revert => "revert",
            Self::Chore => "chore",
        }
    }

    /// Regex alternation of every code, e.g. `feat|impr|...`.
    pub(crate) fn alternation() -> String {
        Self::ALL
            .iter()
            .map(|t| t.as_str())
            .collect::<Vec<_>>()
            .join("|")
    }
}

impl fmt::Display for CommitType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CommitType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| format!("Unknown commit type '{s}'"))
    }
}
