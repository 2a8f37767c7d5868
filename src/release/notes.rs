//! Categorized release notes built from commit history.

use std::sync::LazyLock;

use indexmap::IndexMap;
use regex::Regex;
use serde::Serialize;

use crate::config::Config;
use crate::conventional::parse_message;
use crate::git::{short_hash, LogEntry};

static CONTRIBUTOR_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"@([a-zA-Z0-9_-]+)").expect("Invalid regex"));

static ISSUE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"#(\d+)").expect("Invalid regex"));

const THANKS_LINE: &str = "Thank you to all the contributors who made this release possible!";

/// One commit as it appears in release notes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReleaseCommit {
    /// Abbreviated commit hash.
    pub hash: String,
    /// Type code parsed from the subject.
    #[serde(rename = "type")]
    pub commit_type: String,
    /// Optional scope parsed from the subject.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scope: Option<String>,
    /// Description parsed from the subject.
    pub description: String,
    /// `@handle` mentions from subject and body, without the `@`.
    pub contributors: Vec<String>,
    /// `#N` references from subject and body, without the `#`.
    pub issues: Vec<String>,
}

impl ReleaseCommit {
    /// Builds a release entry from a log entry.
    pub fn from_log_entry(entry: &LogEntry, with_contributors: bool) -> Self {
        let parsed = parse_message(&entry.subject);
        let full_message = entry.full_message();

        Self {
            hash: short_hash(&entry.hash).to_string(),
            commit_type: parsed.commit_type.as_str().to_string(),
            scope: parsed.scope,
            description: parsed.description,
            contributors: if with_contributors {
                extract_contributors(&full_message)
            } else {
                Vec::new()
            },
            issues: extract_issue_refs(&full_message),
        }
    }

    /// Renders the bullet line for this commit.
    pub fn bullet(&self) -> String {
        let mut line = String::from("• ");

        if let Some(scope) = &self.scope {
            line.push_str(&format!("{scope}: "));
        }
        line.push_str(&self.description);

        if !self.contributors.is_empty() {
            let mentions: Vec<String> = self.contributors.iter().map(|c| format!("@{c}")).collect();
            line.push_str(&format!(" ({})", mentions.join(", ")));
        }

        for issue in &self.issues {
            line.push_str(&format!(" (#{issue})"));
        }

        line.push_str(&format!(" ({})", self.hash));
        line
    }
}

/// Contributor handles mentioned as `@handle`, in order of appearance.
pub fn extract_contributors(text: &str) -> Vec<String> {
    CONTRIBUTOR_REGEX
        .captures_iter(text)
        .map(|caps| caps[1].to_string())
        .collect()
}

/// Issue or pull request numbers referenced as `#N`, in order of appearance.
pub fn extract_issue_refs(text: &str) -> Vec<String> {
    ISSUE_REGEX
        .captures_iter(text)
        .map(|caps| caps[1].to_string())
        .collect()
}

/// Groups commits by display category, preserving first-appearance order.
pub fn categorize(
    commits: Vec<ReleaseCommit>,
    config: &Config,
) -> IndexMap<String, Vec<ReleaseCommit>> {
    let mut categories: IndexMap<String, Vec<ReleaseCommit>> = IndexMap::new();

    for commit in commits {
        let category = config.category_for(&commit.commit_type).to_string();
        categories.entry(category).or_default().push(commit);
    }

    categories
}

/// A titled group of commits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Section {
    /// Display category name.
    pub title: String,
    /// Commits in chronological order.
    pub commits: Vec<ReleaseCommit>,
}

/// Release notes for one version.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReleaseNotes {
    /// Normalized version the notes describe.
    pub version: String,
    /// Sections rendered in text form, in configured order.
    pub sections: Vec<Section>,
    /// Non-empty categories outside the configured order.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub other_sections: Vec<Section>,
}

impl ReleaseNotes {
    /// Groups commits and orders the sections according to `config.release_sections`.
    pub fn build(version: &str, commits: Vec<ReleaseCommit>, config: &Config) -> Self {
        let mut categories = categorize(commits, config);

        let sections = config
            .release_sections
            .iter()
            .filter_map(|title| {
                categories.shift_remove(title).map(|commits| Section {
                    title: title.clone(),
                    commits,
                })
            })
            .filter(|section| !section.commits.is_empty())
            .collect();

        let other_sections = categories
            .into_iter()
            .map(|(title, commits)| Section { title, commits })
            .collect();

        Self {
            version: version.to_string(),
            sections,
            other_sections,
        }
    }

    /// Total number of commits across rendered and other sections.
    pub fn commit_count(&self) -> usize {
        self.sections
            .iter()
            .chain(&self.other_sections)
            .map(|s| s.commits.len())
            .sum()
    }

    /// Renders the plain-text notes used as the tag message.
    pub fn render_text(&self) -> String {
        let mut lines = vec![self.version.clone(), String::new(), THANKS_LINE.to_string()];

        for section in &self.sections {
            lines.push(String::new());
            lines.push(section.title.clone());
            lines.extend(section.commits.iter().map(ReleaseCommit::bullet));
        }

        let mut text = lines.join("\n");
        text.push('\n');
        text
    }
}
