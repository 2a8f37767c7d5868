//! Validation, formatting and parsing of `type(scope): description` messages.

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;
use thiserror::Error;

use crate::config::Config;
use crate::conventional::CommitType;

/// Shape check used for validation. Type and scope match case-insensitively
/// so that casing is reported as its own failure.
static VALIDATE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"^(?i:(?:{})(?:\((?P<scope>[a-z0-9\-]+)\))?): .+",
        CommitType::alternation()
    ))
    .expect("Invalid regex")
});

/// Scope accepted by the grammar, any case.
static SCOPE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?i:[a-z0-9\-]+)$").expect("Invalid regex"));

/// Extraction pattern applied to the first line of a message.
static PARSE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"^(?P<type>{})(?:\((?P<scope>[^)]+)\))?: (?P<description>.+)$",
        CommitType::alternation()
    ))
    .expect("Invalid regex")
});

/// Why a commit message was rejected.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// The message is not `type(scope): description` or `type: description`.
    #[error("Message doesn't match conventional commit format")]
    FormatMismatch,

    /// The message is longer than the configured maximum.
    #[error("Message exceeds {max} characters (got {actual})")]
    TooLong {
        /// Configured maximum.
        max: usize,
        /// Character count of the message.
        actual: usize,
    },

    /// The `type(scope)` prefix contains uppercase characters.
    #[error("Commit type and scope should be lowercase")]
    NotLowercase,

    /// A scope is required by configuration but none was given.
    #[error("A scope is required, e.g. feat(parser): description")]
    ScopeRequired,
}

/// Components extracted from a commit message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParsedMessage {
    /// Commit type; `chore` when the message is not conventional.
    pub commit_type: CommitType,
    /// Optional scope.
    pub scope: Option<String>,
    /// Description, or the whole first line when the message is not conventional.
    pub description: String,
}

/// Builds `type(scope): description`, omitting an absent or empty scope.
pub fn format_message(commit_type: &str, scope: Option<&str>, description: &str) -> String {
    match scope.filter(|s| !s.is_empty()) {
        Some(scope) => format!("{commit_type}({scope}): {description}"),
        None => format!("{commit_type}: {description}"),
    }
}

/// Whether `scope` only uses characters the grammar allows in a scope.
pub fn is_valid_scope(scope: &str) -> bool {
    SCOPE_REGEX.is_match(scope)
}

/// Checks a message against the grammar and the configured limits.
///
/// Rules are applied in order: shape, length, lowercase prefix, required scope.
pub fn validate_message(message: &str, config: &Config) -> Result<(), ValidationError> {
    let captures = VALIDATE_REGEX
        .captures(message)
        .ok_or(ValidationError::FormatMismatch)?;

    let actual = message.chars().count();
    if actual > config.max_commit_length {
        return Err(ValidationError::TooLong {
            max: config.max_commit_length,
            actual,
        });
    }

    let prefix = message.split(':').next().unwrap_or(message);
    if prefix.to_lowercase() != prefix {
        return Err(ValidationError::NotLowercase);
    }

    if config.require_scope && captures.name("scope").is_none() {
        return Err(ValidationError::ScopeRequired);
    }

    Ok(())
}

/// Extracts type, scope and description from the first line of a message.
///
/// Messages that do not follow the grammar parse as `chore` with the raw
/// first line as description.
pub fn parse_message(message: &str) -> ParsedMessage {
    let first_line = message.split('\n').next().unwrap_or("");

    PARSE_REGEX
        .captures(first_line)
        .and_then(|caps| {
            let commit_type = caps.name("type")?.as_str().parse().ok()?;
            Some(ParsedMessage {
                commit_type,
                scope: caps.name("scope").map(|m| m.as_str().to_string()),
                description: caps.name("description")?.as_str().to_string(),
            })
        })
        .unwrap_or_else(|| ParsedMessage {
            commit_type: CommitType::Chore,
            scope: None,
            description: first_line.to_string(),
        })
}
