//! Best-effort commit type suggestion from staged changes.
//!
//! The rules are deliberately loose: they look for substrings in paths and
//! in the diff text, so unrelated content such as `addition.py` can tip the
//! suggestion. The operator always confirms or overrides the result.

use anyhow::Result;

use crate::conventional::CommitType;

/// Files whose change usually means a dependency or build update.
const DEPENDENCY_MANIFESTS: &[&str] = &[
    "package.json",
    "requirements.txt",
    "Cargo.toml",
    "go.mod",
    "pyproject.toml",
];

/// Suggests a type from file paths alone, or `None` when paths are inconclusive.
pub fn suggest_type_from_paths<S: AsRef<str>>(files: &[S]) -> Option<CommitType> {
    let files: Vec<&str> = files.iter().map(AsRef::as_ref).collect();

    if files.iter().any(|f| f.to_lowercase().contains("test")) {
        Some(CommitType::Test)
    } else if files
        .iter()
        .any(|f| f.to_lowercase().contains("doc") || f.ends_with(".md"))
    {
        Some(CommitType::Docs)
    } else if files
        .iter()
        .any(|f| DEPENDENCY_MANIFESTS.iter().any(|m| f.contains(m)))
    {
        Some(CommitType::Build)
    } else if files.iter().any(|f| f.contains(".yml") || f.contains(".yaml")) {
        Some(CommitType::Ci)
    } else {
        None
    }
}

/// Suggests a type from the text of a diff.
pub fn suggest_type_from_diff(diff: &str) -> CommitType {
    let diff = diff.to_lowercase();

    if diff.contains("fix") || diff.contains("bug") {
        CommitType::Fix
    } else if diff.contains("new") || diff.contains("add") {
        CommitType::Feat
    } else {
        CommitType::Chore
    }
}

/// Suggests a type for a set of changed files.
///
/// `diff` is only invoked when the paths do not decide the type.
pub fn suggest_type<S, F>(files: &[S], diff: F) -> Result<CommitType>
where
    S: AsRef<str>,
    F: FnOnce() -> Result<String>,
{
    match suggest_type_from_paths(files) {
        Some(commit_type) => Ok(commit_type),
        None => Ok(suggest_type_from_diff(&diff()?)),
    }
}
