//! Configuration loading.
//!
//! Configuration lives in a JSON file, by default at
//! `$HOME/.commitsmith/config.json`. A missing file is created with the
//! defaults on first use; a malformed file is an error.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::info;

/// Display category for type codes that have no mapping.
pub const FALLBACK_CATEGORY: &str = "Others";

/// Persisted settings for commit authoring and release notes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Path fragments that must never be committed (substring or suffix match).
    pub ignored_files: Vec<String>,
    /// Commit type code to release-note category, in display order.
    pub commit_types: IndexMap<String, String>,
    /// Maximum length of the commit subject in characters.
    pub max_commit_length: usize,
    /// Whether every commit message must carry a scope.
    pub require_scope: bool,
    /// Whether `@handle` mentions are collected into release notes.
    pub auto_extract_contributors: bool,
    /// Categories rendered in text release notes, in order.
    pub release_sections: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        let commit_types = [
            ("feat", "Features"),
            ("impr", "Improvements"),
            ("fix", "Fixes"),
            ("docs", "Documentation"),
            ("style", "Style"),
            ("refactor", "Refactoring"),
            ("perf", "Performance"),
            ("test", "Tests"),
            ("build", "Build"),
            ("ci", "CI"),
            ("revert", "Reverts"),
            ("chore", "Others"),
        ]
        .into_iter()
        .map(|(code, category)| (code.to_string(), category.to_string()))
        .collect();

        Self {
            ignored_files: vec!["CLAUDE.md".to_string()],
            commit_types,
            max_commit_length: 72,
            require_scope: false,
            auto_extract_contributors: true,
            release_sections: ["Features", "Improvements", "Fixes", FALLBACK_CATEGORY]
                .into_iter()
                .map(String::from)
                .collect(),
        }
    }
}

impl Config {
    /// Returns the default configuration path.
    pub fn default_path() -> Result<PathBuf> {
        let home_dir = dirs::home_dir().context("Failed to determine home directory")?;

        Ok(home_dir.join(".commitsmith").join("config.json"))
    }

    /// Loads the configuration from `path`, or the default location.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load_or_init(path),
            None => Self::load_or_init(Self::default_path()?),
        }
    }

    /// Loads configuration from a specific path, writing defaults if absent.
    pub fn load_or_init<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        if !path.exists() {
            let config = Self::default();
            config.save(path)?;
            info!(path = %path.display(), "created default configuration");
            return Ok(config);
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        serde_json::from_str::<Self>(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Writes the configuration as pretty-printed JSON, creating parent directories.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let json = serde_json::to_string_pretty(self).context("Failed to serialize config")?;
        fs::write(path, json + "\n")
            .with_context(|| format!("Failed to write config file: {}", path.display()))
    }

    /// Display category for a type code, falling back to [`FALLBACK_CATEGORY`].
    pub fn category_for(&self, type_code: &str) -> &str {
        self.commit_types
            .get(type_code)
            .map_or(FALLBACK_CATEGORY, String::as_str)
    }

    /// Configured type codes in display order.
    pub fn type_codes(&self) -> Vec<&str> {
        self.commit_types.keys().map(String::as_str).collect()
    }

    /// Staged paths that match any ignore pattern.
    ///
    /// Matching is a plain substring or suffix test, not a glob.
    pub fn ignored_among<'a>(&self, files: &'a [String]) -> Vec<&'a String> {
        files
            .iter()
            .filter(|file| {
                self.ignored_files
                    .iter()
                    .any(|pattern| file.contains(pattern.as_str()) || file.ends_with(pattern.as_str()))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn missing_file_is_created_with_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("nested").join("config.json");

        let config = Config::load_or_init(&config_path).unwrap();

        assert_eq!(config, Config::default());
        assert!(config_path.exists());

        let reloaded = Config::load_or_init(&config_path).unwrap();
        assert_eq!(reloaded, config);
    }

    #[test]
    fn malformed_file_is_an_error() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.json");
        fs::write(&config_path, "{ not json").unwrap();

        let err = Config::load_or_init(&config_path).unwrap_err();
        assert!(err.to_string().contains("Failed to parse config file"));
    }

    #[test]
    fn partial_file_falls_back_to_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.json");
        fs::write(
            &config_path,
            r#"{ "max_commit_length": 50, "ignored_files": [".env"] }"#,
        )
        .unwrap();

        let config = Config::load_or_init(&config_path).unwrap();
        assert_eq!(config.max_commit_length, 50);
        assert_eq!(config.ignored_files, vec![".env"]);
        assert_eq!(config.commit_types.len(), 12);
        assert!(config.auto_extract_contributors);
    }

    #[test]
    fn commit_types_keep_file_order() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.json");
        fs::write(
            &config_path,
            r#"{ "commit_types": { "fix": "Fixes", "feat": "Features", "chore": "Others" } }"#,
        )
        .unwrap();

        let config = Config::load_or_init(&config_path).unwrap();
        assert_eq!(config.type_codes(), vec!["fix", "feat", "chore"]);
    }

    #[test]
    fn default_type_order() {
        let config = Config::default();
        assert_eq!(
            config.type_codes(),
            vec![
                "feat", "impr", "fix", "docs", "style", "refactor", "perf", "test", "build", "ci",
                "revert", "chore"
            ]
        );
    }

    #[test]
    fn category_for_unknown_type_is_others() {
        let config = Config::default();
        assert_eq!(config.category_for("feat"), "Features");
        assert_eq!(config.category_for("docs"), "Documentation");
        assert_eq!(config.category_for("wip"), "Others");
    }

    #[test]
    fn ignored_among_uses_substring_and_suffix() {
        let config = Config {
            ignored_files: vec!["CLAUDE.md".to_string(), ".env".to_string()],
            ..Config::default()
        };
        let files = vec![
            "CLAUDE.md".to_string(),
            "docs/CLAUDE.md".to_string(),
            "src/main.rs".to_string(),
            "config/.env.local".to_string(),
            "claude.md".to_string(),
        ];

        let ignored = config.ignored_among(&files);
        assert_eq!(
            ignored,
            vec!["CLAUDE.md", "docs/CLAUDE.md", "config/.env.local"]
        );
    }
}
