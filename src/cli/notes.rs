//! Release notes preview command.

use std::fmt;
use std::path::Path;

use anyhow::{anyhow, Context, Result};
use clap::Parser;

use crate::cli::{load_config, open_repository};
use crate::release::{build_notes, ReleaseNotes};

/// Output format for generated notes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Plain text, as written into the tag message.
    #[default]
    Text,
    /// JSON format.
    Json,
    /// YAML format.
    Yaml,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            "yaml" => Ok(Self::Yaml),
            other => Err(format!(
                "Unknown output format '{other}'. Expected: text, json, yaml"
            )),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text => write!(f, "text"),
            Self::Json => write!(f, "json"),
            Self::Yaml => write!(f, "yaml"),
        }
    }
}

/// Notes command options.
#[derive(Parser)]
pub struct NotesCommand {
    /// Collects commits after this tag instead of the latest one.
    #[arg(long, value_name = "TAG")]
    pub since: Option<String>,

    /// Version heading for the notes.
    #[arg(long, default_value = "Unreleased")]
    pub version: String,

    /// Output format: text (default), json, yaml.
    #[arg(long, default_value = "text")]
    pub format: String,
}

impl NotesCommand {
    /// Executes the notes command.
    pub fn execute(self, config_path: Option<&Path>) -> Result<i32> {
        let format: OutputFormat = self.format.parse().map_err(|e: String| anyhow!(e))?;

        let config = load_config(config_path)?;
        let repo = open_repository()?;
        let notes = build_notes(&repo, &self.version, self.since.as_deref(), &config)?;

        print!("{}", render(&notes, format)?);
        Ok(0)
    }
}

/// Renders notes in the requested format, always ending with a newline.
pub fn render(notes: &ReleaseNotes, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Text => Ok(notes.render_text()),
        OutputFormat::Json => serde_json::to_string_pretty(notes)
            .map(|json| json + "\n")
            .context("Failed to serialize release notes to JSON"),
        OutputFormat::Yaml => {
            serde_yaml::to_string(notes).context("Failed to serialize release notes to YAML")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::release::ReleaseCommit;

    fn notes() -> ReleaseNotes {
        let commit = ReleaseCommit {
            hash: "abc1234".to_string(),
            commit_type: "feat".to_string(),
            scope: Some("cli".to_string()),
            description: "add notes command".to_string(),
            contributors: vec!["alice".to_string()],
            issues: vec!["12".to_string()],
        };
        ReleaseNotes::build("v0.3.0", vec![commit], &Config::default())
    }

    #[test]
    fn format_parsing_is_case_insensitive() {
        assert_eq!("JSON".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
        assert_eq!("yaml".parse::<OutputFormat>().unwrap(), OutputFormat::Yaml);
        assert!("xml".parse::<OutputFormat>().unwrap_err().contains("xml"));
    }

    #[test]
    fn format_display_round_trips() {
        for format in [OutputFormat::Text, OutputFormat::Json, OutputFormat::Yaml] {
            assert_eq!(format.to_string().parse::<OutputFormat>().unwrap(), format);
        }
    }

    #[test]
    fn json_uses_type_key() {
        let json = render(&notes(), OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["version"], "v0.3.0");
        assert_eq!(value["sections"][0]["title"], "Features");
        assert_eq!(value["sections"][0]["commits"][0]["type"], "feat");
        assert!(value.get("other_sections").is_none());
    }

    #[test]
    fn yaml_output() {
        let yaml = render(&notes(), OutputFormat::Yaml).unwrap();
        assert!(yaml.contains("version: v0.3.0"));
        assert!(yaml.contains("title: Features"));
        assert!(yaml.contains("- alice"));
    }

    #[test]
    fn text_output_matches_tag_message() {
        let notes = notes();
        assert_eq!(render(&notes, OutputFormat::Text).unwrap(), notes.render_text());
    }
}
