//! `help-all`: every command's help on one page.

use anyhow::Result;
use clap::{Command, CommandFactory, Parser};

use crate::cli::Cli;

/// Width of the rule separating command sections.
const SEPARATOR_WIDTH: usize = 80;

/// Help-all command options.
#[derive(Parser)]
pub struct HelpCommand {}

/// Renders help for the whole command tree.
pub struct HelpGenerator {
    app: Command,
}

impl Default for HelpGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl HelpGenerator {
    /// Creates a generator over the `commitsmith` command tree.
    pub fn new() -> Self {
        Self { app: Cli::command() }
    }

    /// Help for the root command followed by every subcommand, depth first.
    pub fn generate_all_help(&self) -> Result<String> {
        let mut sections = vec![self.render_command_help(&self.app, "")];
        Self::walk(&self.app, "", &mut |cmd, path| {
            sections.push(self.render_command_help(cmd, path));
        });

        let separator = format!("\n\n{}\n\n", "=".repeat(SEPARATOR_WIDTH));
        Ok(sections.join(&separator))
    }

    /// Visits subcommands sorted by name so the output is stable.
    fn walk(cmd: &Command, prefix: &str, visit: &mut dyn FnMut(&Command, &str)) {
        let mut children: Vec<&Command> = cmd
            .get_subcommands()
            .filter(|child| child.get_name() != "help")
            .collect();
        children.sort_by(|a, b| a.get_name().cmp(b.get_name()));

        for child in children {
            let path = if prefix.is_empty() {
                child.get_name().to_string()
            } else {
                format!("{prefix} {}", child.get_name())
            };
            visit(child, &path);
            Self::walk(child, &path, visit);
        }
    }

    fn render_command_help(&self, cmd: &Command, path: &str) -> String {
        let title = if path.is_empty() {
            self.app.get_name().to_string()
        } else {
            format!("{} {path}", self.app.get_name())
        };
        let about = cmd
            .get_about()
            .map_or_else(|| "No description available".to_string(), ToString::to_string);

        format!("{title} - {about}\n\n{}", cmd.clone().render_help())
    }
}

impl HelpCommand {
    /// Prints the combined help.
    pub fn execute(self) -> Result<i32> {
        println!("{}", HelpGenerator::new().generate_all_help()?);
        Ok(0)
    }
}
