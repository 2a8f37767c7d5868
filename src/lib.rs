//! # commitsmith
//!
//! Conventional commit authoring and release tagging on top of the `git`
//! command line.
//!
//! - [`conventional`] holds the commit-message grammar and type suggestion.
//! - [`release`] aggregates commit history into categorized release notes.
//! - [`workflow`] drives the interactive commit and release flows.
//! - [`git`] wraps the `git` binary behind a mockable runner.
//!
//! ```
//! use commitsmith::config::Config;
//! use commitsmith::conventional::{format_message, validate_message};
//!
//! let message = format_message("feat", Some("cli"), "add release command");
//! assert_eq!(message, "feat(cli): add release command");
//! assert!(validate_message(&message, &Config::default()).is_ok());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod cli;
pub mod config;
pub mod conventional;
pub mod git;
pub mod prompt;
pub mod release;
pub mod utils;
pub mod workflow;

#[cfg(test)]
mod test_utils;

pub use crate::cli::Cli;

/// The current version of commitsmith.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
