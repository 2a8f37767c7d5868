//! Conventional commit grammar, parsing and type suggestion.

pub mod grammar;
pub mod suggest;
pub mod types;

pub use grammar::{
    format_message, is_valid_scope, parse_message, validate_message, ParsedMessage, ValidationError,
};
pub use suggest::{suggest_type, suggest_type_from_paths};
pub use types::CommitType;
