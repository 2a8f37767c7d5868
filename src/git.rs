//! Git operations, performed by shelling out to the `git` binary.

pub mod error;
pub mod repository;
pub mod runner;

pub use error::GitError;
pub use repository::{GitRepository, LogEntry};
pub use runner::{GitCli, GitOutput, GitRunner};

/// Number of hex characters to show in abbreviated commit hashes.
pub const SHORT_HASH_LEN: usize = 7;

/// Truncates a commit hash to [`SHORT_HASH_LEN`] characters.
pub fn short_hash(hash: &str) -> &str {
    hash.get(..SHORT_HASH_LEN).unwrap_or(hash)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_hash_truncates_long_hashes() {
        assert_eq!(
            short_hash("1234567890abcdef1234567890abcdef12345678"),
            "1234567"
        );
    }

    #[test]
    fn short_hash_keeps_short_input() {
        assert_eq!(short_hash("abc"), "abc");
        assert_eq!(short_hash(""), "");
    }
}
