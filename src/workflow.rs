//! Interactive operator workflows.

pub mod commit;
pub mod release;
pub mod staged;

pub use commit::CommitFlow;
pub use release::{ReleaseFlow, ReleaseOptions};
pub use staged::{validate_staging, StagedCheck};

/// Width of the banner and separator rules printed by the flows.
pub(crate) const RULE_WIDTH: usize = 60;

/// How an interactive flow ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowOutcome {
    /// The operation was carried out.
    Completed,
    /// The operator declined or input was closed.
    Cancelled,
    /// A precondition failed (nothing staged, ignored files kept, invalid message kept).
    Aborted,
}

impl FlowOutcome {
    /// Process exit code for this outcome.
    pub fn exit_code(self) -> i32 {
        match self {
            Self::Completed => 0,
            Self::Cancelled | Self::Aborted => 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_completed_exits_zero() {
        assert_eq!(FlowOutcome::Completed.exit_code(), 0);
        assert_eq!(FlowOutcome::Cancelled.exit_code(), 1);
        assert_eq!(FlowOutcome::Aborted.exit_code(), 1);
    }
}
