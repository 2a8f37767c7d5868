//! Shared test utilities.

use std::cell::RefCell;
use std::collections::VecDeque;

use crate::git::{GitError, GitOutput, GitRunner};

/// Fake git runner with a pre-programmed queue of outputs.
///
/// Outputs are returned in FIFO order. When the queue is exhausted,
/// subsequent calls return a failed output with exit code 128 so a test
/// that triggers an unexpected invocation fails loudly.
///
/// Every invocation's argument list is recorded and can be read back with
/// [`calls`](Self::calls).
pub(crate) struct ScriptedGitRunner {
    outputs: RefCell<VecDeque<GitOutput>>,
    calls: RefCell<Vec<Vec<String>>>,
}

impl ScriptedGitRunner {
    /// Creates a runner that will return the given outputs in order.
    pub(crate) fn new(outputs: Vec<GitOutput>) -> Self {
        Self {
            outputs: RefCell::new(VecDeque::from(outputs)),
            calls: RefCell::new(Vec::new()),
        }
    }

    /// Returns every recorded argument list.
    pub(crate) fn calls(&self) -> Vec<Vec<String>> {
        self.calls.borrow().clone()
    }

    /// Returns the subcommand (first argument) of every recorded call.
    pub(crate) fn subcommands(&self) -> Vec<String> {
        self.calls
            .borrow()
            .iter()
            .filter_map(|call| call.first().cloned())
            .collect()
    }

    /// Returns the number of unconsumed outputs remaining in the queue.
    pub(crate) fn remaining(&self) -> usize {
        self.outputs.borrow().len()
    }
}

impl GitRunner for ScriptedGitRunner {
    fn run(&self, args: &[&str]) -> Result<GitOutput, GitError> {
        self.calls
            .borrow_mut()
            .push(args.iter().map(|a| (*a).to_string()).collect());

        Ok(self
            .outputs
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| GitOutput::failed(128, "no more scripted git outputs")))
    }
}
