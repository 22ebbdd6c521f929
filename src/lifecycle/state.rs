//! Per-run state machine.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    Idle,
    ServerStarted,
    RequestSent,
    ResponseReceived,
    Checked,
    ServerStopped,
}

impl RunState {
    /// The only legal successor, `None` for the terminal state.
    pub fn next(self) -> Option<RunState> {
        match self {
            RunState::Idle => Some(RunState::ServerStarted),
            RunState::ServerStarted => Some(RunState::RequestSent),
            RunState::RequestSent => Some(RunState::ResponseReceived),
            RunState::ResponseReceived => Some(RunState::Checked),
            RunState::Checked => Some(RunState::ServerStopped),
            RunState::ServerStopped => None,
        }
    }

    pub fn is_terminal(self) -> bool {
        self.next().is_none()
    }
}

impl fmt::Display for RunState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// Records the states a run has visited, strictly in order.
#[derive(Debug, Clone)]
pub struct RunTracker {
    visited: Vec<RunState>,
}

impl RunTracker {
    pub fn new() -> Self {
        Self {
            visited: vec![RunState::Idle],
        }
    }

    pub fn current(&self) -> RunState {
        self.visited.last().copied().unwrap_or(RunState::Idle)
    }

    /// Move to `to`. An out-of-order transition is logged, and asserts in
    /// debug builds.
    pub fn advance(&mut self, to: RunState) {
        let from = self.current();
        let legal = from.next() == Some(to);
        if !legal {
            tracing::error!(from = %from, to = %to, "Illegal run transition");
        }
        debug_assert!(legal, "illegal run transition {from} -> {to}");
        tracing::debug!(from = %from, to = %to, "Run state changed");
        self.visited.push(to);
    }

    pub fn visited(&self) -> &[RunState] {
        &self.visited
    }
}

impl Default for RunTracker {
    fn default() -> Self {
        Self::new()
    }
}
