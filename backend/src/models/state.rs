//! Application State
//!
//! Process-wide run state owned by the simulator.
//!
//! # Critical Invariants
//!
//! 1. **Single owner**: only the simulator mutates the state
//! 2. **Monotonic users**: the counter only grows, once per successful signup
//! 3. **No stop path**: `running` goes `false -> true` and stays there

use serde::Serialize;

/// Run state of the dispatcher
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RunState {
    Stopped,
    Running,
}

/// Mutable application state
///
/// # Example
///
/// ```rust
/// use event_simulator_core_rs::models::{ApplicationState, RunState};
///
/// let state = ApplicationState::new();
/// assert_eq!(state.run_state(), RunState::Stopped);
/// assert_eq!(state.users(), 0);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ApplicationState {
    running: bool,
    users: u64,
}

impl ApplicationState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn run_state(&self) -> RunState {
        if self.running {
            RunState::Running
        } else {
            RunState::Stopped
        }
    }

    /// Number of successful signups observed
    pub fn users(&self) -> u64 {
        self.users
    }

    /// Transition to `Running`
    ///
    /// Returns `true` if the state changed, `false` if it was already running.
    pub(crate) fn mark_running(&mut self) -> bool {
        let changed = !self.running;
        self.running = true;
        changed
    }

    pub(crate) fn record_signup(&mut self) {
        self.users += 1;
    }
}
