//! Event Simulator Core - Rust Engine
//!
//! In-process event simulator: a FIFO queue of typed events drained through a
//! fixed dispatch table into account and calculation collaborators.
//!
//! # Architecture
//!
//! - **core**: Clock abstraction for enqueue timestamps
//! - **models**: Domain types (Event, EventQueue, ApplicationState, HandlerOutcome)
//! - **dispatch**: Static tag → handler table
//! - **services**: Collaborator traits and in-memory implementations
//! - **simulator**: Drain loop, configuration, status snapshots
//!
//! # Critical Invariants
//!
//! 1. Events are processed in enqueue order, each at most once
//! 2. No handler failure escapes `handle_event` or aborts a drain pass
//! 3. Status snapshots never mutate state

// Module declarations
pub mod core;
pub mod dispatch;
pub mod models;
pub mod services;
pub mod simulator;

// Re-exports for convenience
pub use crate::core::time::{Clock, ManualClock, SystemClock};
pub use dispatch::DispatchError;
pub use models::{
    event::{Event, EventKind, QueuedEvent},
    outcome::HandlerOutcome,
    queue::{EventQueue, QueueHandle},
    state::{ApplicationState, RunState},
};
pub use services::{
    AccountService, CalculationService, Collaborators, HandlerError, StoreStatusProvider,
};
pub use simulator::{ConfigError, OutcomeSink, Simulator, SimulatorConfig, StatusSnapshot};
