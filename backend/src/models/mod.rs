//! Domain models for the event simulator

pub mod event;
pub mod outcome;
pub mod queue;
pub mod state;

// Re-exports
pub use event::{Event, EventKind, QueuedEvent};
pub use outcome::HandlerOutcome;
pub use queue::{EventQueue, QueueHandle};
pub use state::{ApplicationState, RunState};
