//! Simulator - queue draining and status
//!
//! See `engine.rs` for the drain loop.

pub mod config;
pub mod engine;
pub mod status;

// Re-export main types for convenience
pub use config::{ConfigError, SimulatorConfig};
pub use engine::{OutcomeSink, Simulator};
pub use status::StatusSnapshot;
