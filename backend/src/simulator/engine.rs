//! Simulator Engine
//!
//! Owns the application state and the event queue, drains the queue through
//! the dispatch table, and reports status.
//!
//! # Drain Pass
//!
//! ```text
//! while queue not empty and running:
//! 1. Dequeue head (removed for good)
//! 2. Log "[EVENT]" line: enqueue time, type, payload
//! 3. handle_event: dispatch, contain any error into a failure outcome
//! 4. Forward (event, outcome) to the outcome sink, if one is installed
//! ```
//!
//! A failing event never aborts the pass and is never re-queued.
//!
//! # Re-entrancy
//!
//! `enqueue_event` drains before returning. Collaborators cannot reach the
//! simulator itself, only a [`QueueHandle`]; an event they enqueue lands at
//! the tail and the live pass picks it up because the loop re-checks the
//! queue on every iteration. Borrowing rules guarantee a single live pass.
//!
//! # Example
//!
//! ```rust
//! use event_simulator_core_rs::{Collaborators, Event, Simulator, SimulatorConfig};
//! use serde_json::json;
//!
//! let mut sim = Simulator::new(SimulatorConfig::default(), Collaborators::in_memory()).unwrap();
//! sim.start();
//!
//! sim.enqueue_event(Event::new("login", json!({ "email": "x@y.z", "password": "nope" })));
//!
//! let status = sim.status();
//! assert!(status.is_running());
//! assert_eq!(status.event_queue_size, 0);
//! ```

use crate::dispatch::{self, DispatchError};
use crate::models::{ApplicationState, Event, EventKind, HandlerOutcome, QueueHandle, QueuedEvent};
use crate::services::Collaborators;
use crate::simulator::config::{ConfigError, SimulatorConfig};
use crate::simulator::status::StatusSnapshot;
use std::error::Error as StdError;

/// Observer for handled events
///
/// The drain loop otherwise discards outcomes. Closures taking
/// `(&QueuedEvent, &HandlerOutcome)` implement this trait.
pub trait OutcomeSink {
    fn record(&mut self, event: &QueuedEvent, outcome: &HandlerOutcome);
}

impl<F> OutcomeSink for F
where
    F: FnMut(&QueuedEvent, &HandlerOutcome),
{
    fn record(&mut self, event: &QueuedEvent, outcome: &HandlerOutcome) {
        self(event, outcome)
    }
}

/// Event queue + dispatcher
pub struct Simulator {
    state: ApplicationState,
    queue: QueueHandle,
    collaborators: Collaborators,
    config: SimulatorConfig,
    sink: Option<Box<dyn OutcomeSink>>,
    total_processed: u64,
}

impl Simulator {
    /// Create a stopped simulator with its own queue
    ///
    /// Starts immediately when `config.auto_start` is set.
    pub fn new(config: SimulatorConfig, collaborators: Collaborators) -> Result<Self, ConfigError> {
        Self::with_queue(config, collaborators, QueueHandle::new())
    }

    /// Create a simulator draining an existing queue
    ///
    /// Use this when collaborators need a [`QueueHandle`] before the
    /// simulator exists. Events already in `queue` wait for `start()`.
    pub fn with_queue(
        config: SimulatorConfig,
        collaborators: Collaborators,
        queue: QueueHandle,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        let auto_start = config.auto_start;

        let mut simulator = Self {
            state: ApplicationState::new(),
            queue,
            collaborators,
            config,
            sink: None,
            total_processed: 0,
        };

        if auto_start {
            simulator.start();
        }
        Ok(simulator)
    }

    /// Install an outcome sink
    pub fn with_outcome_sink(mut self, sink: impl OutcomeSink + 'static) -> Self {
        self.sink = Some(Box::new(sink));
        self
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    pub fn state(&self) -> &ApplicationState {
        &self.state
    }

    pub fn is_running(&self) -> bool {
        self.state.is_running()
    }

    pub fn config(&self) -> &SimulatorConfig {
        &self.config
    }

    /// Handle for enqueueing without triggering a drain
    pub fn queue_handle(&self) -> QueueHandle {
        self.queue.clone()
    }

    pub fn queue_len(&self) -> usize {
        self.queue.len()
    }

    /// Events handled since creation
    pub fn total_processed(&self) -> u64 {
        self.total_processed
    }

    // ========================================================================
    // Lifecycle
    // ========================================================================

    /// Transition to `Running` and drain
    ///
    /// Calling again while running resets nothing; it only drains.
    pub fn start(&mut self) {
        if self.state.mark_running() {
            tracing::info!(pending = self.queue.len(), "simulation started");
        } else {
            tracing::warn!("start() called while already running");
        }
        self.process_events();
    }

    /// Append `event` to the queue, then drain
    pub fn enqueue_event(&mut self, event: Event) {
        self.queue.enqueue(event);
        self.process_events();
    }

    /// Run one drain pass
    ///
    /// Returns the number of events handled. Does nothing while stopped.
    pub fn process_events(&mut self) -> usize {
        let mut handled = 0;

        while self.state.is_running() {
            let Some(queued) = self.queue.dequeue() else {
                break;
            };

            self.log_event_line(&queued);
            let outcome = self.handle_event(&queued.event);
            self.total_processed += 1;
            handled += 1;

            if let Some(sink) = self.sink.as_mut() {
                sink.record(&queued, &outcome);
            }
        }

        if handled > 0 {
            tracing::debug!(handled, remaining = self.queue.len(), "drain pass finished");
        }
        handled
    }

    // ========================================================================
    // Dispatch
    // ========================================================================

    /// Dispatch `event` and contain any failure
    ///
    /// Never panics on bad input and never propagates an error: unknown
    /// types, malformed payloads and collaborator failures all become
    /// `{success: false, error}`.
    pub fn handle_event(&mut self, event: &Event) -> HandlerOutcome {
        match self.try_handle_event(event) {
            Ok(outcome) => outcome,
            Err(err) => {
                tracing::error!(
                    event_type = %event.event_type,
                    error = %err,
                    trace = %error_chain(&err),
                    "event error"
                );
                HandlerOutcome::failure(err.to_string())
            }
        }
    }

    /// Dispatch `event` without containment
    pub fn try_handle_event(&mut self, event: &Event) -> Result<HandlerOutcome, DispatchError> {
        let outcome = dispatch::dispatch(&mut self.collaborators, event)?;

        if outcome.success && event.kind() == Some(EventKind::Signup) {
            self.state.record_signup();
        }
        Ok(outcome)
    }

    // ========================================================================
    // Status
    // ========================================================================

    /// Snapshot of state, store status and queue; mutates nothing
    pub fn status(&self) -> StatusSnapshot {
        StatusSnapshot {
            state: self.state.clone(),
            db_status: self.collaborators.store.status(),
            event_queue_size: self.queue.len(),
            last_event: self.queue.last(),
            total_enqueued: self.queue.total_enqueued(),
            total_processed: self.total_processed,
        }
    }

    fn log_event_line(&self, queued: &QueuedEvent) {
        let enqueued_at = queued.enqueued_at.to_rfc3339();
        if self.config.log_payloads {
            tracing::info!(
                %enqueued_at,
                event_type = %queued.event.event_type,
                data = %self.config.redact(&queued.event.data),
                "[EVENT]"
            );
        } else {
            tracing::info!(
                %enqueued_at,
                event_type = %queued.event.event_type,
                "[EVENT]"
            );
        }
    }
}

impl std::fmt::Debug for Simulator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Simulator")
            .field("state", &self.state)
            .field("queue_len", &self.queue.len())
            .field("total_processed", &self.total_processed)
            .field("has_sink", &self.sink.is_some())
            .finish()
    }
}

/// `outer: cause: root cause`
fn error_chain(err: &dyn StdError) -> String {
    let mut chain = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        chain.push_str(": ");
        chain.push_str(&cause.to_string());
        source = cause.source();
    }
    chain
}
