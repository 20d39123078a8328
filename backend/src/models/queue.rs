//! Event Queue
//!
//! Strict FIFO buffer of pending events.
//!
//! # Critical Invariants
//!
//! 1. **Order**: processing order is insertion order; no priority, no dedup
//! 2. **At most once**: `dequeue` removes the head permanently; nothing is
//!    ever re-inserted
//! 3. **No validation**: unknown event tags are accepted here and rejected
//!    at dispatch
//!
//! # Sharing
//!
//! The simulator and its collaborators are single-threaded. A [`QueueHandle`]
//! wraps the queue in `Rc<RefCell<_>>` so a collaborator can enqueue a
//! follow-up event while the simulator is in the middle of a drain pass.
//! Borrows are scoped to a single queue operation and never held across a
//! handler call.

use crate::core::time::{Clock, SystemClock};
use crate::models::event::{Event, QueuedEvent};
use std::cell::RefCell;
use std::collections::VecDeque;
use std::fmt;
use std::rc::Rc;

/// FIFO queue of pending events
pub struct EventQueue {
    pending: VecDeque<QueuedEvent>,
    clock: Box<dyn Clock>,
    total_enqueued: u64,
}

impl EventQueue {
    /// Empty queue stamping events with wall-clock time
    pub fn new() -> Self {
        Self::with_clock(Box::new(SystemClock))
    }

    /// Empty queue using a custom clock
    pub fn with_clock(clock: Box<dyn Clock>) -> Self {
        Self {
            pending: VecDeque::new(),
            clock,
            total_enqueued: 0,
        }
    }

    /// Append `event` to the tail, stamped with the current time
    pub fn enqueue(&mut self, event: Event) {
        let queued = QueuedEvent::new(event, self.clock.now());
        tracing::debug!(
            event_type = %queued.event.event_type,
            enqueued_at = %queued.enqueued_at,
            position = self.pending.len(),
            "event enqueued"
        );
        self.pending.push_back(queued);
        self.total_enqueued += 1;
    }

    /// Remove and return the head, or `None` when empty
    pub fn dequeue(&mut self) -> Option<QueuedEvent> {
        self.pending.pop_front()
    }

    /// Number of pending events
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Most recently queued event that has not been dequeued yet
    pub fn peek_tail(&self) -> Option<&QueuedEvent> {
        self.pending.back()
    }

    /// Pending events, head first
    pub fn iter(&self) -> impl Iterator<Item = &QueuedEvent> {
        self.pending.iter()
    }

    /// Events accepted since creation (processed or not)
    pub fn total_enqueued(&self) -> u64 {
        self.total_enqueued
    }
}

impl Default for EventQueue {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for EventQueue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventQueue")
            .field("pending", &self.pending)
            .field("total_enqueued", &self.total_enqueued)
            .finish()
    }
}

/// Cloneable single-threaded handle to a shared [`EventQueue`]
///
/// Enqueueing through a handle never starts a drain pass. If a drain is
/// running the event is picked up by it; otherwise it waits for the next
/// `start`, `enqueue_event` or `process_events` call on the simulator.
///
/// # Example
/// ```
/// use event_simulator_core_rs::models::{Event, QueueHandle};
/// use serde_json::json;
///
/// let handle = QueueHandle::new();
/// let other = handle.clone();
///
/// other.enqueue(Event::new("logout", json!({ "token": "t" })));
/// assert_eq!(handle.len(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct QueueHandle {
    inner: Rc<RefCell<EventQueue>>,
}

impl QueueHandle {
    pub fn new() -> Self {
        Self::from_queue(EventQueue::new())
    }

    pub fn from_queue(queue: EventQueue) -> Self {
        Self {
            inner: Rc::new(RefCell::new(queue)),
        }
    }

    pub fn enqueue(&self, event: Event) {
        self.inner.borrow_mut().enqueue(event);
    }

    pub fn dequeue(&self) -> Option<QueuedEvent> {
        self.inner.borrow_mut().dequeue()
    }

    pub fn len(&self) -> usize {
        self.inner.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.borrow().is_empty()
    }

    /// Clone of the tail element
    pub fn last(&self) -> Option<QueuedEvent> {
        self.inner.borrow().peek_tail().cloned()
    }

    pub fn total_enqueued(&self) -> u64 {
        self.inner.borrow().total_enqueued()
    }

    /// Clones of all pending events, head first
    pub fn snapshot(&self) -> Vec<QueuedEvent> {
        self.inner.borrow().iter().cloned().collect()
    }
}
