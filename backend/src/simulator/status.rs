//! Status snapshots
//!
//! A read-only projection of the simulator, recomputed on every call and
//! never persisted. Taking a snapshot must not touch the queue.

use crate::models::{ApplicationState, QueuedEvent};
use serde::Serialize;
use serde_json::Value;

/// Point-in-time view of a simulator
///
/// Serializes flat, camelCase like every other JSON surface:
///
/// ```text
/// {
///   "running": true,
///   "users": 1,
///   "dbStatus": {...},
///   "eventQueueSize": 0,
///   "lastEvent": null,
///   "totalEnqueued": 3,
///   "totalProcessed": 3
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusSnapshot {
    #[serde(flatten)]
    pub state: ApplicationState,

    /// Opaque diagnostics from the store collaborator
    pub db_status: Value,

    /// Events waiting in the queue
    pub event_queue_size: usize,

    /// Most recently queued event that has not been dequeued yet
    pub last_event: Option<QueuedEvent>,

    pub total_enqueued: u64,

    pub total_processed: u64,
}

impl StatusSnapshot {
    pub fn is_running(&self) -> bool {
        self.state.is_running()
    }

    pub fn users(&self) -> u64 {
        self.state.users()
    }

    pub fn to_json(&self) -> Value {
        serde_json::to_value(self).unwrap_or(Value::Null)
    }
}
