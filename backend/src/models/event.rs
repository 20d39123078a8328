//! Events accepted by the simulator.
//!
//! An [`Event`] is a tag plus an opaque JSON payload. The tag is kept as a raw
//! string so that events with unknown tags can still be queued; whether a tag
//! is known is decided at dispatch time, not at enqueue time.
//!
//! # Event Types
//!
//! The fixed vocabulary is [`EventKind`]:
//! - **Accounts**: `signup`, `login`, `logout`, `getProfile`
//! - **Calculations**: `addCalculation`, `getHistory`, `deleteCalculation`
//!
//! # Example
//!
//! ```rust
//! use event_simulator_core_rs::models::{Event, EventKind};
//! use serde_json::json;
//!
//! let event = Event::new(
//!     "login",
//!     json!({ "email": "ali@example.com", "password": "SecurePass123!@#" }),
//! );
//! assert_eq!(event.kind(), Some(EventKind::Login));
//!
//! let unknown = Event::new("refund", json!({}));
//! assert_eq!(unknown.kind(), None);
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// The fixed set of event types the dispatcher knows how to route
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    Signup,
    Login,
    Logout,
    GetProfile,
    AddCalculation,
    GetHistory,
    DeleteCalculation,
}

impl EventKind {
    /// Every known kind, in dispatch-table order
    pub const ALL: [EventKind; 7] = [
        EventKind::Signup,
        EventKind::Login,
        EventKind::Logout,
        EventKind::GetProfile,
        EventKind::AddCalculation,
        EventKind::GetHistory,
        EventKind::DeleteCalculation,
    ];

    /// Wire tag for this kind
    pub fn tag(self) -> &'static str {
        match self {
            EventKind::Signup => "signup",
            EventKind::Login => "login",
            EventKind::Logout => "logout",
            EventKind::GetProfile => "getProfile",
            EventKind::AddCalculation => "addCalculation",
            EventKind::GetHistory => "getHistory",
            EventKind::DeleteCalculation => "deleteCalculation",
        }
    }

    /// Resolve a wire tag (case-sensitive)
    pub fn from_tag(tag: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.tag() == tag)
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// An event submitted to the simulator
///
/// Serializes as `{"type": "...", "data": {...}}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    /// Raw type tag, not validated until dispatch
    #[serde(rename = "type")]
    pub event_type: String,

    /// Type-specific payload
    #[serde(default)]
    pub data: Value,
}

impl Event {
    /// Create an event from any tag and payload
    pub fn new(event_type: impl Into<String>, data: Value) -> Self {
        Self {
            event_type: event_type.into(),
            data,
        }
    }

    /// Create an event for a known kind
    pub fn of_kind(kind: EventKind, data: Value) -> Self {
        Self::new(kind.tag(), data)
    }

    /// Known kind for this event, if the tag is in the vocabulary
    pub fn kind(&self) -> Option<EventKind> {
        EventKind::from_tag(&self.event_type)
    }
}

/// An event waiting in the queue, stamped with its arrival time
///
/// Serializes as `{ "event": {...}, "timestamp": "<RFC 3339>" }`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QueuedEvent {
    pub event: Event,
    #[serde(rename = "timestamp")]
    pub enqueued_at: DateTime<Utc>,
}

impl QueuedEvent {
    pub fn new(event: Event, enqueued_at: DateTime<Utc>) -> Self {
        Self { event, enqueued_at }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_tags_round_trip_through_vocabulary() {
        for kind in EventKind::ALL {
            assert_eq!(EventKind::from_tag(kind.tag()), Some(kind));
        }
    }

    #[test]
    fn test_tags_are_case_sensitive() {
        assert_eq!(EventKind::from_tag("getprofile"), None);
        assert_eq!(EventKind::from_tag("Signup"), None);
    }

    #[test]
    fn test_event_deserializes_from_script_shape() {
        let event: Event = serde_json::from_value(json!({
            "type": "logout",
            "data": { "token": "abc" }
        }))
        .unwrap();

        assert_eq!(event.kind(), Some(EventKind::Logout));
        assert_eq!(event.data["token"], "abc");
    }

    #[test]
    fn test_missing_data_defaults_to_null() {
        let event: Event = serde_json::from_value(json!({ "type": "signup" })).unwrap();
        assert!(event.data.is_null());
    }
}
