//! Core utilities shared by the queue and dispatcher

pub mod time;

pub use time::{Clock, ManualClock, SystemClock};
