// src/lib.rs

//! rbus-flow - adaptive flow control for message-bus client sessions.
//!
//! A client session that pipelines requests over a message bus needs a
//! per-session limit on the number of sent-but-unanswered messages. This
//! crate provides the policies that decide, for each outgoing message,
//! whether it may be dispatched given the current pending count: a static
//! hard ceiling and a dynamic policy that continuously probes the system's
//! throughput ceiling and resizes its send window to track it.

/// Defines bus-level delivery errors carried by replies.
pub mod error;
/// Contains the message and reply types seen by the policies.
pub mod message;
/// Implements the throttle policies and the session-facing policy trait.
pub mod throttle;
/// Provides the monotonic millisecond clock abstraction.
pub mod timer;

// Re-export the core types for user convenience, making them accessible
// directly from the crate root (e.g., `rbus_flow::DynamicThrottlePolicy`).
pub use error::BusError;
pub use message::{Msg, Reply};
pub use throttle::{DynamicThrottleConfig, DynamicThrottlePolicy, StaticThrottlePolicy, ThrottlePolicy};
pub use timer::{ManualTimer, SystemTimer, Timer};
