//! Send-window throttle policies for a message-bus client session.
//!
//! A session asks its policy, per outgoing message, whether dispatch is
//! permitted given the number of replies still outstanding, then notifies
//! it about every admitted send and every reply received. The policy never
//! blocks, never queues, and never performs I/O beyond reading a
//! [`Timer`](crate::timer::Timer); a denied send is back-pressure for the
//! caller to handle.
//!
//! # Model
//!
//! [`StaticThrottlePolicy`] enforces hard ceilings on the pending count and
//! the pending payload size. [`DynamicThrottlePolicy`] builds on it with a
//! closed feedback loop: it measures throughput over intervals of roughly
//! `window_size * resize_rate` admitted sends and grows its window while
//! throughput keeps setting new local maxima, backing off when the
//! window-normalized efficiency of an interval regresses.
//!
//! # Usage
//!
//! ```rust,ignore
//! // Inside a session's I/O loop
//! if policy.can_send(&msg, session.pending_count()) {
//!   transport.dispatch(&msg);
//!   policy.process_message(&msg);
//! }
//! // ... and for every reply that arrives:
//! policy.process_reply(&reply);
//! ```

pub mod dynamic_policy;
pub mod static_policy;
pub mod types;

pub use dynamic_policy::DynamicThrottlePolicy;
pub use static_policy::StaticThrottlePolicy;
pub use types::DynamicThrottleConfig;

use std::fmt;

use crate::message::{Msg, Reply};

/// The seam between a client session and its flow-control policy.
///
/// One session drives one policy instance, invoking the three methods
/// serially from its I/O loop: `can_send` returning true for a message
/// precedes that message's `process_message`, which in turn precedes the
/// matching `process_reply`. Policies rely on this ordering instead of
/// internal synchronization.
pub trait ThrottlePolicy: fmt::Debug + Send {
  /// Returns whether one more message may be dispatched while
  /// `pending_count` replies are still outstanding.
  fn can_send(&mut self, msg: &Msg, pending_count: usize) -> bool;

  /// Records an admitted send. Called exactly once per message for which
  /// `can_send` returned true.
  fn process_message(&mut self, msg: &Msg);

  /// Records a received reply, whether successful or errored.
  fn process_reply(&mut self, reply: &Reply);
}
