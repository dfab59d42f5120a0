// src/throttle/static_policy.rs

use crate::message::{Msg, Reply};
use crate::throttle::ThrottlePolicy;

/// Fixed hard ceilings on a session's in-flight traffic.
///
/// Two independent limits, each disabled when zero: the number of pending
/// messages, and the total payload size of pending messages. The pending
/// size is tracked here from the `process_message` / `process_reply`
/// notifications; the pending count is tracked by the session and passed
/// into `can_send`.
#[derive(Debug, Clone, Default)]
pub struct StaticThrottlePolicy {
  max_pending_count: usize,
  max_pending_size: usize,
  pending_size: usize,
}

impl StaticThrottlePolicy {
  /// Creates a policy with both limits disabled.
  pub fn new() -> Self {
    Self::default()
  }

  /// Sets the maximum number of pending messages. Zero disables the check.
  pub fn set_max_pending_count(&mut self, max_count: usize) -> &mut Self {
    self.max_pending_count = max_count;
    self
  }

  /// Sets the maximum total payload size of pending messages, in bytes.
  /// Zero disables the check.
  pub fn set_max_pending_size(&mut self, max_size: usize) -> &mut Self {
    self.max_pending_size = max_size;
    self
  }

  /// Returns the configured pending-count ceiling.
  pub fn get_max_pending_count(&self) -> usize {
    self.max_pending_count
  }

  /// Returns the configured pending-size ceiling in bytes.
  pub fn get_max_pending_size(&self) -> usize {
    self.max_pending_size
  }

  /// Returns the payload size currently in flight, in bytes.
  pub fn pending_size(&self) -> usize {
    self.pending_size
  }
}

impl ThrottlePolicy for StaticThrottlePolicy {
  fn can_send(&mut self, _msg: &Msg, pending_count: usize) -> bool {
    if self.max_pending_count > 0 && pending_count >= self.max_pending_count {
      return false;
    }
    if self.max_pending_size > 0 && self.pending_size >= self.max_pending_size {
      return false;
    }
    true
  }

  fn process_message(&mut self, msg: &Msg) {
    self.pending_size += msg.size();
  }

  fn process_reply(&mut self, reply: &Reply) {
    self.pending_size = self.pending_size.saturating_sub(reply.message().size());
  }
}
