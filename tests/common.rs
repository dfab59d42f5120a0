// tests/common.rs
#![allow(dead_code)] // Not every test binary uses every helper

use std::sync::Once;

use rbus_flow::{BusError, Msg, Reply, ThrottlePolicy};

static INIT: Once = Once::new();

// The `Once` ensures the subscriber is only initialized a single time even
// when several tests in one binary call this.
pub fn setup_logging() {
  INIT.call_once(|| {
    tracing_subscriber::fmt()
      .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
      .with_test_writer()
      .init();
  });
}

/// Minimal stand-in for a source session's bookkeeping: tracks the messages
/// whose replies are still outstanding and drives the policy in the
/// contractual order (`can_send` before `process_message` before the
/// matching `process_reply`).
pub struct SessionHarness<P: ThrottlePolicy> {
  pub policy: P,
  pending: Vec<Msg>,
}

impl<P: ThrottlePolicy> SessionHarness<P> {
  pub fn new(policy: P) -> Self {
    Self {
      policy,
      pending: Vec::new(),
    }
  }

  pub fn pending_count(&self) -> usize {
    self.pending.len()
  }

  /// Asks the policy for admission and, if granted, records the send.
  pub fn try_send(&mut self, msg: Msg) -> bool {
    if !self.policy.can_send(&msg, self.pending.len()) {
      return false;
    }
    self.policy.process_message(&msg);
    self.pending.push(msg);
    true
  }

  /// Delivers an error-free reply for the oldest outstanding message.
  pub fn complete_next(&mut self) -> bool {
    if self.pending.is_empty() {
      return false;
    }
    let msg = self.pending.remove(0);
    self.policy.process_reply(&Reply::new(msg));
    true
  }

  /// Delivers an errored reply for the oldest outstanding message. The
  /// pending slot is freed, but the policy earns no throughput credit.
  pub fn fail_next(&mut self, error: BusError) -> bool {
    if self.pending.is_empty() {
      return false;
    }
    let msg = self.pending.remove(0);
    self.policy.process_reply(&Reply::with_error(msg, error));
    true
  }
}
