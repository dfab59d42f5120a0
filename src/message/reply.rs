use crate::error::BusError;
use crate::message::Msg;

/// The answer to a single sent [`Msg`].
///
/// A reply always carries the message it answers, so consumers that tracked
/// per-message state at send time (e.g. the pending payload size) can
/// release it without a side table. A reply with no errors is a successful
/// delivery.
#[derive(Debug, Clone, Default)]
pub struct Reply {
  message: Msg,
  errors: Vec<BusError>,
}

impl Reply {
  /// Creates a successful reply to the given message.
  pub fn new(message: Msg) -> Self {
    Self {
      message,
      errors: Vec::new(),
    }
  }

  /// Creates a reply carrying a single delivery error.
  pub fn with_error(message: Msg, error: BusError) -> Self {
    Self {
      message,
      errors: vec![error],
    }
  }

  /// Returns the message this reply answers.
  pub fn message(&self) -> &Msg {
    &self.message
  }

  /// Appends a delivery error to this reply.
  pub fn add_error(&mut self, error: BusError) {
    self.errors.push(error);
  }

  /// Returns the delivery errors attached to this reply.
  pub fn errors(&self) -> &[BusError] {
    &self.errors
  }

  /// Returns true if this reply carries at least one error.
  pub fn has_errors(&self) -> bool {
    !self.errors.is_empty()
  }

  /// Returns true if this reply carries at least one fatal error.
  pub fn has_fatal_errors(&self) -> bool {
    self.errors.iter().any(BusError::is_fatal)
  }
}
