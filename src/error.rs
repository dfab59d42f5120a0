use thiserror::Error;

/// A delivery error attached to a [`Reply`](crate::message::Reply).
///
/// Replies may carry any number of these; a reply with at least one error
/// does not count as useful throughput for the dynamic throttle, even
/// though its arrival frees the pending slot it occupied.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive] // Allows adding more variants later without breaking change
pub enum BusError {
  // --- Transient errors (resending the message may succeed) ---
  #[error("send queue is full")]
  SendQueueFull,

  #[error("message expired in transit")]
  Timeout,

  #[error("transport failure: {0}")]
  TransportFailure(String),

  #[error("connection closed by peer or transport")]
  ConnectionClosed,

  #[error("no route to destination: {0}")]
  NoAddress(String),

  // --- Fatal errors (resending the same message will fail again) ---
  #[error("peer failed to decode the message: {0}")]
  DecodeError(String),

  #[error("message handler failed: {0}")]
  HandlerFailure(String),
}

impl BusError {
  /// Returns true if resending the same message cannot succeed.
  pub fn is_fatal(&self) -> bool {
    matches!(self, BusError::DecodeError(_) | BusError::HandlerFailure(_))
  }

  /// Returns true if the failure may clear up on retry.
  pub fn is_transient(&self) -> bool {
    !self.is_fatal()
  }
}
