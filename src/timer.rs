// src/timer.rs

//! Monotonic millisecond clock behind a trait, so the window controller can
//! be driven by a deterministic clock in tests and simulations.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, OnceLock};
use std::time::Instant;

/// A source of monotonic time in integer milliseconds.
///
/// Readings must be nondecreasing between calls on the same instance.
/// Resolution may be coarse; consumers only compare readings taken from the
/// same instance.
pub trait Timer: fmt::Debug + Send + Sync {
  /// Returns the current reading in milliseconds.
  fn milli_time(&self) -> u64;
}

/// The process-wide monotonic clock.
///
/// Milliseconds since a lazily initialized anchor, so all instances in the
/// process share one time base.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemTimer;

static ANCHOR: OnceLock<Instant> = OnceLock::new();

impl SystemTimer {
  pub fn new() -> Self {
    Self
  }
}

impl Timer for SystemTimer {
  fn milli_time(&self) -> u64 {
    let anchor = *ANCHOR.get_or_init(Instant::now);
    anchor.elapsed().as_millis() as u64
  }
}

/// A manually advanced clock for tests and simulations.
///
/// Clones share the same reading, so a copy can be handed to a policy while
/// the test keeps advancing the original.
#[derive(Debug, Clone, Default)]
pub struct ManualTimer {
  now_ms: Arc<AtomicU64>,
}

impl ManualTimer {
  /// Creates a timer reading zero.
  pub fn new() -> Self {
    Self::default()
  }

  /// Moves the clock forward by `ms` milliseconds.
  pub fn advance(&self, ms: u64) {
    self.now_ms.fetch_add(ms, Ordering::SeqCst);
  }

  /// Sets the clock to an absolute reading.
  pub fn set(&self, ms: u64) {
    self.now_ms.store(ms, Ordering::SeqCst);
  }
}

impl Timer for ManualTimer {
  fn milli_time(&self) -> u64 {
    self.now_ms.load(Ordering::SeqCst)
  }
}
