// src/throttle/dynamic_policy.rs

use std::sync::Arc;

use crate::message::{Msg, Reply};
use crate::throttle::static_policy::StaticThrottlePolicy;
use crate::throttle::types::DynamicThrottleConfig;
use crate::throttle::ThrottlePolicy;
use crate::timer::{SystemTimer, Timer};

/// Quiet period on the admission gate after which the window is contracted
/// toward the current load.
const IDLE_TIME_MILLIS: u64 = 60_000;

/// A throttle policy that adapts its pending-message window to the measured
/// throughput of the session.
///
/// The policy admits sends against a fractional window and closes a
/// measurement interval after roughly `window_size * resize_rate` admitted
/// sends. At each interval boundary it compares the interval's throughput
/// (error-free replies per millisecond) against the best seen in the current
/// probing epoch: new maxima grow the window by `weight *
/// window_size_increment`, and a regression in window-normalized efficiency
/// shrinks it and restarts the epoch. A [`StaticThrottlePolicy`] supplies
/// hard ceilings on top.
///
/// One session drives one instance; see [`ThrottlePolicy`] for the call
/// ordering the policy relies on.
#[derive(Debug)]
pub struct DynamicThrottlePolicy {
  base: StaticThrottlePolicy,
  timer: Arc<dyn Timer>,
  num_sent: u64,
  num_ok: u64,
  resize_rate: f64,
  resize_time: u64,
  time_of_last_message: u64,
  efficiency_threshold: f64,
  window_size_increment: f64,
  window_size: f64,
  min_window_size: f64,
  decrement_factor: f64,
  max_window_size: f64,
  window_size_back_off: f64,
  weight: f64,
  local_max_throughput: f64,
  max_throughput: f64,
}

impl DynamicThrottlePolicy {
  /// Creates a policy with default tuning on the process-wide clock.
  pub fn new() -> Self {
    Self::with_timer(Arc::new(SystemTimer::new()))
  }

  /// Creates a policy with default tuning on the given clock.
  pub fn with_timer(timer: Arc<dyn Timer>) -> Self {
    let time_of_last_message = timer.milli_time();
    Self {
      base: StaticThrottlePolicy::new(),
      timer,
      num_sent: 0,
      num_ok: 0,
      resize_rate: 3.0,
      resize_time: 0,
      time_of_last_message,
      efficiency_threshold: 1.0,
      window_size_increment: 20.0,
      window_size: 20.0,
      min_window_size: 20.0,
      decrement_factor: 2.0,
      max_window_size: f64::from(i32::MAX),
      window_size_back_off: 0.9,
      weight: 1.0,
      local_max_throughput: 0.0,
      max_throughput: 0.0,
    }
  }

  /// Creates a policy from a bundled configuration on the given clock.
  pub fn with_config(config: DynamicThrottleConfig, timer: Arc<dyn Timer>) -> Self {
    let mut policy = Self::with_timer(timer);
    policy
      .set_resize_rate(config.resize_rate)
      .set_efficiency_threshold(config.efficiency_threshold)
      .set_window_size_decrement_factor(config.decrement_factor)
      .set_window_size_back_off(config.window_size_back_off)
      .set_weight(config.weight)
      .set_max_throughput(config.max_throughput)
      .set_max_window_size(config.max_window_size)
      .set_min_window_size(config.min_window_size)
      .set_window_size_increment(config.window_size_increment);
    policy
  }

  // --- Configuration surface ---

  /// Sets the lower efficiency threshold at which the policy backs off the
  /// window instead of probing further.
  pub fn set_efficiency_threshold(&mut self, efficiency_threshold: f64) -> &mut Self {
    self.efficiency_threshold = efficiency_threshold;
    self
  }

  /// Sets the step size used when increasing the window, and re-derives the
  /// starting window from it.
  pub fn set_window_size_increment(&mut self, window_size_increment: f64) -> &mut Self {
    self.window_size_increment = window_size_increment;
    self.window_size = self.min_window_size.max(self.window_size_increment);
    self
  }

  /// Sets the relative step size when decreasing the window, in units of
  /// the increment.
  pub fn set_window_size_decrement_factor(&mut self, decrement_factor: f64) -> &mut Self {
    self.decrement_factor = decrement_factor;
    self
  }

  /// Sets the contraction factor applied to the window on back-off. A value
  /// of 1 never shrinks below a previous maximum. Capped to `[0, 1]`.
  pub fn set_window_size_back_off(&mut self, window_size_back_off: f64) -> &mut Self {
    self.window_size_back_off = window_size_back_off.clamp(0.0, 1.0);
    self
  }

  /// Sets how many window-fulls of sends make up one measurement interval.
  /// Larger values resize less responsively but measure more accurately.
  pub fn set_resize_rate(&mut self, resize_rate: f64) -> &mut Self {
    self.resize_rate = resize_rate;
    self
  }

  /// Sets the relative resource share of this client. Stored as the square
  /// root, so shares divide proportionally to the configured value.
  pub fn set_weight(&mut self, weight: f64) -> &mut Self {
    self.weight = weight.sqrt();
    self
  }

  /// Sets the known throughput ceiling. While measured throughput is within
  /// 5% of it, the window is held steady. Zero means unknown.
  pub fn set_max_throughput(&mut self, max_throughput: f64) -> &mut Self {
    self.max_throughput = max_throughput;
    self
  }

  /// Sets the upper bound on the window.
  pub fn set_max_window_size(&mut self, max: f64) -> &mut Self {
    self.max_window_size = max;
    self
  }

  /// Sets the lower bound on the window, and re-derives the starting window
  /// from it.
  pub fn set_min_window_size(&mut self, min: f64) -> &mut Self {
    self.min_window_size = min;
    self.window_size = self.min_window_size.max(self.window_size_increment);
    self
  }

  /// Tightens the base policy's hard pending-count ceiling and caps the
  /// window at the same value.
  pub fn set_max_pending_count(&mut self, max_count: usize) -> &mut Self {
    self.base.set_max_pending_count(max_count);
    self.max_window_size = max_count as f64;
    self
  }

  /// Sets the base policy's hard pending-size ceiling in bytes.
  pub fn set_max_pending_size(&mut self, max_size: usize) -> &mut Self {
    self.base.set_max_pending_size(max_size);
    self
  }

  /// Returns the current whole-message window, i.e. the maximum number of
  /// pending messages the gate admits outside the fractional carry slot.
  pub fn get_max_pending_count(&self) -> usize {
    self.window_size as usize
  }

  /// Returns the lower bound on the window.
  pub fn get_min_window_size(&self) -> f64 {
    self.min_window_size
  }

  /// Returns the upper bound on the window.
  pub fn get_max_window_size(&self) -> f64 {
    self.max_window_size
  }

  /// Returns the probe-up step size.
  pub fn get_window_size_increment(&self) -> f64 {
    self.window_size_increment
  }

  /// Returns the back-off contraction factor.
  pub fn get_window_size_back_off(&self) -> f64 {
    self.window_size_back_off
  }

  // --- Window controller ---

  /// Closes the current measurement interval and resizes the window from
  /// its throughput sample.
  fn resize(&mut self, time: u64) {
    let elapsed = time.saturating_sub(self.resize_time);
    self.resize_time = time;

    let num_ok = self.num_ok;
    self.num_sent = 0;
    self.num_ok = 0;

    if elapsed == 0 {
      // Timer tie; a sample over zero elapsed time is a measurement
      // artifact, not a throughput observation.
      tracing::trace!("zero-elapsed measurement interval, window update skipped");
      return;
    }
    let throughput = num_ok as f64 / elapsed as f64;

    if self.max_throughput > 0.0 && throughput > self.max_throughput * 0.95 {
      // No need to grow the window this close to the known ceiling.
      tracing::debug!(
        window_size = self.window_size,
        throughput,
        max_throughput = self.max_throughput,
        "window pinned near max throughput"
      );
    } else if throughput >= self.local_max_throughput {
      self.local_max_throughput = throughput;
      self.window_size += self.weight * self.window_size_increment;
      tracing::debug!(
        window_size = self.window_size,
        throughput,
        local_max = self.local_max_throughput,
        "new local throughput maximum, probing up"
      );
    } else {
      let efficiency = self.normalized_efficiency(throughput);
      if efficiency < self.efficiency_threshold {
        self.window_size = (self.window_size * self.window_size_back_off)
          .min(self.window_size - self.decrement_factor * self.window_size_increment);
        self.local_max_throughput = 0.0;
        tracing::debug!(
          window_size = self.window_size,
          throughput,
          efficiency,
          "efficiency regressed, backing off"
        );
      } else {
        self.window_size += self.weight * self.window_size_increment;
        tracing::debug!(
          window_size = self.window_size,
          throughput,
          efficiency,
          "efficiency acceptable, probing past local maximum"
        );
      }
    }
    self.window_size = self.window_size.max(self.min_window_size);
    self.window_size = self.window_size.min(self.max_window_size);
  }

  /// Scales the throughput sample by powers of ten until its ratio to the
  /// window size lands in the neighborhood of 2, yielding a scale-invariant
  /// efficiency score comparable across window sizes.
  fn normalized_efficiency(&self, throughput: f64) -> f64 {
    if throughput <= 0.0 {
      // No useful replies over a whole interval; maximally inefficient.
      return 0.0;
    }
    let mut period = 1.0;
    while throughput * period / self.window_size < 2.0 {
      period *= 10.0;
    }
    while throughput * period / self.window_size > 2.0 {
      period *= 0.1;
    }
    throughput * period / self.window_size
  }
}

impl Default for DynamicThrottlePolicy {
  fn default() -> Self {
    Self::new()
  }
}

impl ThrottlePolicy for DynamicThrottlePolicy {
  fn can_send(&mut self, msg: &Msg, pending_count: usize) -> bool {
    if !self.base.can_send(msg, pending_count) {
      return false;
    }
    let time = self.timer.milli_time();
    let elapsed = time.saturating_sub(self.time_of_last_message);
    if elapsed > IDLE_TIME_MILLIS {
      // A long-idle client must not retain an inflated window.
      self.window_size = self
        .window_size
        .min(pending_count as f64 + self.window_size_increment)
        .max(self.min_window_size);
      tracing::trace!(
        window_size = self.window_size,
        pending_count,
        idle_ms = elapsed,
        "idle period over, window contracted toward current load"
      );
    }
    self.time_of_last_message = time;

    let floored = self.window_size.floor();
    // A fractional window admits one extra slot on a prefix of each
    // measurement interval proportional to the fractional part.
    let carry =
      (self.num_sent as f64) < (self.window_size * self.resize_rate) * (self.window_size - floored);
    let limit = floored as usize + usize::from(carry);
    pending_count < limit
  }

  fn process_message(&mut self, msg: &Msg) {
    self.base.process_message(msg);
    self.num_sent += 1;
    if (self.num_sent as f64) < self.window_size * self.resize_rate {
      return;
    }
    let time = self.timer.milli_time();
    self.resize(time);
  }

  fn process_reply(&mut self, reply: &Reply) {
    self.base.process_reply(reply);
    if !reply.has_errors() {
      self.num_ok += 1;
    }
  }
}
