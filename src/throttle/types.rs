// src/throttle/types.rs

/// Tunables for [`DynamicThrottlePolicy`](crate::throttle::DynamicThrottlePolicy),
/// applied atomically at construction.
///
/// The runtime setters on the policy remain available afterwards; this
/// struct only bundles an initial configuration. Out-of-range values are
/// clamped or coerced exactly as the corresponding setters would.
#[derive(Debug, Clone)]
pub struct DynamicThrottleConfig {
  /// Additive step applied to the window when probing up. Also the starting
  /// window size (together with `min_window_size`).
  pub window_size_increment: f64,
  /// Lower bound on the window after any update.
  pub min_window_size: f64,
  /// Upper bound on the window after any update.
  pub max_window_size: f64,
  /// Number of window-fulls of admitted sends per measurement interval.
  /// Larger values measure more accurately but resize less responsively.
  pub resize_rate: f64,
  /// Window-normalized efficiency below which an interval counts as a
  /// regression and the window backs off.
  pub efficiency_threshold: f64,
  /// Relative additive step when backing off, in units of
  /// `window_size_increment`.
  pub decrement_factor: f64,
  /// Multiplicative contraction floor on back-off. Clamped to `[0, 1]`.
  pub window_size_back_off: f64,
  /// Relative resource share of this client. Two clients with weights
  /// `w1, w2` grow their windows at ratio `sqrt(w1) : sqrt(w2)`.
  pub weight: f64,
  /// Known throughput ceiling, if any. While measured throughput sits
  /// within 5% of it, the window is held steady. Zero means unknown.
  pub max_throughput: f64,
}

impl Default for DynamicThrottleConfig {
  fn default() -> Self {
    Self {
      window_size_increment: 20.0,
      min_window_size: 20.0,
      max_window_size: f64::from(i32::MAX),
      resize_rate: 3.0,
      efficiency_threshold: 1.0,
      decrement_factor: 2.0,
      window_size_back_off: 0.9,
      weight: 1.0,
      max_throughput: 0.0,
    }
  }
}
