// tests/static_limits.rs
//
// Hard-ceiling scenarios for the static base policy.

use rbus_flow::{BusError, Msg, StaticThrottlePolicy};

mod common;
use common::{setup_logging, SessionHarness};

fn static_session() -> SessionHarness<StaticThrottlePolicy> {
  setup_logging();
  SessionHarness::new(StaticThrottlePolicy::new())
}

#[test]
fn pending_count_ceiling_caps_in_flight_messages() {
  let mut session = static_session();
  session.policy.set_max_pending_count(4);

  for _ in 0..4 {
    assert!(session.try_send(Msg::from_static(b"req")));
  }
  assert!(!session.try_send(Msg::from_static(b"req")));

  // Any reply frees a slot, errored or not.
  assert!(session.fail_next(BusError::ConnectionClosed));
  assert!(session.try_send(Msg::from_static(b"req")));
  assert_eq!(session.pending_count(), 4);
}

#[test]
fn pending_size_ceiling_tracks_payload_bytes() {
  let mut session = static_session();
  session.policy.set_max_pending_size(100);
  let chunk = Msg::from_vec(vec![0u8; 40]);

  // The gauge is checked before the send is counted, so the ceiling may be
  // overshot by one message but never by two.
  assert!(session.try_send(chunk.clone()));
  assert!(session.try_send(chunk.clone()));
  assert!(session.try_send(chunk.clone()));
  assert_eq!(session.policy.pending_size(), 120);
  assert!(!session.try_send(chunk.clone()));

  assert!(session.complete_next());
  assert_eq!(session.policy.pending_size(), 80);
  assert!(session.try_send(chunk));
}

#[test]
fn both_limits_disabled_by_default() {
  let mut session = static_session();
  for _ in 0..10_000 {
    assert!(session.try_send(Msg::from_static(b"req")));
  }
}
