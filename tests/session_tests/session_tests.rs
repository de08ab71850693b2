//! Tests for Session
//!
//! These tests verify:
//! - Request/answer exchanges over a real UDP socket
//! - ReadState transitions on success and each kind of failure
//! - Commands that expect no answer
//! - One request in flight under concurrent callers
//! - Stale answers never reach a later query
//! - Cancellation of a pending wait

#[path = "../common/mod.rs"]
mod common;

use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use common::{answer, local_config, silent_peer, values, FakeSimulator, Responder};
use devlink::config::DEFAULT_RECEIVE_TIMEOUT_MS;
use devlink::protocol::{codes, SKIP_INDEXED, SKIP_PLAIN};
use devlink::transport::UdpTransport;
use devlink::{Code, LinkError, ReadState, Session};

// =============================================================================
// Helper Functions
// =============================================================================

fn connected(responder: &Responder, timeout_ms: u64) -> Session {
    let session = Session::new(responder.config(timeout_ms));
    session.initialize().unwrap();
    session
}

fn sample_values() -> common::Values {
    values(&[
        ("2", "4.01"),
        ("22", "P-51"),
        ("30", "250.5"),
        ("40", "1500.0"),
        ("64\\0", "1850.0"),
        ("66\\0", "45.2"),
    ])
}

// =============================================================================
// Lifecycle
// =============================================================================

#[test]
fn test_uninitialized_session() {
    let session = Session::new(local_config(21100, 250));
    assert!(!session.is_initialized());
    assert_eq!(session.read_state(), ReadState::NotRead);

    let result = session.query(&[codes::GET_PLANE]);
    assert!(matches!(result, Err(LinkError::NotInitialized)));
    assert_eq!(session.read_state(), ReadState::Failure);
    assert!(matches!(
        session.toggle(&codes::TOGGLE_NAV_LTS),
        Err(LinkError::NotInitialized)
    ));
}

#[test]
fn test_initialize_and_detach() {
    let responder = Responder::with_values(sample_values());
    let session = connected(&responder, 250);
    assert!(session.is_initialized());

    let transport = session.detach();
    assert!(transport.is_some());
    assert!(!session.is_initialized());

    // reinitialize after detach
    session.initialize().unwrap();
    assert_eq!(session.read_value(&codes::GET_PLANE, SKIP_PLAIN).unwrap(), "P-51");
}

// =============================================================================
// Queries
// =============================================================================

#[test]
fn test_query_round_trip() {
    let responder = Responder::with_values(sample_values());
    let session = connected(&responder, 250);

    let frame = session.query(&[codes::GET_PLANE]).unwrap();
    assert_eq!(frame.as_bytes(), b"A/22\\P-51");
    assert!(session.has_data());
    assert_eq!(session.read_state(), ReadState::Success);
    assert_eq!(session.last_response(), Some(frame));
    assert_eq!(responder.requests(), vec!["R/22".to_string()]);
}

#[test]
fn test_read_helpers() {
    let responder = Responder::with_values(sample_values());
    let session = connected(&responder, 250);

    assert_eq!(session.read_value(&codes::GET_VERSION, SKIP_PLAIN).unwrap(), "4.01");
    assert_eq!(session.read_float(&codes::GET_IAS, SKIP_PLAIN).unwrap(), 250.5);
    assert_eq!(session.read_int(&codes::GET_ALT, SKIP_PLAIN).unwrap(), 1500);
    assert_eq!(
        session
            .read_float(&codes::GET_RPM.with_arg(0), SKIP_INDEXED)
            .unwrap(),
        1850.0
    );
}

#[test]
fn test_composite_query_decodes_each_code() {
    let responder = Responder::with_values(sample_values());
    let session = connected(&responder, 250);

    let request = [codes::GET_RPM.with_arg(0), codes::GET_MANIFOLD.with_arg(0)];
    let frame = session.query(&request).unwrap();
    assert_eq!(frame.as_bytes(), b"A/64\\0\\1850.0/66\\0\\45.2");

    let rpm = devlink::protocol::decode_value(&frame, &codes::GET_RPM, SKIP_INDEXED).unwrap();
    let manifold =
        devlink::protocol::decode_value(&frame, &codes::GET_MANIFOLD, SKIP_INDEXED).unwrap();
    assert_eq!(rpm, b"1850.0");
    assert_eq!(manifold, b"45.2");
    assert_eq!(responder.requests(), vec!["R/64\\0/66\\0".to_string()]);
}

#[test]
fn test_timeout_sets_failure() {
    let peer = silent_peer();
    let session: Session = Session::new(local_config(peer.local_addr().unwrap().port(), 100));
    session.initialize().unwrap();

    let result = session.query(&[codes::GET_PLANE]);
    assert!(matches!(result, Err(LinkError::TimedOut(100))));
    assert_eq!(session.read_state(), ReadState::Failure);
    assert!(!session.has_data());
    assert_eq!(session.last_response(), None);
}

#[test]
fn test_default_timeout_sets_failure() {
    let peer = silent_peer();
    let session: Session = Session::new(local_config(
        peer.local_addr().unwrap().port(),
        DEFAULT_RECEIVE_TIMEOUT_MS,
    ));
    session.initialize().unwrap();

    let start = Instant::now();
    let result = session.query(&[codes::GET_PLANE]);

    assert!(matches!(result, Err(LinkError::TimedOut(250))));
    assert!(start.elapsed() >= Duration::from_millis(DEFAULT_RECEIVE_TIMEOUT_MS));
    assert_eq!(session.read_state(), ReadState::Failure);
    assert!(!session.has_data());
}

#[test]
fn test_failure_clears_previous_response() {
    let responder = Responder::with_values(sample_values());
    let session = connected(&responder, 100);

    session.query(&[codes::GET_PLANE]).unwrap();
    assert!(session.last_response().is_some());

    // unknown code: the fake simulator stays silent
    let result = session.query(&[Code::new("999")]);
    assert!(matches!(result, Err(LinkError::TimedOut(_))));
    assert_eq!(session.last_response(), None);
    assert_eq!(session.read_state(), ReadState::Failure);
}

#[test]
fn test_malformed_answer() {
    let responder = Responder::spawn(|_| Some("X/22\\P-51".to_string()));
    let session = connected(&responder, 250);

    let result = session.query(&[codes::GET_PLANE]);
    assert!(matches!(result, Err(LinkError::MalformedAnswer(_))));
    assert_eq!(session.read_state(), ReadState::Failure);
}

#[test]
fn test_decode_failure_keeps_success_state() {
    let responder = Responder::spawn(|_| Some("A/22\\".to_string()));
    let session = connected(&responder, 250);

    let result = session.read_value(&codes::GET_PLANE, SKIP_PLAIN);
    assert!(matches!(result, Err(LinkError::EmptyValue(_))));
    // the exchange itself succeeded
    assert_eq!(session.read_state(), ReadState::Success);
}

#[test]
fn test_oversized_request_sends_nothing() {
    let responder = Responder::with_values(sample_values());
    let session = connected(&responder, 100);

    let huge = Code::from("1".repeat(80));
    let result = session.query(&[huge]);
    assert!(matches!(result, Err(LinkError::Encoding(_))));
    assert_eq!(session.read_state(), ReadState::Failure);

    thread::sleep(Duration::from_millis(50));
    assert!(responder.requests().is_empty());
}

#[test]
fn test_query_shims_collapse_to_zero() {
    let responder = Responder::spawn(|request| match request {
        "R/30" => Some("A/30\\250.5".to_string()),
        "R/22" => Some("A/22\\P-51".to_string()),
        _ => None,
    });
    let session = connected(&responder, 100);

    assert_eq!(session.query_float(&codes::GET_IAS), 250.5);
    assert!(session.has_data());

    assert_eq!(session.query_float(&codes::GET_ALT), 0.0);
    assert!(!session.has_data());

    // answered, but not a number
    assert_eq!(session.query_int(&codes::GET_PLANE), 0);
    assert!(session.has_data());
}

// =============================================================================
// Commands
// =============================================================================

#[test]
fn test_toggle_and_set_wire_format() {
    let responder = Responder::with_values(sample_values());
    let session = connected(&responder, 250);

    session.toggle(&codes::TOGGLE_NAV_LTS).unwrap();
    session.set_value(&codes::SET_AILERON, 0.5).unwrap();
    session.set_int(&codes::SET_WEAP1, 1).unwrap();
    session
        .send_codes(&[codes::SELECT_ENG_1, codes::TOGGLE_ENGINE, codes::SELECT_ENG_ALL])
        .unwrap();

    let requests = responder.wait_for_requests(4);
    assert_eq!(
        requests,
        vec![
            "R/411".to_string(),
            "R/85\\0.500000".to_string(),
            "R/181\\1".to_string(),
            "R/123/103/115".to_string(),
        ]
    );
}

#[test]
fn test_toggle_does_not_touch_read_state() {
    let responder = Responder::with_values(sample_values());
    let session = connected(&responder, 250);

    session.query(&[codes::GET_PLANE]).unwrap();
    session.toggle(&codes::TOGGLE_NAV_LTS).unwrap();
    assert_eq!(session.read_state(), ReadState::Success);
}

#[test]
fn test_set_value_rejects_non_finite() {
    let responder = Responder::with_values(sample_values());
    let session = connected(&responder, 250);

    let result = session.set_value(&codes::SET_AILERON, f32::NAN);
    assert!(matches!(result, Err(LinkError::InvalidArgument(_))));

    thread::sleep(Duration::from_millis(50));
    assert!(responder.requests().is_empty());
}

// =============================================================================
// Concurrency
// =============================================================================

#[test]
fn test_concurrent_queries_never_interleave() {
    let table: Vec<(String, String)> = (0..8)
        .map(|i| (format!("{}", 500 + i), format!("{}.5", i * 10)))
        .collect();
    let pairs: Vec<(&str, &str)> = table.iter().map(|(k, v)| (k.as_str(), v.as_str())).collect();
    let responder = Responder::with_values(values(&pairs));
    let session = Arc::new(connected(&responder, 1000));

    let handles: Vec<_> = (0..8)
        .map(|i| {
            let session = Arc::clone(&session);
            thread::spawn(move || {
                let code = Code::from(format!("{}", 500 + i));
                for _ in 0..20 {
                    let value = session.read_float(&code, SKIP_PLAIN).unwrap();
                    assert_eq!(value, (i * 10) as f32 + 0.5);
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }
    assert_eq!(responder.requests().len(), 160);
}

#[test]
fn test_status_checks_do_not_wait_for_query_in_flight() {
    let peer = silent_peer();
    let session: Arc<Session> = Arc::new(Session::new(local_config(
        peer.local_addr().unwrap().port(),
        1000,
    )));
    session.initialize().unwrap();

    let querying = {
        let session = Arc::clone(&session);
        thread::spawn(move || session.query(&[codes::GET_PLANE]))
    };
    thread::sleep(Duration::from_millis(100));

    let start = Instant::now();
    assert!(session.is_initialized());
    assert_eq!(session.read_state(), ReadState::NotRead);
    assert!(!session.has_data());
    assert_eq!(session.last_response(), None);
    assert!(start.elapsed() < Duration::from_millis(300));

    assert!(matches!(
        querying.join().unwrap(),
        Err(LinkError::TimedOut(1000))
    ));
    assert_eq!(session.read_state(), ReadState::Failure);
}

#[test]
fn test_stale_answer_is_discarded() {
    let responder = Responder::spawn(|request| {
        if request == "R/2" {
            thread::sleep(Duration::from_millis(300));
            return Some("A/2\\4.01".to_string());
        }
        answer(&sample_values().lock(), request)
    });
    let session = connected(&responder, 150);

    let result = session.read_value(&codes::GET_VERSION, SKIP_PLAIN);
    assert!(matches!(result, Err(LinkError::TimedOut(_))));

    // let the late answer land in the socket queue
    thread::sleep(Duration::from_millis(400));

    assert_eq!(session.read_value(&codes::GET_PLANE, SKIP_PLAIN).unwrap(), "P-51");
}

#[test]
fn test_cancel_aborts_wait() {
    let peer = silent_peer();
    let session: Arc<Session> = Arc::new(Session::new(local_config(
        peer.local_addr().unwrap().port(),
        5000,
    )));
    session.initialize().unwrap();

    let token = session.cancel_token();
    let canceller = thread::spawn(move || {
        thread::sleep(Duration::from_millis(50));
        token.cancel();
    });

    let start = Instant::now();
    let result = session.query(&[codes::GET_PLANE]);
    canceller.join().unwrap();

    assert!(matches!(result, Err(LinkError::Cancelled)));
    assert!(start.elapsed() < Duration::from_secs(2));
    assert_eq!(session.read_state(), ReadState::Failure);
}

// =============================================================================
// Custom Transports
// =============================================================================

#[test]
fn test_session_over_custom_transport() {
    let (sim, requests) = FakeSimulator::with_values(sample_values());
    let session = Session::with_transport(local_config(21100, 250), sim);

    assert!(session.is_initialized());
    assert_eq!(session.read_value(&codes::GET_PLANE, SKIP_PLAIN).unwrap(), "P-51");
    assert_eq!(*requests.lock(), vec!["R/22".to_string()]);
}

#[test]
fn test_attach_replaces_transport() {
    let session: Session<UdpTransport> = Session::new(local_config(21100, 250));
    let responder = Responder::with_values(sample_values());
    let transport = UdpTransport::open(&responder.config(250)).unwrap();

    session.attach(transport);
    assert!(session.is_initialized());
    assert_eq!(session.read_state(), ReadState::NotRead);
    assert_eq!(session.read_float(&codes::GET_IAS, SKIP_PLAIN).unwrap(), 250.5);
}
