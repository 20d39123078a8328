//! Integration tests for the drain loop and dispatch boundary
//!
//! These tests validate ordering, error containment and the outcome shapes
//! each event type produces.

use event_simulator_core_rs::{
    Collaborators, Event, HandlerOutcome, QueuedEvent, Simulator, SimulatorConfig,
};
use serde_json::{json, Value};
use std::cell::RefCell;
use std::rc::Rc;

type Log = Rc<RefCell<Vec<(String, HandlerOutcome)>>>;

/// Running simulator whose outcomes are recorded in order
fn recording_simulator() -> (Simulator, Log) {
    let log: Log = Rc::new(RefCell::new(Vec::new()));
    let recorder = log.clone();
    let mut sim = Simulator::new(SimulatorConfig::default(), Collaborators::in_memory())
        .unwrap()
        .with_outcome_sink(move |queued: &QueuedEvent, outcome: &HandlerOutcome| {
            recorder
                .borrow_mut()
                .push((queued.event.event_type.clone(), outcome.clone()));
        });
    sim.start();
    (sim, log)
}

fn signup_data() -> Value {
    json!({
        "profile": { "firstName": "Ali", "lastName": "Valiyev", "birthDate": "1990-01-01", "gender": "male" },
        "contact": { "email": "ali@example.com", "phone": "+998901234567" },
        "authentication": { "password": "SecurePass123!@#" },
        "preferences": { "theme": "dark", "language": "uz" }
    })
}

fn login_data() -> Value {
    json!({ "email": "ali@example.com", "password": "SecurePass123!@#" })
}

fn calculation_data(token: &str) -> Value {
    json!({
        "token": token,
        "calculation": { "type": "income", "amount": 1000000, "month": "Mart", "year": 2025, "category": "salary" }
    })
}

fn types(log: &Log) -> Vec<String> {
    log.borrow().iter().map(|(t, _)| t.clone()).collect()
}

fn token_from(log: &Log, index: usize) -> String {
    log.borrow()[index]
        .1
        .get("token")
        .and_then(Value::as_str)
        .unwrap()
        .to_string()
}

#[test]
fn test_demo_script_processes_three_events_in_order() {
    let (mut sim, log) = recording_simulator();

    sim.enqueue_event(Event::new("signup", signup_data()));
    sim.enqueue_event(Event::new("login", login_data()));
    sim.enqueue_event(Event::new("addCalculation", calculation_data("dummy-token")));

    assert_eq!(types(&log), vec!["signup", "login", "addCalculation"]);

    let log = log.borrow();
    assert!(log[0].1.success);
    assert!(log[1].1.success);
    // dummy-token is not a session
    assert!(!log[2].1.success);
    assert_eq!(log[2].1.error.as_deref(), Some("Invalid token"));

    let status = sim.status();
    assert_eq!(status.event_queue_size, 0);
    assert_eq!(status.users(), 1);
    assert!(status.last_event.is_none());
}

#[test]
fn test_unknown_type_does_not_block_following_events() {
    let (mut sim, log) = recording_simulator();

    sim.enqueue_event(Event::new("transferFunds", json!({ "amount": 5 })));
    sim.enqueue_event(Event::new("signup", signup_data()));

    let log = log.borrow();
    assert_eq!(log.len(), 2);
    assert_eq!(
        log[0].1.to_json(),
        json!({ "success": false, "error": "Unknown event type: transferFunds" })
    );
    assert_eq!(log[1].0, "signup");
    assert!(log[1].1.success);
}

#[test]
fn test_failed_login_is_isolated() {
    let (mut sim, log) = recording_simulator();

    // No signup yet, so login fails
    sim.enqueue_event(Event::new("login", login_data()));
    sim.enqueue_event(Event::new("addCalculation", calculation_data("dummy-token")));

    assert_eq!(types(&log), vec!["login", "addCalculation"]);
    let log = log.borrow();
    assert_eq!(log[0].1.error.as_deref(), Some("Invalid credentials"));
    assert!(!log[1].1.success);
    assert_eq!(sim.total_processed(), 2);
}

#[test]
fn test_failed_event_is_not_requeued() {
    let (mut sim, log) = recording_simulator();

    sim.enqueue_event(Event::new("getProfile", json!({ "token": "missing" })));

    assert_eq!(log.borrow().len(), 1);
    assert_eq!(sim.queue_len(), 0);
    assert_eq!(sim.process_events(), 0);
}

#[test]
fn test_malformed_payload_contained() {
    let (mut sim, log) = recording_simulator();

    sim.enqueue_event(Event::new("deleteCalculation", json!({ "token": "t" })));
    sim.enqueue_event(Event::new("logout", json!({ "token": "t" })));

    let log = log.borrow();
    assert!(!log[0].1.success);
    assert!(log[0]
        .1
        .error
        .as_deref()
        .unwrap()
        .starts_with("Invalid payload for deleteCalculation"));
    assert_eq!(log[1].0, "logout");
}

#[test]
fn test_logout_returns_raw_flag() {
    let (mut sim, log) = recording_simulator();

    sim.enqueue_event(Event::new("signup", signup_data()));
    sim.enqueue_event(Event::new("login", login_data()));
    let token = token_from(&log, 1);

    sim.enqueue_event(Event::new("logout", json!({ "token": token })));
    sim.enqueue_event(Event::new("logout", json!({ "token": token })));

    let log = log.borrow();
    assert_eq!(log[2].1.to_json(), json!({ "success": true }));
    // Second logout: no session, raw false, no error message
    assert_eq!(log[3].1.to_json(), json!({ "success": false }));
}

#[test]
fn test_get_profile_nests_result() {
    let (mut sim, log) = recording_simulator();

    sim.enqueue_event(Event::new("signup", signup_data()));
    sim.enqueue_event(Event::new("login", login_data()));
    let token = token_from(&log, 1);
    sim.enqueue_event(Event::new("getProfile", json!({ "token": token })));

    let log = log.borrow();
    let outcome = &log[2].1;
    assert!(outcome.success);
    assert_eq!(outcome.fields.len(), 1);
    assert_eq!(outcome.get("profile").unwrap()["email"], "ali@example.com");
    assert_eq!(
        outcome.get("profile").unwrap()["preferences"]["language"],
        "uz"
    );
}

#[test]
fn test_events_wait_until_start() {
    let log: Log = Rc::new(RefCell::new(Vec::new()));
    let recorder = log.clone();
    let mut sim = Simulator::new(SimulatorConfig::default(), Collaborators::in_memory())
        .unwrap()
        .with_outcome_sink(move |q: &QueuedEvent, o: &HandlerOutcome| {
            recorder.borrow_mut().push((q.event.event_type.clone(), o.clone()));
        });

    sim.enqueue_event(Event::new("signup", signup_data()));
    sim.enqueue_event(Event::new("login", login_data()));
    assert!(log.borrow().is_empty());
    assert_eq!(sim.queue_len(), 2);

    sim.start();
    assert_eq!(types(&log), vec!["signup", "login"]);
    assert_eq!(sim.queue_len(), 0);
}

#[test]
fn test_start_twice_resets_nothing() {
    let (mut sim, _log) = recording_simulator();
    sim.enqueue_event(Event::new("signup", signup_data()));
    assert_eq!(sim.state().users(), 1);

    sim.start();

    assert!(sim.is_running());
    assert_eq!(sim.state().users(), 1);
    assert_eq!(sim.total_processed(), 1);
}

#[test]
fn test_failed_signup_does_not_count_user() {
    let (mut sim, log) = recording_simulator();

    sim.enqueue_event(Event::new("signup", signup_data()));
    sim.enqueue_event(Event::new("signup", signup_data()));

    let log = log.borrow();
    assert!(log[0].1.success);
    assert!(!log[1].1.success);
    assert_eq!(sim.state().users(), 1);
}

#[test]
fn test_handle_event_directly_never_errors() {
    let mut sim = Simulator::new(SimulatorConfig::default(), Collaborators::in_memory()).unwrap();

    let outcome = sim.handle_event(&Event::new("", Value::Null));
    assert!(!outcome.success);
    assert!(sim.try_handle_event(&Event::new("", Value::Null)).is_err());
}

#[test]
fn test_drain_without_sink_discards_outcomes() {
    let mut sim = Simulator::new(
        SimulatorConfig {
            auto_start: true,
            log_payloads: false,
            ..Default::default()
        },
        Collaborators::in_memory(),
    )
    .unwrap();

    sim.enqueue_event(Event::new("signup", signup_data()));
    sim.enqueue_event(Event::new("nope", json!({})));

    assert_eq!(sim.total_processed(), 2);
    assert_eq!(sim.status().event_queue_size, 0);
}

#[test]
fn test_history_total_overflow_is_contained() {
    let (mut sim, log) = recording_simulator();

    sim.enqueue_event(Event::new("signup", signup_data()));
    sim.enqueue_event(Event::new("login", login_data()));
    let token = token_from(&log, 1);

    for _ in 0..2 {
        sim.enqueue_event(Event::new(
            "addCalculation",
            json!({
                "token": token,
                "calculation": { "type": "income", "amount": i64::MAX, "month": "Mart", "year": 2025, "category": "salary" }
            }),
        ));
    }
    sim.enqueue_event(Event::new("getHistory", json!({ "token": token })));
    sim.enqueue_event(Event::new("logout", json!({ "token": token })));

    assert_eq!(
        types(&log),
        vec!["signup", "login", "addCalculation", "addCalculation", "getHistory", "logout"]
    );
    let log = log.borrow();
    assert!(log[2].1.success && log[3].1.success);
    assert_eq!(
        log[4].1.error.as_deref(),
        Some("Validation failed: income total overflows")
    );
    assert_eq!(log[5].1.to_json(), json!({ "success": true }));
}
