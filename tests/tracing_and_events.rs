//! Integration tests for tracing and event monitoring.
//!
//! The trace callback is process-wide, so every test here is `#[serial]` and events are
//! filtered down to the singleton type under test.

use serial_test::serial;
use singleton_proxy::{
    clear_trace_callback, set_trace_callback, singleton, InfallibleSingleton, Singleton,
    SingletonEvent,
};
use std::sync::{Arc, Mutex};

/// Records every event that concerns `T` as its display string.
fn record_events_for<T>() -> Arc<Mutex<Vec<String>>> {
    let name = std::any::type_name::<T>();
    let events = Arc::new(Mutex::new(Vec::new()));
    let events_clone = events.clone();

    set_trace_callback(move |event| {
        let concerns_type = match event {
            SingletonEvent::Get { type_name, .. }
            | SingletonEvent::Create { type_name }
            | SingletonEvent::Reset { type_name, .. }
            | SingletonEvent::Contains { type_name, .. } => *type_name == name,
            SingletonEvent::Clear {} => false,
        };
        if concerns_type {
            events_clone.lock().unwrap().push(format!("{}", event));
        }
    });

    events
}

#[test]
#[serial]
fn test_basic_tracing() {
    #[derive(Default)]
    struct Traced;
    singleton!(Traced);

    let events = record_events_for::<Traced>();

    let _ = Traced::instance();
    let _ = Traced::has_instance();
    Traced::reset_instance();

    clear_trace_callback();

    let captured = events.lock().unwrap();
    assert_eq!(captured.len(), 4);
    assert!(captured[0].starts_with("get"));
    assert!(captured[1].starts_with("create"));
    assert!(captured[2].starts_with("contains"));
    assert!(captured[3].starts_with("reset"));
}

#[test]
#[serial]
fn test_trace_get_found_and_not_found() {
    #[derive(Default)]
    struct Looked;
    singleton!(Looked);

    let events = record_events_for::<Looked>();

    let _ = Looked::peek_instance();
    let _ = Looked::instance();
    let _ = Looked::instance();

    clear_trace_callback();

    let name = std::any::type_name::<Looked>();
    let captured = events.lock().unwrap();
    assert_eq!(
        *captured,
        vec![
            format!("get {{ type_name: {name}, found: false }}"),
            format!("get {{ type_name: {name}, found: false }}"),
            format!("create {{ type_name: {name} }}"),
            format!("get {{ type_name: {name}, found: true }}"),
        ]
    );
}

#[test]
#[serial]
fn test_proxy_operations_are_traced() {
    #[derive(Default)]
    struct Proxied;
    singleton!(Proxied);

    Proxied::reset_instance();
    let events = record_events_for::<Proxied>();

    let proxy = Proxied::proxy();
    proxy.with(|_| ());
    proxy.with(|_| ());
    proxy.reset_instance();
    proxy.with(|_| ());

    clear_trace_callback();

    let captured = events.lock().unwrap();
    let creates = captured
        .iter()
        .filter(|e| e.starts_with("create"))
        .count();
    let gets = captured.iter().filter(|e| e.starts_with("get")).count();

    // Every forwarded operation resolves the instance again.
    assert_eq!(gets, 3);
    assert_eq!(creates, 2);
    assert!(captured.iter().any(|e| e.ends_with("found: true }")));
}

#[test]
#[serial]
fn test_trace_clear_event() {
    let events = Arc::new(Mutex::new(Vec::new()));
    let events_clone = events.clone();

    set_trace_callback(move |event| {
        if let SingletonEvent::Clear {} = event {
            events_clone.lock().unwrap().push(event.clone());
        }
    });

    singleton_proxy::registry::clear();
    clear_trace_callback();

    let captured = events.lock().unwrap();
    assert_eq!(*captured, vec![SingletonEvent::Clear {}]);
}

#[test]
#[serial]
fn test_trace_callback_replacement() {
    #[derive(Default)]
    struct Watched;
    singleton!(Watched);

    let first = record_events_for::<Watched>();
    let _ = Watched::has_instance();

    let second = record_events_for::<Watched>();
    let _ = Watched::has_instance();
    let _ = Watched::has_instance();

    clear_trace_callback();
    let _ = Watched::has_instance();

    assert_eq!(first.lock().unwrap().len(), 1);
    assert_eq!(second.lock().unwrap().len(), 2);
}
