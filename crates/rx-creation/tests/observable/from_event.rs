//! Tests for `Observable::from_event` — the observable face of `EventBridge`.

use std::sync::{Arc, Mutex};

use rx_creation::{
    observable::{Observable, Observer},
    reactive::{EventBridge, EventEmitter},
    types::{BridgeOptions, DeliveryPolicy},
    RxError,
};
use serde_json::{json, Value};

const EVENT: &str = "customEvent";

fn make_log<T: Send + 'static>() -> Arc<Mutex<Vec<T>>> {
    Arc::new(Mutex::new(Vec::new()))
}

fn push_to<T: Send + 'static>(log: &Arc<Mutex<Vec<T>>>) -> impl Fn(T) + Send + Sync + 'static {
    let log = Arc::clone(log);
    move |value| log.lock().unwrap().push(value)
}

#[test]
fn event_observable_emits_values_when_event_is_emitted() {
    let emitter: Arc<EventEmitter<Value>> = Arc::new(EventEmitter::new());
    let events = Observable::from_event(&emitter, EVENT).unwrap();
    let arr = make_log::<Value>();

    let _subs = events.subscribe(push_to(&arr));
    emitter.emit(EVENT, &json!(1));
    emitter.emit(EVENT, &json!(2));
    emitter.emit(EVENT, &json!(3));

    assert_eq!(*arr.lock().unwrap(), vec![json!(1), json!(2), json!(3)]);
}

#[test]
fn from_event_rejects_empty_name() {
    let emitter: Arc<EventEmitter<i32>> = Arc::new(EventEmitter::new());
    let result = Observable::from_event(&emitter, "");
    assert!(matches!(result, Err(RxError::InvalidEventName(_))));
}

#[test]
fn subscriptions_share_one_listener() {
    let emitter: Arc<EventEmitter<i32>> = Arc::new(EventEmitter::new());
    let events = Observable::from_event(&emitter, EVENT).unwrap();
    assert_eq!(emitter.listener_count(EVENT), 0);

    let a = events.subscribe(|_: i32| {});
    let b = events.subscribe(|_: i32| {});
    assert_eq!(emitter.listener_count(EVENT), 1);

    a.unsubscribe();
    assert_eq!(emitter.listener_count(EVENT), 1);
    b.unsubscribe();
    assert_eq!(emitter.listener_count(EVENT), 0);
}

#[test]
fn late_subscriber_sees_only_later_events() {
    let emitter: Arc<EventEmitter<i32>> = Arc::new(EventEmitter::new());
    let events = Observable::from_event(&emitter, EVENT).unwrap();
    let a = make_log::<i32>();
    let b = make_log::<i32>();

    let _sa = events.subscribe(push_to(&a));
    emitter.emit(EVENT, &1);
    let _sb = events.subscribe(push_to(&b));
    emitter.emit(EVENT, &2);

    assert_eq!(*a.lock().unwrap(), vec![1, 2]);
    assert_eq!(*b.lock().unwrap(), vec![2]);
}

#[test]
fn event_sequence_does_not_complete_on_unsubscribe() {
    let emitter: Arc<EventEmitter<i32>> = Arc::new(EventEmitter::new());
    let events = Observable::from_event(&emitter, EVENT).unwrap();
    let completed = Arc::new(Mutex::new(false));
    let completed_clone = Arc::clone(&completed);

    let sub = events.subscribe(
        Observer::new(|_: i32| {}).on_complete(move || *completed_clone.lock().unwrap() = true),
    );
    sub.unsubscribe();
    emitter.emit(EVENT, &1);

    assert!(!*completed.lock().unwrap());
    assert_eq!(emitter.listener_count(EVENT), 0);
}

#[test]
fn dropped_source_is_reported_to_error_handler() {
    let emitter: Arc<EventEmitter<i32>> = Arc::new(EventEmitter::new());
    let events = Observable::from_event(&emitter, EVENT).unwrap();
    drop(emitter);
    let errors = make_log::<RxError>();

    let sub = events.subscribe(Observer::new(|_: i32| {}).on_error(push_to(&errors)));

    assert!(sub.is_closed());
    assert_eq!(
        *errors.lock().unwrap(),
        vec![RxError::SourceDropped {
            event: EVENT.to_string()
        }]
    );
}

#[test]
fn disposed_bridge_is_reported_to_error_handler() {
    let emitter: Arc<EventEmitter<i32>> = Arc::new(EventEmitter::new());
    let bridge = EventBridge::new(&emitter, EVENT).unwrap();
    let events = Observable::from_bridge(bridge.clone());
    bridge.dispose();
    let errors = make_log::<RxError>();

    events.subscribe(Observer::new(|_: i32| {}).on_error(push_to(&errors)));

    assert!(matches!(
        errors.lock().unwrap().as_slice(),
        [RxError::BridgeDisposed { .. }]
    ));
}

#[test]
fn disposing_the_bridge_closes_observable_subscriptions() {
    let emitter: Arc<EventEmitter<i32>> = Arc::new(EventEmitter::new());
    let bridge = EventBridge::new(&emitter, EVENT).unwrap();
    let events = Observable::from_bridge(bridge.clone());
    let seen = make_log::<i32>();
    let completed = Arc::new(Mutex::new(false));
    let completed_clone = Arc::clone(&completed);

    let sub = events.subscribe(
        Observer::new(push_to(&seen)).on_complete(move || *completed_clone.lock().unwrap() = true),
    );
    emitter.emit(EVENT, &1);
    bridge.dispose();
    emitter.emit(EVENT, &2);

    assert!(sub.is_closed());
    assert!(!*completed.lock().unwrap(), "disposal ends the sequence silently");
    assert_eq!(*seen.lock().unwrap(), vec![1]);
    assert_eq!(emitter.listener_count(EVENT), 0);
    sub.unsubscribe();
}

#[test]
fn options_apply_to_every_subscription() {
    let emitter: Arc<EventEmitter<i32>> = Arc::new(EventEmitter::new());
    let reported = make_log::<RxError>();
    let reported_clone = Arc::clone(&reported);
    let options = BridgeOptions {
        delivery_policy: DeliveryPolicy::Isolate,
        on_delivery_error: Some(Arc::new(move |err: &RxError| {
            reported_clone.lock().unwrap().push(err.clone())
        })),
    };
    let events = Observable::from_event_with_options(&emitter, EVENT, options).unwrap();
    let healthy = make_log::<i32>();

    let _broken = events.subscribe(|_: i32| panic!("bad observer"));
    let _healthy = events.subscribe(push_to(&healthy));
    emitter.emit(EVENT, &1);

    assert_eq!(*healthy.lock().unwrap(), vec![1]);
    assert_eq!(reported.lock().unwrap().len(), 1);
}
