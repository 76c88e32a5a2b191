//! Tests for `EventName`.

use rx_creation::{reactive::EventName, RxError};

#[test]
fn new_accepts_non_empty_names() {
    let name = EventName::new("customEvent").expect("valid name");
    assert_eq!(name.as_str(), "customEvent");
    assert_eq!(name.to_string(), "customEvent");
    assert_eq!(name.as_ref(), "customEvent");
}

#[test]
fn new_rejects_empty_name() {
    let err = EventName::new("").unwrap_err();
    assert_eq!(err, RxError::InvalidEventName(String::new()));
}

#[test]
fn whitespace_is_a_valid_name() {
    assert!(EventName::new(" ").is_ok());
}

#[test]
fn try_from_str_and_string() {
    let a = EventName::try_from("x").unwrap();
    let b = EventName::try_from("x".to_string()).unwrap();
    assert_eq!(a, b);
    assert!(EventName::try_from(String::new()).is_err());
}
