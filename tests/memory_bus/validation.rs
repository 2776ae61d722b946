//! Input validation: nothing is registered or dispatched on bad input.

use subject_bus::{BusError, Context, EventBus, MemoryBus};

use crate::support::{event, Recorder};

#[test]
fn subscribe_requires_subject() {
    let bus = MemoryBus::new();
    let recorder = Recorder::new();

    let err = bus.subscribe("", recorder.handler("h")).unwrap_err();
    assert!(matches!(err, BusError::SubjectRequired));
    assert_eq!(err.to_string(), "subject is required");

    bus.publish(&Context::new(), "anything", &event("e1"))
        .unwrap();
    assert_eq!(recorder.len(), 0);
    assert_eq!(bus.subscription_count(), 0);
}

#[test]
fn group_subscribe_requires_subject_and_group() {
    let bus = MemoryBus::new();
    let recorder = Recorder::new();

    let err = bus
        .subscribe_with_handler_group("", "workers", recorder.handler("h"))
        .unwrap_err();
    assert_eq!(err.to_string(), "subject is required");

    let err = bus
        .subscribe_with_handler_group("jobs", "", recorder.handler("h"))
        .unwrap_err();
    assert!(matches!(err, BusError::GroupRequired));
    assert_eq!(err.to_string(), "group is required");

    bus.publish(&Context::new(), "jobs", &event("e1")).unwrap();
    assert_eq!(recorder.len(), 0);
    assert!(bus.patterns().is_empty());
}

#[test]
fn publish_requires_subject() {
    let bus = MemoryBus::new();
    let recorder = Recorder::new();
    bus.subscribe("a", recorder.handler("h")).unwrap();

    let err = bus.publish(&Context::new(), "", &event("e1")).unwrap_err();
    assert!(err.is_validation());
    assert_eq!(recorder.len(), 0);
    assert_eq!(bus.stats().published, 0);
}
