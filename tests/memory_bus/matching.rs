//! Subject matching through the bus: exact, `*` and `>` patterns.

use subject_bus::{Context, EventBus, MemoryBus};

use crate::support::{event, Recorder};

#[test]
fn exact_pattern_delivers_only_to_equal_subject() {
    let bus = MemoryBus::new();
    let recorder = Recorder::new();
    bus.subscribe("a.b", recorder.handler("exact")).unwrap();

    let ctx = Context::new();
    bus.publish(&ctx, "a.b", &event("e1")).unwrap();
    bus.publish(&ctx, "a.c", &event("e2")).unwrap();

    assert_eq!(recorder.len(), 1);
}

#[test]
fn single_wildcard_matches_one_segment() {
    let bus = MemoryBus::new();
    let recorder = Recorder::new();
    bus.subscribe("app.*.created", recorder.handler("created"))
        .unwrap();

    let ctx = Context::new();
    for subject in [
        "app.user.created",
        "app.order.created",
        "app.user.updated",
        "user.created",
        "app.user.created.v2",
        "app..created",
    ] {
        bus.publish(&ctx, subject, &event(subject)).unwrap();
    }

    assert_eq!(recorder.count("created"), 2);
}

#[test]
fn tail_wildcard_matches_remaining_segments() {
    let bus = MemoryBus::new();
    let recorder = Recorder::new();
    bus.subscribe("app.>", recorder.handler("tail")).unwrap();

    let ctx = Context::new();
    bus.publish(&ctx, "app.user", &event("e1")).unwrap();
    bus.publish(&ctx, "app.user.created.v2", &event("e2")).unwrap();
    bus.publish(&ctx, "app", &event("e3")).unwrap();
    bus.publish(&ctx, "other.user", &event("e4")).unwrap();

    assert_eq!(recorder.count("tail"), 2);
}

#[test]
fn event_reaches_every_matching_pattern() {
    let bus = MemoryBus::new();
    let recorder = Recorder::new();
    bus.subscribe("orders.created", recorder.handler("exact"))
        .unwrap();
    bus.subscribe("orders.*", recorder.handler("wild")).unwrap();
    bus.subscribe("*.created", recorder.handler("suffix")).unwrap();
    bus.subscribe("payments.*", recorder.handler("other")).unwrap();

    bus.publish(&Context::new(), "orders.created", &event("e1"))
        .unwrap();

    assert_eq!(recorder.names(), vec!["exact", "wild", "suffix"]);
}

#[test]
fn wildcard_groups_match_like_broadcast() {
    let bus = MemoryBus::new();
    let recorder = Recorder::new();
    bus.subscribe_with_handler_group("app.*.created", "audit", recorder.handler("audit"))
        .unwrap();

    let ctx = Context::new();
    bus.publish(&ctx, "app.user.created", &event("e1")).unwrap();
    bus.publish(&ctx, "app.user.deleted", &event("e2")).unwrap();

    assert_eq!(recorder.count("audit"), 1);
}
