//! Broadcast (fan-out) delivery.

use std::sync::{Arc, Mutex};

use subject_bus::{handler_fn, Context, Delivery, Event, EventBus, HandlerError, MemoryBus};

use crate::support::{event, Recorder};

#[test]
fn every_handler_receives_every_publish_in_order() {
    let bus = MemoryBus::new();
    let recorder = Recorder::new();
    bus.subscribe("test.multi", recorder.handler("h1")).unwrap();
    bus.subscribe("test.multi", recorder.handler("h2")).unwrap();

    let ctx = Context::new();
    bus.publish(&ctx, "test.multi", &event("e1")).unwrap();
    bus.publish(&ctx, "test.multi", &event("e2")).unwrap();

    assert_eq!(recorder.names(), vec!["h1", "h2", "h1", "h2"]);
}

#[test]
fn failing_handler_does_not_block_others() {
    let bus = MemoryBus::new();
    let recorder = Recorder::new();
    bus.subscribe("test.error", recorder.failing("bad")).unwrap();
    bus.subscribe("test.error", recorder.handler("good")).unwrap();
    bus.subscribe_with_handler_group("test.error", "workers", recorder.handler("worker"))
        .unwrap();

    let result = bus.publish(&Context::new(), "test.error", &event("e1"));

    assert!(result.is_ok());
    assert_eq!(recorder.names(), vec!["bad", "good", "worker"]);
    let stats = bus.stats();
    assert_eq!(stats.failed, 1);
    assert_eq!(stats.delivered, 2);
}

#[test]
fn handler_receives_the_published_event() {
    let bus = MemoryBus::new();
    let seen = Arc::new(Mutex::new(None));
    let slot = Arc::clone(&seen);
    bus.subscribe(
        "test.subject",
        handler_fn(move |_: &Delivery<'_>, event: &Event| {
            *slot.lock().unwrap() = Some(event.clone());
            Ok(())
        }),
    )
    .unwrap();

    let published = Event::with_string_payload("test-456", "test.event", "{}")
        .with_source("test/source")
        .with_metadata("trace_id", "trace-abc-123");
    bus.publish(&Context::new(), "test.subject", &published)
        .unwrap();

    assert_eq!(seen.lock().unwrap().as_ref(), Some(&published));
}

#[test]
fn cancellation_is_left_to_handlers() {
    let bus = MemoryBus::new();
    let recorder = Recorder::new();
    let processed = recorder.handler("processed");
    bus.subscribe(
        "cancel.test",
        handler_fn(move |delivery: &Delivery<'_>, event: &Event| {
            if delivery.is_cancelled() {
                return Err(HandlerError::Cancelled);
            }
            processed.handle(delivery, event)
        }),
    )
    .unwrap();

    let ctx = Context::new();
    bus.publish(&ctx, "cancel.test", &event("before")).unwrap();
    ctx.cancel();
    bus.publish(&ctx, "cancel.test", &event("after")).unwrap();

    assert_eq!(recorder.count("processed"), 1);
    assert_eq!(bus.stats().failed, 1);
}
