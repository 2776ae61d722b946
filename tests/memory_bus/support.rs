//! Shared fixtures: recording handlers and a sample event.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use subject_bus::{handler_fn, Delivery, Event, Handler, HandlerError};

/// A shared log of (handler name, event id) pairs, in invocation order.
#[derive(Clone, Default)]
pub struct Recorder {
    calls: Arc<Mutex<Vec<(String, String)>>>,
}

impl Recorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// A handler that records its name and the event id, then succeeds.
    pub fn handler(&self, name: &str) -> Handler {
        let calls = Arc::clone(&self.calls);
        let name = name.to_string();
        handler_fn(move |_: &Delivery<'_>, event: &Event| {
            calls.lock().unwrap().push((name.clone(), event.id.clone()));
            Ok(())
        })
    }

    /// A handler that records its name and then fails.
    pub fn failing(&self, name: &str) -> Handler {
        let calls = Arc::clone(&self.calls);
        let name = name.to_string();
        handler_fn(move |_: &Delivery<'_>, event: &Event| {
            calls.lock().unwrap().push((name.clone(), event.id.clone()));
            Err(HandlerError::Rejected(format!("{} always fails", name)))
        })
    }

    /// Handler names in invocation order.
    pub fn names(&self) -> Vec<String> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .map(|(name, _)| name.clone())
            .collect()
    }

    /// Number of invocations of `name`.
    pub fn count(&self, name: &str) -> usize {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|(n, _)| n == name)
            .count()
    }

    pub fn len(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub fn clear(&self) {
        self.calls.lock().unwrap().clear();
    }
}

/// A handler that only bumps a counter.
pub fn counting(hits: &Arc<AtomicUsize>) -> Handler {
    let hits = Arc::clone(hits);
    handler_fn(move |_: &Delivery<'_>, _: &Event| {
        hits.fetch_add(1, Ordering::SeqCst);
        Ok(())
    })
}

pub fn event(id: &str) -> Event {
    Event::with_string_payload(id, "test.event", r#"{"key":"value"}"#)
}
