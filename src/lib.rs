//! subject_bus — publish/subscribe over dot-delimited subjects.
//!
//! The `EventBus` trait is the transport contract: publish an `Event` on a
//! subject, subscribe handlers to subject patterns either in broadcast mode
//! (every handler sees every event) or in a named handler group (each
//! event goes to one handler of the group, round-robin), and close.
//!
//! `MemoryBus` implements it in-process, with NATS-style wildcards
//! (`app.*.created`, `app.>`). `TypedSubject` layers typed JSON payloads on
//! top of any `EventBus`.
//!
//! ```
//! use std::sync::Arc;
//! use std::sync::atomic::{AtomicUsize, Ordering};
//! use subject_bus::{handler_fn, Context, Delivery, Event, EventBus, MemoryBus};
//!
//! let bus = MemoryBus::new();
//! let handled = Arc::new(AtomicUsize::new(0));
//!
//! for _ in 0..2 {
//!     let handled = Arc::clone(&handled);
//!     bus.subscribe_with_handler_group(
//!         "jobs.*",
//!         "workers",
//!         handler_fn(move |_: &Delivery<'_>, _: &Event| {
//!             handled.fetch_add(1, Ordering::SeqCst);
//!             Ok(())
//!         }),
//!     )
//!     .unwrap();
//! }
//!
//! let job = Event::with_string_payload("job-1", "job.queued", "{}");
//! bus.publish(&Context::new(), "jobs.resize", &job).unwrap();
//!
//! // One worker of the group handled it.
//! assert_eq!(handled.load(Ordering::SeqCst), 1);
//! ```

pub mod bus;
mod context;
mod error;
mod event;
mod handler;
pub mod subject;
mod typed;

pub use bus::{BusConfig, BusStats, DispatchPolicy, EventBus, MemoryBus};
pub use context::{Context, Delivery};
pub use error::BusError;
pub use event::Event;
pub use handler::{handler_fn, EventHandler, Handler, HandlerError};
pub use subject::SubjectPattern;
pub use typed::{TypedError, TypedSubject};
