//! In-process event bus.
//!
//! `MemoryBus` keeps every subscription in memory and invokes handlers
//! synchronously on the publishing thread. It is thread-safe and cheap to
//! clone; clones share the same subscriptions.
//!
//! ## Delivery
//!
//! For each publish, every broadcast handler whose pattern matches the
//! subject runs, in registration order. Then every handler group under a
//! matching pattern delivers the event to exactly one of its handlers,
//! rotating round-robin across publishes.
//!
//! ## Locking
//!
//! Registrations and `close` take the write lock. A publish takes the read
//! lock only long enough to build its dispatch plan (and advance group
//! cursors), then runs handlers with no lock held, so a handler may
//! publish or subscribe on the same bus.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use tracing::{debug, trace, warn};

use super::config::{BusConfig, DispatchPolicy};
use super::event_bus::EventBus;
use super::registry::Registry;
use crate::context::{Context, Delivery};
use crate::error::{require_group, require_subject, BusError};
use crate::event::Event;
use crate::handler::Handler;

/// Delivery counters for a `MemoryBus`.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct BusStats {
    /// Number of accepted publish calls.
    pub published: u64,
    /// Number of handler invocations that succeeded.
    pub delivered: u64,
    /// Number of handler invocations that failed.
    pub failed: u64,
}

#[derive(Default)]
struct Counters {
    published: AtomicU64,
    delivered: AtomicU64,
    failed: AtomicU64,
}

/// In-memory event bus.
///
/// ## Example
///
/// ```
/// use std::sync::{Arc, Mutex};
/// use subject_bus::{handler_fn, Context, Delivery, Event, EventBus, MemoryBus};
///
/// let bus = MemoryBus::new();
/// let seen = Arc::new(Mutex::new(Vec::new()));
///
/// let log = Arc::clone(&seen);
/// bus.subscribe(
///     "app.*.created",
///     handler_fn(move |delivery: &Delivery<'_>, _event: &Event| {
///         log.lock().unwrap().push(delivery.subject().to_string());
///         Ok(())
///     }),
/// )
/// .unwrap();
///
/// let event = Event::with_string_payload("evt-1", "user.created", "{}");
/// bus.publish(&Context::new(), "app.user.created", &event).unwrap();
/// bus.publish(&Context::new(), "app.user.updated", &event).unwrap();
///
/// assert_eq!(*seen.lock().unwrap(), vec!["app.user.created"]);
/// ```
#[derive(Clone, Default)]
pub struct MemoryBus {
    registry: Arc<RwLock<Registry>>,
    counters: Arc<Counters>,
    config: BusConfig,
}

impl MemoryBus {
    /// Create an empty bus with the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty bus with the given configuration.
    pub fn with_config(config: BusConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// The bus configuration.
    pub fn config(&self) -> &BusConfig {
        &self.config
    }

    /// Snapshot of the delivery counters. `close` does not reset them.
    pub fn stats(&self) -> BusStats {
        BusStats {
            published: self.counters.published.load(Ordering::Relaxed),
            delivered: self.counters.delivered.load(Ordering::Relaxed),
            failed: self.counters.failed.load(Ordering::Relaxed),
        }
    }

    /// Number of registered handlers, broadcast and grouped.
    pub fn subscription_count(&self) -> usize {
        self.read().handler_count()
    }

    /// Distinct registered patterns.
    pub fn patterns(&self) -> Vec<String> {
        self.read().patterns()
    }

    // Registry mutations are single pushes, so a poisoned lock still
    // guards consistent state.
    fn read(&self) -> RwLockReadGuard<'_, Registry> {
        self.registry.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Registry> {
        self.registry.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl EventBus for MemoryBus {
    fn publish(&self, ctx: &Context, subject: &str, event: &Event) -> Result<(), BusError> {
        require_subject(subject)?;

        let plan = self.read().plan(subject);
        self.counters.published.fetch_add(1, Ordering::Relaxed);

        trace!(
            subject = %subject,
            event_id = %event.id,
            handlers = plan.len(),
            "Publishing event"
        );

        for dispatch in &plan {
            let delivery = Delivery::new(ctx, subject, &dispatch.pattern, dispatch.group.as_deref());

            match dispatch.handler.handle(&delivery, event) {
                Ok(()) => {
                    self.counters.delivered.fetch_add(1, Ordering::Relaxed);
                }
                Err(err) => {
                    self.counters.failed.fetch_add(1, Ordering::Relaxed);
                    match self.config.dispatch {
                        DispatchPolicy::Isolate => {
                            warn!(
                                subject = %subject,
                                pattern = %dispatch.pattern,
                                group = ?dispatch.group,
                                event_id = %event.id,
                                error = %err,
                                "Event handler failed"
                            );
                        }
                        DispatchPolicy::FailFast => {
                            return Err(BusError::Handler {
                                subject: subject.to_string(),
                                source: err,
                            });
                        }
                    }
                }
            }
        }

        Ok(())
    }

    fn subscribe(&self, subject: &str, handler: Handler) -> Result<(), BusError> {
        require_subject(subject)?;

        self.write().subscribe(subject, handler);
        debug!(pattern = %subject, "Subscribed");
        Ok(())
    }

    fn subscribe_with_handler_group(
        &self,
        subject: &str,
        group: &str,
        handler: Handler,
    ) -> Result<(), BusError> {
        require_subject(subject)?;
        require_group(group)?;

        self.write().subscribe_group(subject, group, handler);
        debug!(pattern = %subject, group = %group, "Subscribed to handler group");
        Ok(())
    }

    fn close(&self) -> Result<(), BusError> {
        *self.write() = Registry::default();
        debug!("Event bus closed, subscriptions cleared");
        Ok(())
    }
}
