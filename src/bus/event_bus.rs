//! The transport contract shared by every bus implementation.

use crate::context::Context;
use crate::error::BusError;
use crate::event::Event;
use crate::handler::Handler;

/// Publish/subscribe over subjects.
///
/// `MemoryBus` implements this in-process; broker-backed transports
/// implement the same four operations so callers can swap one for the
/// other without code changes. Callers typically hold a `&dyn EventBus`
/// or `Arc<dyn EventBus>`.
///
/// Null events and handlers are unrepresentable here (`&Event`, and
/// `Handler` is an `Arc`), so the only validation failures are empty
/// subjects and empty group names.
pub trait EventBus: Send + Sync {
    /// Deliver `event` to every subscription matching `subject`.
    ///
    /// Fails with `BusError::SubjectRequired` on an empty subject.
    /// Publishing to a subject nobody listens on is not an error.
    fn publish(&self, ctx: &Context, subject: &str, event: &Event) -> Result<(), BusError>;

    /// Register a broadcast handler: it receives every event matching
    /// `subject`.
    fn subscribe(&self, subject: &str, handler: Handler) -> Result<(), BusError>;

    /// Register a handler in a named group: each matching event is
    /// delivered to one handler of the group.
    fn subscribe_with_handler_group(
        &self,
        subject: &str,
        group: &str,
        handler: Handler,
    ) -> Result<(), BusError>;

    /// Drop every subscription.
    fn close(&self) -> Result<(), BusError>;
}
