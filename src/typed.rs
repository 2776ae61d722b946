//! Typed publish/subscribe wrappers.
//!
//! A `TypedSubject<T>` ties a subject to a payload type so call sites
//! publish and receive `T` instead of raw bytes. Payloads travel as JSON.
//!
//! ```
//! use serde::{Deserialize, Serialize};
//! use subject_bus::{Context, MemoryBus, TypedSubject};
//!
//! #[derive(Serialize, Deserialize)]
//! struct UserRegistered {
//!     user_id: String,
//! }
//!
//! const USER_REGISTERED: TypedSubject<UserRegistered> =
//!     TypedSubject::new("app.user.registered", "user.registered");
//!
//! let bus = MemoryBus::new();
//! USER_REGISTERED
//!     .subscribe(&bus, |_delivery, payload| {
//!         assert_eq!(payload.user_id, "user-123");
//!         Ok(())
//!     })
//!     .unwrap();
//!
//! USER_REGISTERED
//!     .publish(&bus, &Context::new(), &UserRegistered { user_id: "user-123".into() })
//!     .unwrap();
//! ```

use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;
use uuid::Uuid;

use crate::bus::EventBus;
use crate::context::{Context, Delivery};
use crate::error::BusError;
use crate::event::Event;
use crate::handler::{Handler, HandlerError};

/// Error from a typed publish.
#[derive(Debug)]
pub enum TypedError {
    /// The payload could not be serialized.
    Encode(serde_json::Error),
    /// The bus rejected the publish.
    Bus(BusError),
}

impl fmt::Display for TypedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypedError::Encode(e) => write!(f, "encode failed: {}", e),
            TypedError::Bus(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for TypedError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TypedError::Encode(e) => Some(e),
            TypedError::Bus(e) => Some(e),
        }
    }
}

impl From<BusError> for TypedError {
    fn from(err: BusError) -> Self {
        TypedError::Bus(err)
    }
}

impl From<serde_json::Error> for TypedError {
    fn from(err: serde_json::Error) -> Self {
        TypedError::Encode(err)
    }
}

/// A subject carrying payloads of type `T`.
pub struct TypedSubject<T> {
    subject: &'static str,
    event_type: &'static str,
    source: Option<&'static str>,
    _payload: PhantomData<fn() -> T>,
}

impl<T> TypedSubject<T> {
    /// Declare a typed subject.
    pub const fn new(subject: &'static str, event_type: &'static str) -> Self {
        Self {
            subject,
            event_type,
            source: None,
            _payload: PhantomData,
        }
    }

    /// Stamp published events with a producer name.
    pub const fn with_source(mut self, source: &'static str) -> Self {
        self.source = Some(source);
        self
    }

    /// The subject events are published on.
    pub fn subject(&self) -> &'static str {
        self.subject
    }

    /// The event type stamped on published events.
    pub fn event_type(&self) -> &'static str {
        self.event_type
    }
}

impl<T> Clone for TypedSubject<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for TypedSubject<T> {}

impl<T> fmt::Debug for TypedSubject<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypedSubject")
            .field("subject", &self.subject)
            .field("event_type", &self.event_type)
            .field("source", &self.source)
            .finish()
    }
}

impl<T> TypedSubject<T>
where
    T: Serialize + DeserializeOwned + 'static,
{
    /// Build the event that `publish` would send for `payload`.
    pub fn event(&self, payload: &T) -> Result<Event, serde_json::Error> {
        let event = Event::json(Uuid::new_v4().to_string(), self.event_type, payload)?;
        Ok(match self.source {
            Some(source) => event.with_source(source),
            None => event,
        })
    }

    /// Serialize `payload` and publish it on this subject.
    pub fn publish<B>(&self, bus: &B, ctx: &Context, payload: &T) -> Result<(), TypedError>
    where
        B: EventBus + ?Sized,
    {
        let event = self.event(payload)?;
        bus.publish(ctx, self.subject, &event)?;
        Ok(())
    }

    /// Subscribe in broadcast mode.
    pub fn subscribe<B, F>(&self, bus: &B, f: F) -> Result<(), BusError>
    where
        B: EventBus + ?Sized,
        F: Fn(&Delivery<'_>, T) -> Result<(), HandlerError> + Send + Sync + 'static,
    {
        bus.subscribe(self.subject, decoding(f))
    }

    /// Subscribe as a member of handler group `group`.
    pub fn subscribe_group<B, F>(&self, bus: &B, group: &str, f: F) -> Result<(), BusError>
    where
        B: EventBus + ?Sized,
        F: Fn(&Delivery<'_>, T) -> Result<(), HandlerError> + Send + Sync + 'static,
    {
        bus.subscribe_with_handler_group(self.subject, group, decoding(f))
    }
}

/// Wrap a typed callback in a handler that decodes the JSON payload first.
fn decoding<T, F>(f: F) -> Handler
where
    T: DeserializeOwned + 'static,
    F: Fn(&Delivery<'_>, T) -> Result<(), HandlerError> + Send + Sync + 'static,
{
    Arc::new(move |delivery: &Delivery<'_>, event: &Event| -> Result<(), HandlerError> {
        let payload: T = event.decode_json()?;
        f(delivery, payload)
    })
}
