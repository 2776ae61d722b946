//! Event handlers.
//!
//! A handler is anything implementing `EventHandler`. Plain closures
//! qualify through a blanket impl, so most callers write:
//!
//! ```
//! use subject_bus::{handler_fn, Delivery, Event, HandlerError};
//!
//! let handler = handler_fn(|delivery: &Delivery<'_>, event: &Event| {
//!     if delivery.is_cancelled() {
//!         return Err(HandlerError::Cancelled);
//!     }
//!     println!("{} on {}", event.id, delivery.subject());
//!     Ok(())
//! });
//! # let _ = handler;
//! ```

use std::error::Error;
use std::fmt;
use std::sync::Arc;

use crate::context::Delivery;
use crate::event::Event;

/// A subscriber callback.
///
/// Handlers run inline on the publisher's thread and must not block
/// indefinitely.
pub trait EventHandler: Send + Sync {
    /// Handle one delivered event.
    fn handle(&self, delivery: &Delivery<'_>, event: &Event) -> Result<(), HandlerError>;
}

impl<F> EventHandler for F
where
    F: Fn(&Delivery<'_>, &Event) -> Result<(), HandlerError> + Send + Sync,
{
    fn handle(&self, delivery: &Delivery<'_>, event: &Event) -> Result<(), HandlerError> {
        self(delivery, event)
    }
}

/// Shared handle to a registered handler.
///
/// The bus keeps one clone per registration; the caller may keep others.
pub type Handler = Arc<dyn EventHandler>;

/// Wrap a closure as a `Handler`.
pub fn handler_fn<F>(f: F) -> Handler
where
    F: Fn(&Delivery<'_>, &Event) -> Result<(), HandlerError> + Send + Sync + 'static,
{
    Arc::new(f)
}

/// Error type returned by handlers.
#[derive(Debug)]
pub enum HandlerError {
    /// Payload decode / deserialization failed.
    DecodeFailed(String),
    /// The handler refused the event (validation, invariant violation).
    Rejected(String),
    /// The handler observed a cancelled context and stopped.
    Cancelled,
    /// Other error.
    Other(Box<dyn Error + Send + Sync>),
}

impl HandlerError {
    /// Box an arbitrary error as `HandlerError::Other`.
    pub fn other<E>(err: E) -> Self
    where
        E: Into<Box<dyn Error + Send + Sync>>,
    {
        HandlerError::Other(err.into())
    }
}

impl fmt::Display for HandlerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HandlerError::DecodeFailed(msg) => write!(f, "decode failed: {}", msg),
            HandlerError::Rejected(msg) => write!(f, "rejected: {}", msg),
            HandlerError::Cancelled => write!(f, "cancelled"),
            HandlerError::Other(e) => write!(f, "handler error: {}", e),
        }
    }
}

impl Error for HandlerError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            HandlerError::Other(e) => Some(e.as_ref()),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for HandlerError {
    fn from(err: serde_json::Error) -> Self {
        HandlerError::DecodeFailed(err.to_string())
    }
}

#[cfg(feature = "bitcode")]
impl From<bitcode::Error> for HandlerError {
    fn from(err: bitcode::Error) -> Self {
        HandlerError::DecodeFailed(err.to_string())
    }
}
