//! Delivery context passed from publishers to handlers.
//!
//! A `Context` is supplied by the caller of `publish` and carries request
//! scoped values (trace IDs, tenant, etc.) plus a cancellation flag. The
//! bus hands it to every handler it invokes, wrapped in a `Delivery` that
//! also says which subscription matched.
//!
//! The bus never inspects cancellation itself: a handler that cares checks
//! `delivery.is_cancelled()` and returns early.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Caller-supplied context for a publish.
///
/// Clones share the same cancellation flag, so cancelling any clone
/// cancels them all.
#[derive(Debug, Clone, Default)]
pub struct Context {
    values: HashMap<String, String>,
    cancelled: Arc<AtomicBool>,
}

impl Context {
    /// Create an empty, uncancelled context.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a context from a map of values.
    pub fn from_map(values: HashMap<String, String>) -> Self {
        Self {
            values,
            cancelled: Arc::default(),
        }
    }

    /// Add a value, builder style.
    pub fn with_value(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(key, value);
        self
    }

    /// Set a value.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.values.insert(key.into(), value.into());
    }

    /// Get a value by key.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(|v| v.as_str())
    }

    /// Get all values.
    pub fn values(&self) -> &HashMap<String, String> {
        &self.values
    }

    /// Mark this context (and every clone of it) as cancelled.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Release);
    }

    /// Whether `cancel` has been called on this context or a clone.
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Acquire)
    }
}

/// What a handler receives alongside the event.
#[derive(Debug, Clone, Copy)]
pub struct Delivery<'a> {
    context: &'a Context,
    subject: &'a str,
    pattern: &'a str,
    group: Option<&'a str>,
}

impl<'a> Delivery<'a> {
    pub(crate) fn new(
        context: &'a Context,
        subject: &'a str,
        pattern: &'a str,
        group: Option<&'a str>,
    ) -> Self {
        Self {
            context,
            subject,
            pattern,
            group,
        }
    }

    /// The publisher's context.
    pub fn context(&self) -> &'a Context {
        self.context
    }

    /// The subject the event was published on.
    pub fn subject(&self) -> &'a str {
        self.subject
    }

    /// The subscription pattern that matched.
    pub fn pattern(&self) -> &'a str {
        self.pattern
    }

    /// The handler group, for group deliveries.
    pub fn group(&self) -> Option<&'a str> {
        self.group
    }

    /// Shorthand for `self.context().is_cancelled()`.
    pub fn is_cancelled(&self) -> bool {
        self.context.is_cancelled()
    }
}
