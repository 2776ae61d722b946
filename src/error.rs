//! Error types for bus operations.

use std::error::Error;
use std::fmt;

use crate::handler::HandlerError;

/// Error type for `EventBus` operations.
///
/// Validation errors are reported before any side effect: a rejected
/// `subscribe` registers nothing and a rejected `publish` dispatches
/// nothing.
#[derive(Debug)]
pub enum BusError {
    /// The subject (or subscription pattern) was empty.
    SubjectRequired,
    /// A handler group subscription was made with an empty group name.
    GroupRequired,
    /// A handler failed under `DispatchPolicy::FailFast`.
    Handler {
        subject: String,
        source: HandlerError,
    },
}

impl fmt::Display for BusError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BusError::SubjectRequired => write!(f, "subject is required"),
            BusError::GroupRequired => write!(f, "group is required"),
            BusError::Handler { subject, source } => {
                write!(f, "handler failed on {}: {}", subject, source)
            }
        }
    }
}

impl Error for BusError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            BusError::Handler { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl BusError {
    /// Whether this error was raised by input validation.
    pub fn is_validation(&self) -> bool {
        matches!(self, BusError::SubjectRequired | BusError::GroupRequired)
    }
}

/// Reject empty subjects.
pub(crate) fn require_subject(subject: &str) -> Result<(), BusError> {
    if subject.is_empty() {
        return Err(BusError::SubjectRequired);
    }
    Ok(())
}

/// Reject empty group names.
pub(crate) fn require_group(group: &str) -> Result<(), BusError> {
    if group.is_empty() {
        return Err(BusError::GroupRequired);
    }
    Ok(())
}
