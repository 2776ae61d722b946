//! Bus configuration.

use serde::{Deserialize, Serialize};

/// What `publish` does when a handler fails.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DispatchPolicy {
    /// Log the failure, keep delivering to the remaining handlers and
    /// return `Ok(())` from `publish`.
    #[default]
    Isolate,
    /// Stop at the first failing handler and return
    /// `BusError::Handler` from `publish`. Handlers after it in the
    /// dispatch order are not invoked for that event.
    FailFast,
}

/// Configuration for `MemoryBus`.
///
/// Deserializable so it can sit inside a service's own config file:
///
/// ```
/// use subject_bus::{BusConfig, DispatchPolicy};
///
/// let config = BusConfig::from_json(r#"{ "dispatch": "fail_fast" }"#).unwrap();
/// assert_eq!(config.dispatch, DispatchPolicy::FailFast);
///
/// // Missing fields fall back to defaults.
/// let config = BusConfig::from_json("{}").unwrap();
/// assert_eq!(config.dispatch, DispatchPolicy::Isolate);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BusConfig {
    /// Handler failure policy.
    pub dispatch: DispatchPolicy,
}

impl BusConfig {
    /// Parse a config from JSON.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Set the dispatch policy.
    pub fn dispatch(mut self, policy: DispatchPolicy) -> Self {
        self.dispatch = policy;
        self
    }
}
