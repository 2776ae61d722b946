//! The event payload carried by the bus.

use serde::{Deserialize, Serialize};

/// An event delivered by subject.
///
/// The bus never inspects an event: it is routed purely by the subject it
/// is published on. The fields here are what handlers and typed wrappers
/// agree on.
///
/// In JSON form the payload travels as a base64 string under
/// `data_base64`, so binary payloads survive a round trip through any
/// text transport.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Event {
    /// Unique identifier for this event
    pub id: String,
    /// Event type (e.g., "user.registered", "order.created")
    #[serde(rename = "type")]
    pub event_type: String,
    /// Producer of the event (e.g., "myapp/order-service")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    /// Serialized payload (typically JSON or binary)
    #[serde(rename = "data_base64", with = "data_base64")]
    pub payload: Vec<u8>,
    /// Optional metadata (trace IDs, extensions, etc.)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Vec<(String, String)>>,
}

impl Event {
    /// Create a new event with the given type and payload.
    pub fn new(id: impl Into<String>, event_type: impl Into<String>, payload: Vec<u8>) -> Self {
        Self {
            id: id.into(),
            event_type: event_type.into(),
            source: None,
            payload,
            metadata: None,
        }
    }

    /// Create an event with a string payload.
    pub fn with_string_payload(
        id: impl Into<String>,
        event_type: impl Into<String>,
        payload: impl Into<String>,
    ) -> Self {
        Self::new(id, event_type, payload.into().into_bytes())
    }

    /// Create an event with a JSON-serialized payload.
    pub fn json<T: Serialize>(
        id: impl Into<String>,
        event_type: impl Into<String>,
        payload: &T,
    ) -> Result<Self, serde_json::Error> {
        let bytes = serde_json::to_vec(payload)?;
        Ok(Self::new(id, event_type, bytes))
    }

    /// Decode the payload from JSON.
    pub fn decode_json<T: serde::de::DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_slice(&self.payload)
    }

    /// Create an event with bitcode-serialized payload.
    #[cfg(feature = "bitcode")]
    pub fn encode<T: Serialize>(
        id: impl Into<String>,
        event_type: impl Into<String>,
        payload: &T,
    ) -> Result<Self, bitcode::Error> {
        let bytes = bitcode::serialize(payload)?;
        Ok(Self::new(id, event_type, bytes))
    }

    /// Decode the payload from bitcode binary format.
    #[cfg(feature = "bitcode")]
    pub fn decode<T: serde::de::DeserializeOwned>(&self) -> Result<T, bitcode::Error> {
        bitcode::deserialize(&self.payload)
    }

    /// Set the producer of the event.
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Add metadata to the event.
    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.metadata
            .get_or_insert_with(Vec::new)
            .push((key.into(), value.into()));
        self
    }

    /// Look up the first metadata value stored under `key`.
    pub fn metadata_value(&self, key: &str) -> Option<&str> {
        self.metadata
            .as_ref()?
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Get the payload as a string (if valid UTF-8).
    pub fn payload_str(&self) -> Option<&str> {
        std::str::from_utf8(&self.payload).ok()
    }
}

mod data_base64 {
    use base64::engine::general_purpose::STANDARD;
    use base64::Engine;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&STANDARD.encode(bytes))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
        let encoded = String::deserialize(deserializer)?;
        STANDARD
            .decode(encoded.as_bytes())
            .map_err(serde::de::Error::custom)
    }
}
