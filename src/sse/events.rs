//! Decoded stream event types
//!
//! A [`StreamEvent`] is one event block from the raw stream: an optional
//! label plus a payload that is either decoded JSON or the raw line text.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Payload of a `data:` line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EventData {
    /// Payload that decoded as JSON
    Json(Value),
    /// Payload kept verbatim because it was not valid JSON
    Text(String),
}

impl EventData {
    /// Decode a raw `data:` value, falling back to the raw text.
    pub fn decode(raw: &str) -> Self {
        match serde_json::from_str::<Value>(raw) {
            Ok(value) => EventData::Json(value),
            Err(_) => EventData::Text(raw.to_string()),
        }
    }

    /// The decoded JSON value, if the payload was valid JSON.
    pub fn as_json(&self) -> Option<&Value> {
        match self {
            EventData::Json(value) => Some(value),
            EventData::Text(_) => None,
        }
    }

    /// Render the payload back into its line form.
    pub fn to_line_value(&self) -> String {
        match self {
            EventData::Json(value) => value.to_string(),
            EventData::Text(text) => text.clone(),
        }
    }
}

/// One event block decoded from the stream.
///
/// Events are immutable once produced and keep their arrival order
/// inside the sequence returned by [`crate::sse::tokenize`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StreamEvent {
    /// Value of the `event:` line, if the block had one
    #[serde(rename = "event", default, skip_serializing_if = "Option::is_none")]
    pub event_name: Option<String>,
    /// Value of the last `data:` line, if the block had one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<EventData>,
}

impl StreamEvent {
    /// Create an event with a label and a JSON payload.
    pub fn new(event_name: impl Into<String>, data: Value) -> Self {
        Self {
            event_name: Some(event_name.into()),
            data: Some(EventData::Json(data)),
        }
    }

    /// Create an unlabelled event with a JSON payload.
    pub fn data_only(data: Value) -> Self {
        Self {
            event_name: None,
            data: Some(EventData::Json(data)),
        }
    }

    /// True when the block carried neither a label nor a payload.
    pub fn is_empty(&self) -> bool {
        self.event_name.is_none() && self.data.is_none()
    }

    /// Check the event label.
    pub fn is_named(&self, name: &str) -> bool {
        self.event_name.as_deref() == Some(name)
    }

    /// True for events labelled `delta`, the channel carrying patch traffic.
    pub fn is_delta(&self) -> bool {
        self.is_named("delta")
    }

    /// The payload as JSON, if it decoded.
    pub fn json(&self) -> Option<&Value> {
        self.data.as_ref().and_then(EventData::as_json)
    }

    /// Re-serialize the event into its SSE block form (without the
    /// trailing blank line).
    pub fn to_sse_block(&self) -> String {
        let mut lines = Vec::with_capacity(2);
        if let Some(name) = &self.event_name {
            lines.push(format!("event: {}", name));
        }
        if let Some(data) = &self.data {
            lines.push(format!("data: {}", data.to_line_value()));
        }
        lines.join("\n")
    }
}
