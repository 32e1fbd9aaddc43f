//! Endpoint identity and capture dispatch.
//!
//! Only two streamed endpoints are captured. The URL selects the projector
//! and nothing else; any other URL is ignored.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use serde_json::Value;

use crate::models::{ConversationRecord, ProductRecord};
use crate::projector::{ConversationProjector, ProductProjector, Projector};
use crate::sse::tokenize;

/// Conversation stream endpoint.
pub const CONVERSATION_URL: &str = "https://chatgpt.com/backend-api/f/conversation";

/// Product panel stream endpoint.
pub const PRODUCT_URL: &str = "https://chatgpt.com/backend-api/search/product_info";

/// A captured endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    Conversation,
    Product,
}

impl Endpoint {
    /// Exact-match a request URL against the known endpoints.
    pub fn from_url(url: &str) -> Option<Self> {
        match url {
            CONVERSATION_URL => Some(Endpoint::Conversation),
            PRODUCT_URL => Some(Endpoint::Product),
            _ => None,
        }
    }

    /// Canonical URL of this endpoint.
    pub fn url(&self) -> &'static str {
        match self {
            Endpoint::Conversation => CONVERSATION_URL,
            Endpoint::Product => PRODUCT_URL,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Endpoint::Conversation => "conversation",
            Endpoint::Product => "product",
        }
    }

    /// Tokenize `raw` and run this endpoint's projector over it.
    pub fn project(&self, raw: &str) -> Capture {
        let events = tokenize(raw);
        match self {
            Endpoint::Conversation => {
                let record = ConversationProjector::new().project(&events);
                tracing::info!(
                    conversation_id = %record.conversation_id,
                    response_len = record.assistant_response.len(),
                    "conversation captured"
                );
                Capture::Conversation(record)
            }
            Endpoint::Product => {
                let record = ProductProjector::new().project(&events);
                tracing::info!(
                    product_name = record.product_info.product_name.as_deref().unwrap_or(""),
                    reviews = record.reviews.len(),
                    "product captured"
                );
                Capture::Product {
                    conversation_id: last_segment(self.url()).to_string(),
                    record,
                }
            }
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Endpoint {
    type Err = String;

    /// Accepts a kind name (`conversation`, `product`) or a known URL.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "conversation" => Ok(Endpoint::Conversation),
            "product" => Ok(Endpoint::Product),
            other => Endpoint::from_url(other)
                .ok_or_else(|| format!("unknown endpoint '{}'", other)),
        }
    }
}

/// A projected record together with the identity delivery needs.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Capture {
    Conversation(ConversationRecord),
    Product {
        /// Last path segment of the captured URL
        conversation_id: String,
        record: ProductRecord,
    },
}

impl Capture {
    pub fn endpoint(&self) -> Endpoint {
        match self {
            Capture::Conversation(_) => Endpoint::Conversation,
            Capture::Product { .. } => Endpoint::Product,
        }
    }

    /// The record alone, as JSON.
    pub fn record_json(&self) -> Result<Value, serde_json::Error> {
        match self {
            Capture::Conversation(record) => serde_json::to_value(record),
            Capture::Product { record, .. } => serde_json::to_value(record),
        }
    }
}

/// Capture a fully drained stream body if `url` is a known endpoint.
pub fn capture(url: &str, raw: &str) -> Option<Capture> {
    match Endpoint::from_url(url) {
        Some(endpoint) => Some(endpoint.project(raw)),
        None => {
            tracing::debug!(url, "not a captured endpoint");
            None
        }
    }
}

fn last_segment(url: &str) -> &str {
    url.rsplit('/').next().unwrap_or(url)
}
