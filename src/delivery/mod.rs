//! Delivery of captures to the ingestion backend.
//!
//! Delivery sits outside the core: it can fail, and when it does the
//! failure is reported, logged, and dropped. There are no retries.

mod client;
mod payload;

pub use client::IngestClient;
pub use payload::{
    ConversationPayload, Heuristics, ProductPayload, Sender, CONVERSATION_BRAND_PLACEHOLDER,
    CONVERSATION_USER_PLACEHOLDER, PRODUCT_BRAND_PLACEHOLDER, PRODUCT_USER_PLACEHOLDER,
};
