//! Mock implementations for testing.
//!
//! - [`MockHttpClient`] - HTTP client with configurable responses
//!
//! For settings, [`MemorySettingsStore`](crate::adapters::MemorySettingsStore)
//! already serves as the test double.

pub mod http;

pub use http::{MockHttpClient, MockResponse, RecordedRequest};
