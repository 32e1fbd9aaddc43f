//! Trait abstractions for dependency injection and testability.
//!
//! - [`HttpClient`] - buffered GET/POST
//! - [`SettingsStore`] - small string settings used by delivery

pub mod http;
pub mod settings;

pub use http::{json_headers, Headers, HttpClient, HttpError, Response};
pub use settings::{SettingsStore, KEY_BRAND_NAME, KEY_CLIENT_IP, KEY_USER_NAME};
