//! Concrete implementations of the trait abstractions in `crate::traits`.
//!
//! - [`ReqwestHttpClient`] - HTTP client using reqwest
//! - [`FileSettingsStore`] - settings in a JSON file
//! - [`MemorySettingsStore`] - settings in memory
//!
//! The [`mock`] submodule provides the HTTP test double.

pub mod file_settings;
pub mod memory_settings;
pub mod mock;
pub mod reqwest_http;

pub use file_settings::FileSettingsStore;
pub use memory_settings::MemorySettingsStore;
pub use mock::MockHttpClient;
pub use reqwest_http::ReqwestHttpClient;
