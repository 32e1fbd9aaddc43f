//! Harvest - decode captured assistant response streams into structured records.
//!
//! The core is total and synchronous: [`sse::tokenize`] turns a fully drained
//! stream body into events, a [`projector::Projector`] folds them into a
//! record, and [`extract::extract_approx`] offers a pattern-based fallback.
//! [`endpoint::capture`] ties those together by URL. Delivery to the
//! ingestion backend lives in [`delivery`] and is the only fallible part.

pub mod adapters;
pub mod cli;
pub mod config;
pub mod delivery;
pub mod endpoint;
pub mod error;
pub mod extract;
pub mod json;
pub mod logging;
pub mod models;
pub mod projector;
pub mod sse;
pub mod traits;

pub use endpoint::{capture, Capture, Endpoint};
pub use projector::{ConversationProjector, ProductProjector, Projector};
pub use sse::{tokenize, StreamEvent};
