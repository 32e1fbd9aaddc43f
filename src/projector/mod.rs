//! Projectors fold an ordered event sequence into a finished record.
//!
//! Projection is total: malformed or partial payloads contribute nothing
//! and never abort the fold. Each call owns its accumulators, so independent
//! streams can be projected concurrently without sharing state.

mod conversation;
mod product;

use std::collections::HashSet;
use std::hash::Hash;

use crate::sse::StreamEvent;

pub use conversation::ConversationProjector;
pub use product::ProductProjector;

/// Folds decoded stream events into a domain record.
pub trait Projector {
    /// Record produced by this projector
    type Output;

    /// Project the full, ordered event sequence of one stream.
    fn project(&self, events: &[StreamEvent]) -> Self::Output;
}

/// Keep the first item for each key, preserving order.
pub fn dedup_by_key<T, K, F>(items: Vec<T>, mut key: F) -> Vec<T>
where
    K: Eq + Hash,
    F: FnMut(&T) -> K,
{
    let mut seen = HashSet::new();
    items.into_iter().filter(|item| seen.insert(key(item))).collect()
}
