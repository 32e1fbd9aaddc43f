//! Result type alias for fallible boundary operations.

use super::harvest_error::HarvestError;

/// Type alias for Results using [`HarvestError`].
pub type HarvestResult<T> = Result<T, HarvestError>;
