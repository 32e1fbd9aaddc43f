//! SSE (Server-Sent Events) stream decoding
//!
//! Turns a fully drained response body into an ordered sequence of
//! [`StreamEvent`]s. The format consists of:
//! - `event: <name>` - event label line
//! - `data: <payload>` - payload line, JSON-decoded when possible
//! - One or more blank lines - separate event blocks
//!
//! Anything else inside a block is ignored.

mod events;
pub mod parser;
pub mod patch;

pub use events::{EventData, StreamEvent};
pub use parser::{parse_sse_line, tokenize, SseLine};
pub use patch::{patch_list, PatchKind, PatchOp};
