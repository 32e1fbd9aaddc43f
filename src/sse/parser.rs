//! SSE tokenizer
//!
//! Stateless: the whole drained body goes in, the ordered event sequence
//! comes out. Malformed blocks never fail the call.

use crate::sse::events::{EventData, StreamEvent};

/// Represents a parsed line inside an event block
#[derive(Debug, Clone, PartialEq)]
pub enum SseLine {
    /// Event label (e.g. "event: delta")
    Event(String),
    /// Data payload (e.g. "data: {\"v\": \"hello\"}")
    Data(String),
    /// Any other line; ignored by the tokenizer
    Other,
}

/// Parse a single line of an event block.
///
/// Only lines that start with `event:` or `data:` are recognized. Leading
/// whitespace after the colon is dropped; the rest of the line is kept
/// verbatim.
pub fn parse_sse_line(line: &str) -> SseLine {
    if let Some(rest) = line.strip_prefix("event:") {
        return SseLine::Event(rest.trim_start().to_string());
    }

    if let Some(rest) = line.strip_prefix("data:") {
        return SseLine::Data(rest.trim_start().to_string());
    }

    SseLine::Other
}

/// Split raw stream text into event blocks.
///
/// Blocks are separated by one or more blank lines. CRLF line endings are
/// normalized first.
fn split_blocks(raw: &str) -> Vec<String> {
    let normalized = raw.replace("\r\n", "\n");
    let mut blocks = Vec::new();
    let mut current: Vec<&str> = Vec::new();

    for line in normalized.trim().split('\n') {
        if line.is_empty() {
            if !current.is_empty() {
                blocks.push(current.join("\n"));
                current.clear();
            }
            continue;
        }
        current.push(line);
    }

    if !current.is_empty() {
        blocks.push(current.join("\n"));
    }

    blocks
}

/// Decode one event block. Returns `None` when no line in the block matched.
fn parse_block(block: &str) -> Option<StreamEvent> {
    let mut event = StreamEvent::default();

    for line in block.trim().split('\n') {
        match parse_sse_line(line) {
            SseLine::Event(name) => event.event_name = Some(name),
            // A later data line replaces an earlier one within the same block
            SseLine::Data(raw) => event.data = Some(EventData::decode(&raw)),
            SseLine::Other => {}
        }
    }

    if event.is_empty() {
        None
    } else {
        Some(event)
    }
}

/// Tokenize a fully drained SSE body into its ordered event sequence.
///
/// Blocks without any `event:` or `data:` line are dropped. Calling this
/// twice with the same input yields identical sequences.
pub fn tokenize(raw: &str) -> Vec<StreamEvent> {
    let blocks = split_blocks(raw);
    let events: Vec<StreamEvent> = blocks.iter().filter_map(|b| parse_block(b)).collect();

    tracing::debug!(
        blocks = blocks.len(),
        events = events.len(),
        "tokenized stream"
    );

    events
}
