//! Tokenizer properties over full streams.

mod common;

use common::*;
use harvest::projector::{ConversationProjector, ProductProjector, Projector};
use harvest::{tokenize, StreamEvent};
use serde_json::json;

#[test]
fn test_tokenize_is_deterministic() {
    let raw = conversation_fixture();
    assert_eq!(tokenize(&raw), tokenize(&raw));
}

#[test]
fn test_reserialized_stream_tokenizes_identically() {
    let events = tokenize(&conversation_fixture());
    let rebuilt = events
        .iter()
        .map(StreamEvent::to_sse_block)
        .collect::<Vec<_>>()
        .join("\n\n");
    assert_eq!(tokenize(&rebuilt), events);
}

#[test]
fn test_malformed_blocks_are_tolerated() {
    let raw = concat!(
        "event: delta\n",
        "data: {\"v\": \"ok\"}\n\n",
        "data: {truncated\n\n",
        ": comment line\n",
        "id: 7\n\n",
        "\n\n\n",
        "data: [DONE]\n",
    );
    let events = tokenize(raw);
    assert_eq!(events.len(), 3);
    assert!(events[0].is_delta());
    assert_eq!(events[0].json(), Some(&json!({"v": "ok"})));
    assert_eq!(events[1].json(), None);
    assert_eq!(events[2].json(), None);
}

#[test]
fn test_crlf_stream_matches_lf_stream() {
    let raw = conversation_fixture();
    let crlf = raw.replace('\n', "\r\n");
    assert_eq!(tokenize(&crlf), tokenize(&raw));
}

#[tokio::test]
async fn test_concurrent_projections_are_independent() {
    let conversation = conversation_fixture();
    let product = product_fixture();

    let tasks = (0..8).map(|i| {
        let raw = if i % 2 == 0 {
            conversation.clone()
        } else {
            product.clone()
        };
        tokio::spawn(async move {
            let events = tokenize(&raw);
            if i % 2 == 0 {
                serde_json::to_value(ConversationProjector::new().project(&events)).unwrap()
            } else {
                serde_json::to_value(ProductProjector::new().project(&events)).unwrap()
            }
        })
    });

    let results: Vec<_> = futures::future::join_all(tasks)
        .await
        .into_iter()
        .map(|r| r.unwrap())
        .collect();

    for pair in results.chunks(2) {
        assert_eq!(pair[0], results[0]);
        assert_eq!(pair[1], results[1]);
    }
    assert_eq!(results[0]["conversation_id"], "conv-42");
    assert_eq!(results[1]["reviewSummary"], "Loved");
}
