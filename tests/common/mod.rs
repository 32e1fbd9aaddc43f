//! Shared fixtures for the integration tests.
//!
//! Streams are built block by block so each test reads like the wire
//! traffic it exercises.

#![allow(dead_code)]

use serde_json::{json, Value};

/// One SSE block, blank-line terminated.
pub fn block(event: Option<&str>, data: &Value) -> String {
    match event {
        Some(name) => format!("event: {}\ndata: {}\n\n", name, data),
        None => format!("data: {}\n\n", data),
    }
}

/// A `delta` block.
pub fn delta(data: Value) -> String {
    block(Some("delta"), &data)
}

/// An unlabeled data block.
pub fn data(data: Value) -> String {
    block(None, &data)
}

/// Join blocks into a stream body.
pub fn stream<I: IntoIterator<Item = String>>(blocks: I) -> String {
    blocks.into_iter().collect()
}

/// An append to the response text path.
pub fn response_append(text: &str) -> String {
    delta(json!({"p": "/message/content/parts/0", "o": "append", "v": text}))
}

/// The user message that opens a conversation turn.
pub fn user_message(text: &str) -> String {
    delta(json!({
        "v": {"message": {"author": {"role": "user"}, "content": {"parts": [text]}}}
    }))
}

/// A product card in the batched encoding.
pub fn product_card(title: &str, price: &str) -> Value {
    json!({
        "title": title,
        "price": price,
        "merchants": "Kettle Mart",
        "rating": 4.5,
        "num_reviews": 120,
        "image_urls": [format!("https://img.example/{}.png", title)],
        "url": format!("https://shop.example/{}", title)
    })
}

/// A realistic conversation turn touching every field.
pub fn conversation_fixture() -> String {
    stream([
        data(json!({"type": "resume_conversation_token", "conversation_id": "conv-42"})),
        user_message("What is the best electric kettle?"),
        delta(json!({
            "v": {"message": {
                "author": {"role": "assistant"},
                "metadata": {
                    "model_slug": "gpt-4o",
                    "request_id": "req-1",
                    "turn_exchange_id": "tx-1",
                    "search_model_queries": {"queries": ["best electric kettle", "kettle reviews"]}
                }
            }}
        })),
        delta(json!({
            "p": "/message/metadata/search_result_groups",
            "o": "append",
            "v": [{
                "type": "search_result_group",
                "domain": "news.example",
                "entries": [
                    {"title": "Kettles tested", "url": "https://news.example/kettles", "snippet": "We boiled", "attribution": "News", "pub_date": 1700000000.0}
                ]
            }]
        })),
        response_append("The "),
        delta(json!({"o": "patch", "v": [
            {"p": "/message/content/parts/0", "o": "append", "v": "Steel Kettle"},
            {"p": "/message/metadata/content_references", "o": "append", "v": [{
                "type": "sources_footnote",
                "sources": [
                    {"title": "Guide", "url": "https://guide.example", "attribution": "Guide"},
                    {"title": "Guide again", "url": "https://guide.example", "attribution": "Guide"}
                ]
            }]}
        ]})),
        delta(json!({"v": [
            {"p": "/message/content/parts/0", "o": "append", "v": ""},
            {"v": {"product": product_card("Steel Kettle", "$40")}},
            {"v": {"product": product_card("Steel Kettle", "$45")}}
        ]})),
        response_append(" wins."),
        data(json!({"type": "title_generation", "title": "Electric kettles"})),
        "data: [DONE]\n\n".to_string(),
    ])
}

/// A product panel stream with one entity, one rationale and a review block.
pub fn product_fixture() -> String {
    stream([
        delta(json!({"v": {"type": "product_entity", "product": {
            "title": "Steel Kettle",
            "merchants": "Kettle Mart",
            "price": "$40",
            "rating": 4.5,
            "num_reviews": 120,
            "url": "https://shop.example/steel",
            "description": "1.7 L"
        }}})),
        delta(json!({"v": {
            "type": "product_rationale",
            "rationale": "Boils fast.",
            "citations": [],
            "grouped_citation": {
                "refs": [{"title": "Review A", "url": "https://a.example", "snippet": "fast", "supporting_websites": []}],
                "supporting_websites": [{"title": "Site B", "url": "https://b.example", "snippet": null, "pub_date": null}]
            }
        }})),
        delta(json!({"v": [
            {"p": "/rationale", "o": "append", "v": " Quiet too. "},
            {"p": "/grouped_citation/title", "o": "replace", "v": "Speed"}
        ]})),
        delta(json!({"v": {"type": "product_reviews", "summary": "Loved", "reviews": [], "cite_map": {}}})),
        delta(json!({"v": [
            {"p": "/summary", "o": "append", "v": " by most"},
            {"p": "/reviews", "o": "append", "v": [
                {"source": "Reddit", "theme": "Noise", "summary": "Quiet", "rating": 5, "num_reviews": 10, "sentiment": "positive", "cite": "r1", "cite_url": "https://reddit.example"}
            ]}
        ]})),
    ])
}
