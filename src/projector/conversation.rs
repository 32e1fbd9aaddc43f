//! Conversation turn projection
//!
//! Every field is filled by an independent scan over the event sequence.
//! The scans touch disjoint fields, so their order does not matter.

use serde_json::Value;

use crate::json::{
    array_at, display_string, lookup, opt_string, present, str_at, string_or_empty, truthy,
    value_or, value_or_null,
};
use crate::models::{ConversationRecord, NewsArticle, ProductSummary, SourceRef};
use crate::projector::{dedup_by_key, Projector};
use crate::sse::patch::{
    CONTENT_REFERENCES_MARKER, RESPONSE_TEXT_PATH, SEARCH_RESULT_GROUPS_PATH,
};
use crate::sse::{patch_list, PatchKind, PatchOp, StreamEvent};

/// Builds a [`ConversationRecord`] from a conversation stream.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConversationProjector;

impl ConversationProjector {
    pub fn new() -> Self {
        Self
    }
}

impl Projector for ConversationProjector {
    type Output = ConversationRecord;

    fn project(&self, events: &[StreamEvent]) -> ConversationRecord {
        let mut record = ConversationRecord {
            conversation_id: conversation_id(events),
            user_prompt: user_prompt(events),
            assistant_response: assistant_response(events),
            search_queries: search_queries(events),
            sources: sources(events),
            recommended_products: recommended_products(events),
            news_articles: news_articles(events),
            ..Default::default()
        };
        apply_metadata(events, &mut record);

        record.recommended_products =
            dedup_by_key(record.recommended_products, |p| p.product_name.clone());
        record.news_articles = dedup_by_key(record.news_articles, |a| a.url.clone());
        record.sources = dedup_by_key(record.sources, |s| s.url.clone());

        tracing::debug!(
            conversation_id = %record.conversation_id,
            response_len = record.assistant_response.len(),
            products = record.recommended_products.len(),
            sources = record.sources.len(),
            news = record.news_articles.len(),
            "projected conversation"
        );

        record
    }
}

/// Payloads of every event that decoded as JSON.
fn payloads(events: &[StreamEvent]) -> impl Iterator<Item = &Value> {
    events.iter().filter_map(StreamEvent::json)
}

/// Payloads of `delta` events only.
fn delta_payloads(events: &[StreamEvent]) -> impl Iterator<Item = &Value> {
    events.iter().filter(|e| e.is_delta()).filter_map(StreamEvent::json)
}

fn conversation_id(events: &[StreamEvent]) -> String {
    payloads(events)
        .find_map(|data| present(data, &["conversation_id"]))
        .map(display_string)
        .unwrap_or_default()
}

fn user_prompt(events: &[StreamEvent]) -> String {
    delta_payloads(events)
        .find_map(|data| {
            let message = lookup(data, &["v", "message"])?;
            if str_at(message, &["author", "role"]) != Some("user") {
                return None;
            }
            present(message, &["content", "parts", "0"]).map(display_string)
        })
        .unwrap_or_default()
}

fn search_queries(events: &[StreamEvent]) -> Vec<String> {
    payloads(events)
        .filter_map(|data| {
            present(
                data,
                &["v", "message", "metadata", "search_model_queries", "queries"],
            )
        })
        .flat_map(|queries| array_at(queries, &[]))
        .map(display_string)
        .filter(|q| !q.is_empty())
        .collect()
}

fn apply_metadata(events: &[StreamEvent], record: &mut ConversationRecord) {
    let meta = &mut record.metadata;

    for data in payloads(events) {
        if str_at(data, &["type"]) == Some("title_generation") {
            if let Some(title) = opt_string(data, "title") {
                meta.title = title;
            }
        }

        let Some(message_meta) = present(data, &["v", "message", "metadata"]) else {
            continue;
        };
        if let Some(model) = opt_string(message_meta, "model_slug") {
            meta.model = model;
        }
        if let Some(request_id) = opt_string(message_meta, "request_id") {
            meta.request_id = request_id;
        }
        if let Some(turn_exchange_id) = opt_string(message_meta, "turn_exchange_id") {
            meta.turn_exchange_id = turn_exchange_id;
        }
    }
}

fn sources(events: &[StreamEvent]) -> Vec<SourceRef> {
    let mut sources = Vec::new();

    for data in delta_payloads(events) {
        let Some(v) = present(data, &["v"]) else {
            continue;
        };
        for patch in patch_list(v).into_iter().filter_map(PatchOp::from_value) {
            if !patch.path.contains(CONTENT_REFERENCES_MARKER) {
                continue;
            }
            let Some(refs) = patch.value.filter(|v| truthy(v)) else {
                continue;
            };
            for reference in patch_list(refs) {
                if str_at(reference, &["type"]) != Some("sources_footnote") {
                    continue;
                }
                sources.extend(array_at(reference, &["sources"]).iter().map(|source| SourceRef {
                    title: str_at(source, &["title"]).map(str::to_string),
                    url: str_at(source, &["url"]).map(str::to_string),
                    attribution: str_at(source, &["attribution"]).map(str::to_string),
                }));
            }
        }
    }

    sources
}

fn product_summary(product: &Value) -> ProductSummary {
    let empty = || Value::String(String::new());
    ProductSummary {
        product_name: string_or_empty(product, "title"),
        price: value_or(product, "price", empty()),
        recommended_by: value_or(product, "merchants", empty()),
        rating: value_or(product, "rating", empty()),
        num_reviews: value_or(product, "num_reviews", empty()),
        image_url: str_at(product, &["image_urls", "0"])
            .unwrap_or_default()
            .to_string(),
        url: string_or_empty(product, "url"),
    }
}

/// Product cards arrive either batched (an array of deltas whose values
/// carry a `product`) or as a single object carrying `product` directly.
fn recommended_products(events: &[StreamEvent]) -> Vec<ProductSummary> {
    let mut products = Vec::new();

    for data in payloads(events) {
        let Some(v) = lookup(data, &["v"]) else {
            continue;
        };
        if let Value::Array(items) = v {
            products.extend(
                items
                    .iter()
                    .filter_map(|item| present(item, &["v", "product"]))
                    .map(product_summary),
            );
        }
        if let Some(product) = present(v, &["product"]) {
            products.push(product_summary(product));
        }
    }

    products
}

fn group_entries(group: &Value, articles: &mut Vec<NewsArticle>) {
    let domain = str_at(group, &["domain"]).map(str::to_string);
    articles.extend(array_at(group, &["entries"]).iter().map(|entry| NewsArticle {
        title: str_at(entry, &["title"]).map(str::to_string),
        url: str_at(entry, &["url"]).map(str::to_string),
        snippet: string_or_empty(entry, "snippet"),
        domain: domain.clone(),
        attribution: str_at(entry, &["attribution"]).map(str::to_string),
        pub_date: value_or_null(entry, "pub_date"),
    }));
}

/// Search result groups show up in four encodings: inline in message
/// metadata, as an `append` or `add` delta on the groups path, and as a
/// bare array of self-describing groups.
fn news_articles(events: &[StreamEvent]) -> Vec<NewsArticle> {
    let mut articles = Vec::new();

    for data in delta_payloads(events) {
        if let Some(groups) = present(data, &["v", "message", "metadata", "search_result_groups"]) {
            for group in array_at(groups, &[]) {
                group_entries(group, &mut articles);
            }
        }

        let delta = PatchOp::from_value(data);
        let groups = array_at(data, &["v"]);

        if delta.is_some_and(|d| d.targets(SEARCH_RESULT_GROUPS_PATH, PatchKind::Append)) {
            for group in groups {
                group_entries(group, &mut articles);
            }
        }

        for group in groups {
            if str_at(group, &["type"]) == Some("search_result_group")
                && present(group, &["entries"]).is_some()
            {
                group_entries(group, &mut articles);
            }
        }

        if delta.is_some_and(|d| d.targets(SEARCH_RESULT_GROUPS_PATH, PatchKind::Add)) {
            for group in groups {
                if present(group, &["entries"]).is_some() {
                    group_entries(group, &mut articles);
                }
            }
        }
    }

    articles
}

/// Response text arrives as flat `append` deltas or batched inside a
/// `patch` delta; both carry the same fragments.
fn assistant_response(events: &[StreamEvent]) -> String {
    let mut response = String::new();

    for data in delta_payloads(events) {
        let Some(delta) = PatchOp::from_value(data) else {
            continue;
        };
        match delta.kind {
            None => continue,
            Some(PatchKind::Unknown) => {
                tracing::trace!(path = delta.path, "ignoring unknown delta operation");
                continue;
            }
            Some(_) => {}
        }

        if delta.targets(RESPONSE_TEXT_PATH, PatchKind::Append) {
            if let Some(fragment) = delta.str_value() {
                response.push_str(fragment);
            }
        }

        for inner in delta.nested() {
            if inner.targets(RESPONSE_TEXT_PATH, PatchKind::Append) {
                if let Some(fragment) = inner.str_value() {
                    response.push_str(fragment);
                }
            }
        }
    }

    response
}
