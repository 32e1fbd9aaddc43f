//! Product panel projection
//!
//! A single pass over the `delta` events. Two cursors track the rationale
//! and the review block currently receiving streamed appends; each stays
//! current until a newer payload of the same kind opens a replacement.

use serde_json::{Map, Value};

use crate::json::{
    array_at, display_string, lookup, opt_string, str_at, truthy, value_or, value_or_null,
};
use crate::models::{
    CitationReview, ProductInfo, ProductRecord, Rationale, ReviewBlock, ReviewEntry, ReviewItem,
    SupportingWebsite,
};
use crate::projector::Projector;
use crate::sse::patch::{GROUPED_CITATION_PREFIX, RATIONALE_PREFIX, REVIEWS_PATH, SUMMARY_PREFIX};
use crate::sse::{PatchOp, StreamEvent};

/// Builds a [`ProductRecord`] from a product stream.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProductProjector;

impl ProductProjector {
    pub fn new() -> Self {
        Self
    }
}

impl Projector for ProductProjector {
    type Output = ProductRecord;

    fn project(&self, events: &[StreamEvent]) -> ProductRecord {
        let mut fold = ProductFold::default();
        for data in events.iter().filter(|e| e.is_delta()).filter_map(StreamEvent::json) {
            fold.apply(data);
        }
        fold.finish()
    }
}

/// Accumulator threaded through the scan.
#[derive(Debug, Default)]
struct ProductFold {
    record: ProductRecord,
    /// Index into `record.rationales` of the rationale receiving appends
    current_rationale: Option<usize>,
}

impl ProductFold {
    fn apply(&mut self, data: &Value) {
        let Some(v) = lookup(data, &["v"]).filter(|v| truthy(v)) else {
            return;
        };

        if let Value::Array(deltas) = v {
            for delta in deltas.iter().filter_map(PatchOp::from_value) {
                self.apply_delta(delta);
            }
            return;
        }

        match str_at(v, &["type"]) {
            Some("product_entity") => self.open_entity(v),
            Some("product_rationale") => self.open_rationale(v),
            Some("product_reviews") => self.open_review_block(v),
            _ => {}
        }
    }

    fn apply_delta(&mut self, delta: PatchOp<'_>) {
        let path = delta.path;

        if path.starts_with(RATIONALE_PREFIX) && delta.is_append() {
            if let (Some(rationale), Some(fragment)) = (self.rationale_mut(), delta.text_value()) {
                rationale.rationale.push_str(&fragment);
            }
        }

        if path.starts_with(SUMMARY_PREFIX) && delta.is_append() {
            if let (Some(block), Some(fragment)) =
                (self.record.review_block.as_mut(), delta.text_value())
            {
                block.summary.push_str(&fragment);
            }
        }

        if path == REVIEWS_PATH && delta.is_append() {
            if let Some(Value::Array(reviews)) = delta.value {
                self.record
                    .reviews
                    .extend(reviews.iter().map(|r| ReviewEntry::Review(review_item(r))));
            }
        }

        if path.starts_with(GROUPED_CITATION_PREFIX) {
            let key = path
                .strip_prefix(GROUPED_CITATION_PREFIX)
                .and_then(|rest| rest.strip_prefix('/'))
                .unwrap_or("");
            // A delta without a value only materializes the map
            let key = if delta.value.is_some() { key } else { "" };
            let value = delta.value.cloned().unwrap_or(Value::Null);
            if let Some(rationale) = self.rationale_mut() {
                rationale.set_grouped_citation(key, value);
            }
        }
    }

    fn rationale_mut(&mut self) -> Option<&mut Rationale> {
        self.current_rationale
            .and_then(|i| self.record.rationales.get_mut(i))
    }

    fn open_entity(&mut self, v: &Value) {
        let empty = Value::Object(Map::new());
        let product = lookup(v, &["product"]).filter(|p| truthy(p)).unwrap_or(&empty);

        let merchants = match lookup(product, &["merchants"]) {
            Some(Value::Array(items)) => items.iter().map(display_string).collect(),
            Some(Value::String(single)) => vec![single.clone()],
            _ => Vec::new(),
        };

        self.record.product_info = ProductInfo {
            product_name: opt_string(product, "title"),
            merchants,
            price: value_or_null(product, "price"),
            rating: value_or_null(product, "rating"),
            num_reviews: value_or_null(product, "num_reviews"),
            url: opt_string(product, "url"),
            description: opt_string(product, "description"),
            offers: value_or(product, "offers", Value::Array(Vec::new())),
        };

        tracing::debug!(
            product_name = ?self.record.product_info.product_name,
            "product entity"
        );
    }

    fn open_rationale(&mut self, v: &Value) {
        let grouped = lookup(v, &["grouped_citation"]).filter(|g| truthy(g));

        if let Some(grouped) = grouped {
            for reference in array_at(grouped, &["refs"]) {
                self.record
                    .reviews
                    .push(ReviewEntry::Citation(citation_review(reference)));
            }
            for site in array_at(grouped, &["supporting_websites"]) {
                self.record
                    .reviews
                    .push(ReviewEntry::Website(supporting_website(site)));
            }
        }

        self.record.rationales.push(Rationale {
            rationale: opt_string(v, "rationale").unwrap_or_default(),
            citations: value_or(v, "citations", Value::Array(Vec::new())),
            grouped_citation: grouped.cloned(),
        });
        self.current_rationale = Some(self.record.rationales.len() - 1);
    }

    fn open_review_block(&mut self, v: &Value) {
        let block = ReviewBlock {
            summary: opt_string(v, "summary").unwrap_or_default(),
            reviews: value_or(v, "reviews", Value::Array(Vec::new())),
            cite_map: value_or(v, "cite_map", Value::Object(Map::new())),
        };
        self.record.review_summary = block.summary.clone();
        self.record.review_block = Some(block);
    }

    fn finish(mut self) -> ProductRecord {
        if !self.record.rationales.is_empty() {
            let summary = self
                .record
                .rationales
                .iter()
                .map(|r| r.rationale.trim())
                .collect::<Vec<_>>()
                .join(" ");
            self.record.summary_text = Some(summary);
        }

        tracing::debug!(
            rationales = self.record.rationales.len(),
            reviews = self.record.reviews.len(),
            "projected product"
        );

        self.record
    }
}

fn supporting_website(site: &Value) -> SupportingWebsite {
    SupportingWebsite {
        title: opt_string(site, "title"),
        url: opt_string(site, "url"),
        snippet: opt_string(site, "snippet"),
        pub_date: value_or_null(site, "pub_date"),
    }
}

fn citation_review(reference: &Value) -> CitationReview {
    CitationReview {
        title: opt_string(reference, "title"),
        url: opt_string(reference, "url"),
        snippet: opt_string(reference, "snippet"),
        supporting_websites: array_at(reference, &["supporting_websites"])
            .iter()
            .map(supporting_website)
            .collect(),
    }
}

fn review_item(review: &Value) -> ReviewItem {
    ReviewItem {
        source: opt_string(review, "source"),
        theme: opt_string(review, "theme"),
        summary: opt_string(review, "summary"),
        rating: value_or_null(review, "rating"),
        num_reviews: value_or_null(review, "num_reviews"),
        sentiment: opt_string(review, "sentiment"),
        cite: value_or_null(review, "cite"),
        cite_url: opt_string(review, "cite_url"),
    }
}
