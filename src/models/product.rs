use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Product details from the most recent `product_entity` payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductInfo {
    pub product_name: Option<String>,
    pub merchants: Vec<String>,
    pub price: Value,
    pub rating: Value,
    pub num_reviews: Value,
    pub url: Option<String>,
    pub description: Option<String>,
    pub offers: Value,
}

impl Default for ProductInfo {
    fn default() -> Self {
        Self {
            product_name: None,
            merchants: Vec::new(),
            price: Value::Null,
            rating: Value::Null,
            num_reviews: Value::Null,
            url: None,
            description: None,
            offers: Value::Array(Vec::new()),
        }
    }
}

/// One rationale paragraph; `rationale` grows while appends target it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Rationale {
    pub rationale: String,
    pub citations: Value,
    pub grouped_citation: Option<Value>,
}

impl Rationale {
    /// Set a key on the grouped citation map. A missing or non-object
    /// citation is replaced by an empty map first; an empty key only
    /// ensures the map exists.
    pub fn set_grouped_citation(&mut self, key: &str, value: Value) {
        if !matches!(self.grouped_citation, Some(Value::Object(_))) {
            self.grouped_citation = Some(Value::Object(Map::new()));
        }
        if key.is_empty() {
            return;
        }
        if let Some(Value::Object(map)) = &mut self.grouped_citation {
            map.insert(key.to_string(), value);
        }
    }
}

/// A website backing a citation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SupportingWebsite {
    pub title: Option<String>,
    pub url: Option<String>,
    pub snippet: Option<String>,
    pub pub_date: Value,
}

/// A citation reference mined from a rationale's grouped citation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CitationReview {
    pub title: Option<String>,
    pub url: Option<String>,
    pub snippet: Option<String>,
    pub supporting_websites: Vec<SupportingWebsite>,
}

/// A review delivered on the `/reviews` append channel.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ReviewItem {
    pub source: Option<String>,
    pub theme: Option<String>,
    pub summary: Option<String>,
    pub rating: Value,
    pub num_reviews: Value,
    pub sentiment: Option<String>,
    pub cite: Value,
    pub cite_url: Option<String>,
}

/// Heterogeneous review entry. Serialized as the bare inner object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ReviewEntry {
    Citation(CitationReview),
    Website(SupportingWebsite),
    Review(ReviewItem),
}

/// The most recently opened `product_reviews` block.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReviewBlock {
    pub summary: String,
    pub reviews: Value,
    pub cite_map: Value,
}

/// Structured record of a product panel.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProductRecord {
    /// Replaced wholesale by each `product_entity` payload
    pub product_info: ProductInfo,
    pub rationales: Vec<Rationale>,
    /// Not de-duplicated; entries lack a stable key
    pub reviews: Vec<ReviewEntry>,
    #[serde(rename = "reviewSummary")]
    pub review_summary: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub review_block: Option<ReviewBlock>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary_text: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_set_grouped_citation_creates_map() {
        let mut rationale = Rationale::default();
        rationale.set_grouped_citation("title", json!("Battery life"));
        assert_eq!(rationale.grouped_citation, Some(json!({"title": "Battery life"})));
    }

    #[test]
    fn test_set_grouped_citation_empty_key_only_ensures_map() {
        let mut rationale = Rationale {
            grouped_citation: Some(json!(null)),
            ..Default::default()
        };
        rationale.set_grouped_citation("", json!("ignored"));
        assert_eq!(rationale.grouped_citation, Some(json!({})));
    }

    #[test]
    fn test_set_grouped_citation_keeps_existing_keys() {
        let mut rationale = Rationale {
            grouped_citation: Some(json!({"refs": []})),
            ..Default::default()
        };
        rationale.set_grouped_citation("url", json!("https://example.com"));
        assert_eq!(
            rationale.grouped_citation,
            Some(json!({"refs": [], "url": "https://example.com"}))
        );
    }

    #[test]
    fn test_review_entry_serializes_flat() {
        let entry = ReviewEntry::Website(SupportingWebsite {
            title: Some("Site".to_string()),
            ..Default::default()
        });
        let value = serde_json::to_value(&entry).unwrap();
        assert_eq!(
            value,
            json!({"title": "Site", "url": null, "snippet": null, "pub_date": null})
        );
    }

    #[test]
    fn test_review_entry_deserializes_to_matching_shape() {
        let website: ReviewEntry =
            serde_json::from_value(json!({"title": null, "url": null, "snippet": null, "pub_date": 1}))
                .unwrap();
        assert!(matches!(website, ReviewEntry::Website(_)));

        let review: ReviewEntry = serde_json::from_value(json!({
            "source": "Reddit", "theme": null, "summary": null, "rating": null,
            "num_reviews": null, "sentiment": null, "cite": null, "cite_url": null
        }))
        .unwrap();
        assert!(matches!(review, ReviewEntry::Review(_)));
    }

    #[test]
    fn test_record_wire_names() {
        let record = ProductRecord::default();
        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["reviewSummary"], json!(""));
        assert_eq!(value["product_info"]["offers"], json!([]));
        assert!(value.get("summary_text").is_none());
        assert!(value.get("review_block").is_none());
    }
}
