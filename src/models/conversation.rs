use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Model and request identifiers attached to the turn.
///
/// Each field is overwritten independently by later events.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConversationMetadata {
    pub model: String,
    pub request_id: String,
    pub turn_exchange_id: String,
    pub title: String,
}

/// A cited source from a `sources_footnote` content reference.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SourceRef {
    pub title: Option<String>,
    pub url: Option<String>,
    pub attribution: Option<String>,
}

/// Flattened product card recommended inside the response.
///
/// Fields keep whatever JSON type the stream used; missing values are `""`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProductSummary {
    pub product_name: String,
    pub price: Value,
    pub recommended_by: Value,
    pub rating: Value,
    pub num_reviews: Value,
    pub image_url: String,
    pub url: String,
}

/// One entry of a search result group.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NewsArticle {
    pub title: Option<String>,
    pub url: Option<String>,
    pub snippet: String,
    pub domain: Option<String>,
    pub attribution: Option<String>,
    pub pub_date: Value,
}

/// Structured record of one conversation turn.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConversationRecord {
    /// Empty when the stream never carried one
    pub conversation_id: String,
    /// First user-authored message part; never overwritten
    pub user_prompt: String,
    /// Every appended response fragment, in arrival order
    #[serde(rename = "raw_assistant_response")]
    pub assistant_response: String,
    pub search_queries: Vec<String>,
    /// Unique by `url`, first occurrence kept
    pub sources: Vec<SourceRef>,
    /// Unique by `product_name`, first occurrence kept
    pub recommended_products: Vec<ProductSummary>,
    /// Unique by `url`, first occurrence kept
    pub news_articles: Vec<NewsArticle>,
    pub metadata: ConversationMetadata,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_record_wire_names() {
        let record = ConversationRecord {
            conversation_id: "c-1".to_string(),
            assistant_response: "Hi".to_string(),
            ..Default::default()
        };
        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["raw_assistant_response"], json!("Hi"));
        assert_eq!(value["metadata"]["turn_exchange_id"], json!(""));
        assert!(value.get("assistant_response").is_none());
    }
}
