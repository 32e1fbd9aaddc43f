//! Wire payloads for the ingestion backend.

use serde::{Deserialize, Serialize};

use crate::models::{ConversationRecord, NewsArticle, ProductRecord, ProductSummary, SourceRef};

pub const CONVERSATION_USER_PLACEHOLDER: &str = "test-User";
pub const CONVERSATION_BRAND_PLACEHOLDER: &str = "test-Brand";
pub const PRODUCT_USER_PLACEHOLDER: &str = "Test-User";
pub const PRODUCT_BRAND_PLACEHOLDER: &str = "Test-Brand";

/// Who is sending, as read from settings. Unset names get the placeholder
/// of the payload they end up in.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Sender {
    pub user_name: Option<String>,
    pub brand_name: Option<String>,
    /// Empty when the lookup failed
    pub client_ip: String,
}

impl Sender {
    fn user_or(&self, placeholder: &str) -> String {
        self.user_name.clone().unwrap_or_else(|| placeholder.to_string())
    }

    fn brand_or(&self, placeholder: &str) -> String {
        self.brand_name.clone().unwrap_or_else(|| placeholder.to_string())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Heuristics {
    pub recommended_products: Vec<ProductSummary>,
    pub search_queries: Vec<String>,
    pub news_articles: Vec<NewsArticle>,
    pub sources: Vec<SourceRef>,
}

/// Body of `POST /api/ingest`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversationPayload {
    pub source: String,
    pub conversation_id: String,
    pub user_query_text: String,
    pub raw_chatgpt_text: String,
    pub heuristics: Heuristics,
    pub client_ip: String,
    pub user_name: String,
    pub brand_name: String,
}

impl ConversationPayload {
    pub fn new(source: &str, record: ConversationRecord, sender: &Sender) -> Self {
        Self {
            source: source.to_string(),
            conversation_id: record.conversation_id,
            user_query_text: record.user_prompt,
            raw_chatgpt_text: record.assistant_response,
            heuristics: Heuristics {
                recommended_products: record.recommended_products,
                search_queries: record.search_queries,
                news_articles: record.news_articles,
                sources: record.sources,
            },
            client_ip: sender.client_ip.clone(),
            user_name: sender.user_or(CONVERSATION_USER_PLACEHOLDER),
            brand_name: sender.brand_or(CONVERSATION_BRAND_PLACEHOLDER),
        }
    }
}

/// Body of `POST /api/ingest-product`. Carries no client IP.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductPayload {
    pub source: String,
    pub conversation_id: String,
    pub user_name: String,
    pub brand_name: String,
    pub product_name: Option<String>,
    pub product_data: ProductRecord,
}

impl ProductPayload {
    pub fn new(
        source: &str,
        conversation_id: impl Into<String>,
        record: ProductRecord,
        sender: &Sender,
    ) -> Self {
        Self {
            source: source.to_string(),
            conversation_id: conversation_id.into(),
            user_name: sender.user_or(PRODUCT_USER_PLACEHOLDER),
            brand_name: sender.brand_or(PRODUCT_BRAND_PLACEHOLDER),
            product_name: record.product_info.product_name.clone(),
            product_data: record,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_conversation_payload_shape() {
        let record = ConversationRecord {
            conversation_id: "c-9".to_string(),
            user_prompt: "best kettle".to_string(),
            assistant_response: "Try this one".to_string(),
            search_queries: vec!["kettle reviews".to_string()],
            ..Default::default()
        };
        let sender = Sender {
            client_ip: "203.0.113.5".to_string(),
            ..Default::default()
        };

        let value = serde_json::to_value(ConversationPayload::new("chatgpt-extension", record, &sender))
            .unwrap();

        assert_eq!(value["source"], "chatgpt-extension");
        assert_eq!(value["user_query_text"], "best kettle");
        assert_eq!(value["raw_chatgpt_text"], "Try this one");
        assert_eq!(value["heuristics"]["search_queries"], json!(["kettle reviews"]));
        assert_eq!(value["heuristics"]["sources"], json!([]));
        assert_eq!(value["client_ip"], "203.0.113.5");
        assert_eq!(value["user_name"], "test-User");
        assert_eq!(value["brand_name"], "test-Brand");
    }

    #[test]
    fn test_product_payload_placeholders_and_name() {
        let mut record = ProductRecord::default();
        record.product_info.product_name = Some("Steel Kettle".to_string());
        let sender = Sender {
            brand_name: Some("Acme".to_string()),
            ..Default::default()
        };

        let payload = ProductPayload::new("chatgpt-extension", "product_info", record, &sender);

        assert_eq!(payload.user_name, "Test-User");
        assert_eq!(payload.brand_name, "Acme");
        assert_eq!(payload.product_name.as_deref(), Some("Steel Kettle"));
        assert_eq!(payload.conversation_id, "product_info");

        let value = serde_json::to_value(&payload).unwrap();
        assert!(value.get("client_ip").is_none());
        assert_eq!(value["product_data"]["product_info"]["product_name"], "Steel Kettle");
    }
}
