use serde::{Deserialize, Serialize};

/// Product card recovered by pattern matching.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ApproxProduct {
    pub title: String,
    pub price: String,
    pub rating: Option<f64>,
    pub reviews: Option<u64>,
    pub merchants: String,
    pub tag: Option<String>,
}

/// Source recovered by pattern matching.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ApproxSource {
    pub title: String,
    pub url: String,
    pub attribution: String,
}

/// Lower-fidelity record recovered straight from raw stream text.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ApproxCapture {
    pub query: String,
    pub response_text: String,
    pub products: Vec<ApproxProduct>,
    pub sources: Vec<ApproxSource>,
}
