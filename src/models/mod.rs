//! Structured records produced from a decoded stream.

mod approx;
mod conversation;
mod product;

pub use approx::{ApproxCapture, ApproxProduct, ApproxSource};
pub use conversation::{
    ConversationMetadata, ConversationRecord, NewsArticle, ProductSummary, SourceRef,
};
pub use product::{
    CitationReview, ProductInfo, ProductRecord, Rationale, ReviewBlock, ReviewEntry, ReviewItem,
    SupportingWebsite,
};
