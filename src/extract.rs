//! Approximate extraction straight from raw stream text.
//!
//! A lower-fidelity path that works without the event/patch model: fixed
//! patterns are matched against the undifferentiated body. Missing markers
//! or non-matching patterns produce empty fields, never errors.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::models::{ApproxCapture, ApproxProduct, ApproxSource};

static QUERY_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#""parts":\["([^"]+)"\]"#).expect("Invalid query regex"));

static APPEND_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#""o":"append","v":"([^"]+)""#).expect("Invalid append regex"));

static PRODUCTS_SECTION_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?s)"products":\[(.*?)\],"target_product_count""#)
        .expect("Invalid products section regex")
});

static PRODUCT_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(concat!(
        r#"(?s)"title":"([^"]+)".*?"price":"([^"]+)".*?"rating":([0-9.]+)"#,
        r#".*?"num_reviews":(\d+).*?"merchants":"([^"]+)".*?"featured_tag":"([^"]*)""#,
    ))
    .expect("Invalid product regex")
});

static SOURCES_SECTION_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?s)"sources":\[(.*?)\],"has_images""#).expect("Invalid sources section regex")
});

static SOURCE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#""title":"([^"]+)","url":"([^"]+)","attribution":"([^"]+)""#)
        .expect("Invalid source regex")
});

const TRACKING_SUFFIX: &str = "?utm_source=chatgpt.com";

/// Replace the literal escape sequences that survive in raw stream text.
///
/// Handles `\n`, the rupee sign (`\u20b9`), narrow no-break space
/// (`\u202f`), non-breaking hyphen (`\u2011`) and escaped quotes.
pub fn clean_escapes(text: &str) -> String {
    let text = text.replace("\\n", "\n");
    let text = clean_currency(&text);
    let text = clean_spacing(&text);
    text.replace("\\\"", "\"")
}

fn clean_currency(text: &str) -> String {
    text.replace("\\u20b9", "\u{20b9}")
}

fn clean_spacing(text: &str) -> String {
    text.replace("\\u202f", " ").replace("\\u2011", "-")
}

/// Text between a start marker and an end marker, if both are present.
fn section<'a>(regex: &Regex, text: &'a str) -> Option<&'a str> {
    regex
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

fn extract_query(text: &str) -> String {
    QUERY_REGEX
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
        .unwrap_or_default()
}

fn extract_response(text: &str) -> String {
    let joined: String = APPEND_REGEX
        .captures_iter(text)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str())
        .collect();
    clean_escapes(&joined)
}

/// Parse the longest numeric prefix, so `4.5.1` reads as `4.5`.
fn leading_float(text: &str) -> Option<f64> {
    let mut seen_dot = false;
    let end = text
        .char_indices()
        .find(|&(_, c)| match c {
            '.' if !seen_dot => {
                seen_dot = true;
                false
            }
            c => !c.is_ascii_digit(),
        })
        .map(|(i, _)| i)
        .unwrap_or(text.len());
    text[..end].parse().ok()
}

fn extract_products(text: &str) -> Vec<ApproxProduct> {
    let Some(products) = section(&PRODUCTS_SECTION_REGEX, text) else {
        tracing::debug!("no products section in stream text");
        return Vec::new();
    };

    PRODUCT_REGEX
        .captures_iter(products)
        .map(|caps| {
            let field = |i: usize| caps.get(i).map(|m| m.as_str()).unwrap_or("");
            let tag = field(6);
            ApproxProduct {
                title: clean_spacing(field(1)),
                price: clean_currency(field(2)),
                rating: leading_float(field(3)),
                reviews: field(4).parse::<u64>().ok(),
                merchants: field(5).to_string(),
                tag: (!tag.is_empty()).then(|| tag.to_string()),
            }
        })
        .collect()
}

fn extract_sources(text: &str) -> Vec<ApproxSource> {
    let Some(sources) = section(&SOURCES_SECTION_REGEX, text) else {
        tracing::debug!("no sources section in stream text");
        return Vec::new();
    };

    SOURCE_REGEX
        .captures_iter(sources)
        .map(|caps| {
            let field = |i: usize| caps.get(i).map(|m| m.as_str()).unwrap_or("");
            ApproxSource {
                title: field(1).to_string(),
                url: field(2).replace(TRACKING_SUFFIX, ""),
                attribution: field(3).to_string(),
            }
        })
        .collect()
}

/// Recover an approximate record from raw, possibly malformed stream text.
pub fn extract_approx(text: &str) -> ApproxCapture {
    ApproxCapture {
        query: extract_query(text),
        response_text: extract_response(text),
        products: extract_products(text),
        sources: extract_sources(text),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_first_match() {
        let text = r#"{"content":{"parts":["best kettle"]}} {"parts":["later"]}"#;
        assert_eq!(extract_approx(text).query, "best kettle");
    }

    #[test]
    fn test_response_concatenates_appends() {
        let text = concat!(
            r#"data: {"p":"/message/content/parts/0","o":"append","v":"Hello"}"#,
            "\n\n",
            r#"data: {"o":"append","v":" world\n"}"#,
        );
        assert_eq!(extract_approx(text).response_text, "Hello world\n");
    }

    #[test]
    fn test_clean_escapes() {
        assert_eq!(
            clean_escapes(r#"\u20b9500\u202foff\nnon\u2011stick \"pan\""#),
            "\u{20b9}500 off\nnon-stick \"pan\""
        );
    }

    #[test]
    fn test_products_between_markers() {
        let text = concat!(
            r#""products":[{"title":"Steel\u202fKettle","price":"\u20b910","rating":4.5,"num_reviews":120,"#,
            r#""merchants":"Shop","featured_tag":"Best pick"},{"title":"Glass\u2011Kettle","price":"\u20b920","#,
            r#""rating":4,"num_reviews":8,"merchants":"Other","featured_tag":""}],"target_product_count":2"#,
        );
        let products = extract_approx(text).products;
        assert_eq!(products.len(), 2);
        assert_eq!(products[0].title, "Steel Kettle");
        assert_eq!(products[0].price, "\u{20b9}10");
        assert_eq!(products[0].rating, Some(4.5));
        assert_eq!(products[0].reviews, Some(120));
        assert_eq!(products[0].tag.as_deref(), Some("Best pick"));
        assert_eq!(products[1].title, "Glass-Kettle");
        assert_eq!(products[1].tag, None);
    }

    #[test]
    fn test_leading_float_reads_numeric_prefix() {
        assert_eq!(leading_float("4.5"), Some(4.5));
        assert_eq!(leading_float("4.5.1"), Some(4.5));
        assert_eq!(leading_float("4."), Some(4.0));
        assert_eq!(leading_float("."), None);
        assert_eq!(leading_float(""), None);
    }

    #[test]
    fn test_products_missing_end_marker() {
        let text = r#""products":[{"title":"A","price":"1","rating":1,"num_reviews":1,"merchants":"m","featured_tag":""}]"#;
        assert!(extract_approx(text).products.is_empty());
    }

    #[test]
    fn test_sources_strip_tracking_suffix() {
        let text = concat!(
            r#""sources":[{"title":"Guide","url":"https://g.example/x?utm_source=chatgpt.com","attribution":"G"},"#,
            r#"{"title":"Other","url":"https://o.example","attribution":"O"}],"has_images":false"#,
        );
        let sources = extract_approx(text).sources;
        assert_eq!(sources.len(), 2);
        assert_eq!(sources[0].url, "https://g.example/x");
        assert_eq!(sources[1].attribution, "O");
    }

    #[test]
    fn test_missing_sources_marker_is_empty() {
        let capture = extract_approx(r#"{"o":"append","v":"text"}"#);
        assert!(capture.sources.is_empty());
        assert!(capture.products.is_empty());
        assert_eq!(capture.query, "");
    }

    #[test]
    fn test_garbage_input() {
        assert_eq!(extract_approx("\u{0}\u{1}{{{[[["), ApproxCapture::default());
    }
}
