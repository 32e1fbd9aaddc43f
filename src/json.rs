//! Tolerant navigation over loosely-typed JSON payloads.
//!
//! Payload schemas drift between releases, so every lookup returns an
//! `Option` and a missing or mistyped field simply contributes nothing.

use serde_json::Value;

/// Walk a path of object keys and array indices.
///
/// Numeric segments index into arrays; every other segment is an object key.
///
/// ```
/// use harvest::json::lookup;
/// use serde_json::json;
///
/// let v = json!({"message": {"content": {"parts": ["Hello"]}}});
/// assert_eq!(lookup(&v, &["message", "content", "parts", "0"]), Some(&json!("Hello")));
/// assert_eq!(lookup(&v, &["message", "author"]), None);
/// ```
pub fn lookup<'a>(value: &'a Value, path: &[&str]) -> Option<&'a Value> {
    path.iter().try_fold(value, |current, segment| match current {
        Value::Object(map) => map.get(*segment),
        Value::Array(items) => segment.parse::<usize>().ok().and_then(|i| items.get(i)),
        _ => None,
    })
}

/// Truthiness in the sense the upstream producer uses it: `null`, `false`,
/// `0`, and `""` are absent; objects and arrays are present even when empty.
pub fn truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|f| f != 0.0 && !f.is_nan()).unwrap_or(true),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Look up a path and keep the value only if it is truthy.
pub fn present<'a>(value: &'a Value, path: &[&str]) -> Option<&'a Value> {
    lookup(value, path).filter(|v| truthy(v))
}

/// Look up a path and return it as a string slice.
pub fn str_at<'a>(value: &'a Value, path: &[&str]) -> Option<&'a str> {
    lookup(value, path).and_then(Value::as_str)
}

/// Render a value as text: strings verbatim, everything else as JSON.
pub fn display_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// The field as text when truthy, otherwise `None`.
pub fn opt_string(value: &Value, key: &str) -> Option<String> {
    present(value, &[key]).map(display_string)
}

/// The field as text when truthy, otherwise the empty string.
pub fn string_or_empty(value: &Value, key: &str) -> String {
    opt_string(value, key).unwrap_or_default()
}

/// The field when truthy, otherwise `fallback`.
pub fn value_or(value: &Value, key: &str, fallback: Value) -> Value {
    present(value, &[key]).cloned().unwrap_or(fallback)
}

/// The field when truthy, otherwise `null`.
pub fn value_or_null(value: &Value, key: &str) -> Value {
    value_or(value, key, Value::Null)
}

/// Items of an array field; empty when the field is missing or not a list.
pub fn array_at<'a>(value: &'a Value, path: &[&str]) -> &'a [Value] {
    lookup(value, path)
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or(&[])
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_lookup_nested_object_and_index() {
        let v = json!({"a": {"b": [10, {"c": "deep"}]}});
        assert_eq!(lookup(&v, &["a", "b", "0"]), Some(&json!(10)));
        assert_eq!(lookup(&v, &["a", "b", "1", "c"]), Some(&json!("deep")));
        assert_eq!(lookup(&v, &["a", "b", "9"]), None);
        assert_eq!(lookup(&v, &["a", "b", "x"]), None);
        assert_eq!(lookup(&v, &[]), Some(&v));
    }

    #[test]
    fn test_lookup_through_scalar_is_none() {
        let v = json!({"a": "text"});
        assert_eq!(lookup(&v, &["a", "b"]), None);
    }

    #[test]
    fn test_truthy() {
        assert!(!truthy(&json!(null)));
        assert!(!truthy(&json!(false)));
        assert!(!truthy(&json!(0)));
        assert!(!truthy(&json!(0.0)));
        assert!(!truthy(&json!("")));
        assert!(truthy(&json!("x")));
        assert!(truthy(&json!(4.5)));
        assert!(truthy(&json!([])));
        assert!(truthy(&json!({})));
    }

    #[test]
    fn test_present_filters_falsy() {
        let v = json!({"title": "", "rating": 0, "name": "Kettle"});
        assert_eq!(present(&v, &["title"]), None);
        assert_eq!(present(&v, &["rating"]), None);
        assert_eq!(present(&v, &["name"]), Some(&json!("Kettle")));
    }

    #[test]
    fn test_string_helpers() {
        let v = json!({"price": "$10", "rating": 4.5, "empty": ""});
        assert_eq!(opt_string(&v, "price"), Some("$10".to_string()));
        assert_eq!(opt_string(&v, "rating"), Some("4.5".to_string()));
        assert_eq!(opt_string(&v, "empty"), None);
        assert_eq!(string_or_empty(&v, "missing"), "");
    }

    #[test]
    fn test_value_defaults() {
        let v = json!({"offers": [], "rating": 0});
        assert_eq!(value_or(&v, "offers", json!(null)), json!([]));
        assert_eq!(value_or_null(&v, "rating"), json!(null));
        assert_eq!(value_or(&v, "missing", json!([])), json!([]));
    }

    #[test]
    fn test_array_at() {
        let v = json!({"list": [1, 2], "scalar": 3});
        assert_eq!(array_at(&v, &["list"]).len(), 2);
        assert!(array_at(&v, &["scalar"]).is_empty());
        assert!(array_at(&v, &["missing"]).is_empty());
    }
}
