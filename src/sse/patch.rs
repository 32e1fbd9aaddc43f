//! Delta/patch operations carried inside event payloads
//!
//! A delta is an object of the form `{"p": <path>, "o": <op>, "v": <value>}`.
//! Only the operation vocabulary observed on the wire is modelled; anything
//! else decodes to [`PatchKind::Unknown`] and is skipped by the projectors.

use serde_json::Value;

/// Path of the assistant's streamed response text.
pub const RESPONSE_TEXT_PATH: &str = "/message/content/parts/0";
/// Path of the search result groups inside message metadata.
pub const SEARCH_RESULT_GROUPS_PATH: &str = "/message/metadata/search_result_groups";
/// Path marker for content reference updates.
pub const CONTENT_REFERENCES_MARKER: &str = "content_references";
/// Prefix of rationale text appends in the product stream.
pub const RATIONALE_PREFIX: &str = "/rationale";
/// Prefix of review summary appends in the product stream.
pub const SUMMARY_PREFIX: &str = "/summary";
/// Path of review list appends in the product stream.
pub const REVIEWS_PATH: &str = "/reviews";
/// Prefix of grouped citation updates in the product stream.
pub const GROUPED_CITATION_PREFIX: &str = "/grouped_citation";

/// Mutation kind of a delta.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatchKind {
    /// Set the value at the path
    Add,
    /// Concatenate onto the string at the path
    Append,
    /// Overwrite the value at the path
    Replace,
    /// Batch of nested deltas
    Patch,
    /// Anything else; treated as a no-op
    Unknown,
}

impl PatchKind {
    /// Parse the wire name of an operation.
    pub fn from_op(op: &str) -> Self {
        match op {
            "add" => PatchKind::Add,
            "append" => PatchKind::Append,
            "replace" => PatchKind::Replace,
            "patch" => PatchKind::Patch,
            _ => PatchKind::Unknown,
        }
    }

    /// Wire name of the operation.
    pub fn as_str(&self) -> &'static str {
        match self {
            PatchKind::Add => "add",
            PatchKind::Append => "append",
            PatchKind::Replace => "replace",
            PatchKind::Patch => "patch",
            PatchKind::Unknown => "unknown",
        }
    }
}

/// Borrowed view of one delta object.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PatchOp<'a> {
    /// Operation, `None` when the object carried no `o` field
    pub kind: Option<PatchKind>,
    /// Slash-delimited path, empty when absent
    pub path: &'a str,
    /// Payload, `None` when the object carried no `v` field
    pub value: Option<&'a Value>,
}

impl<'a> PatchOp<'a> {
    /// View a JSON value as a delta. Non-objects yield `None`.
    pub fn from_value(value: &'a Value) -> Option<Self> {
        let obj = value.as_object()?;
        Some(Self {
            kind: obj.get("o").and_then(Value::as_str).map(PatchKind::from_op),
            path: obj.get("p").and_then(Value::as_str).unwrap_or(""),
            value: obj.get("v"),
        })
    }

    /// Check both the path and the operation.
    pub fn targets(&self, path: &str, kind: PatchKind) -> bool {
        self.path == path && self.kind == Some(kind)
    }

    /// True when the operation is `append`.
    pub fn is_append(&self) -> bool {
        self.kind == Some(PatchKind::Append)
    }

    /// The payload when it is a string.
    pub fn str_value(&self) -> Option<&'a str> {
        self.value.and_then(Value::as_str)
    }

    /// The payload as append text: strings verbatim, numbers and booleans
    /// in their JSON form. `null`, lists and objects yield `None`.
    pub fn text_value(&self) -> Option<String> {
        match self.value? {
            value @ (Value::String(_) | Value::Number(_) | Value::Bool(_)) => {
                Some(crate::json::display_string(value))
            }
            _ => None,
        }
    }

    /// Nested deltas of a `patch` operation. Empty for any other kind or
    /// when the payload is not a list.
    pub fn nested(&self) -> Vec<PatchOp<'a>> {
        if self.kind != Some(PatchKind::Patch) {
            return Vec::new();
        }
        match self.value {
            Some(Value::Array(items)) => items.iter().filter_map(PatchOp::from_value).collect(),
            _ => Vec::new(),
        }
    }
}

/// Normalize a payload that may be a single item or a list of items.
pub fn patch_list(value: &Value) -> Vec<&Value> {
    match value {
        Value::Array(items) => items.iter().collect(),
        other => vec![other],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_op() {
        assert_eq!(PatchKind::from_op("add"), PatchKind::Add);
        assert_eq!(PatchKind::from_op("append"), PatchKind::Append);
        assert_eq!(PatchKind::from_op("replace"), PatchKind::Replace);
        assert_eq!(PatchKind::from_op("patch"), PatchKind::Patch);
        assert_eq!(PatchKind::from_op("remove"), PatchKind::Unknown);
        assert_eq!(PatchKind::from_op("truncate").as_str(), "unknown");
    }

    #[test]
    fn test_from_value() {
        let raw = json!({"p": "/message/content/parts/0", "o": "append", "v": "Hi"});
        let op = PatchOp::from_value(&raw).unwrap();
        assert!(op.targets(RESPONSE_TEXT_PATH, PatchKind::Append));
        assert_eq!(op.str_value(), Some("Hi"));
    }

    #[test]
    fn test_text_value_coerces_scalars() {
        let text = |v: Value| {
            let raw = json!({"p": "/rationale", "o": "append", "v": v});
            PatchOp::from_value(&raw).unwrap().text_value()
        };
        assert_eq!(text(json!("fast")), Some("fast".to_string()));
        assert_eq!(text(json!(5)), Some("5".to_string()));
        assert_eq!(text(json!(4.5)), Some("4.5".to_string()));
        assert_eq!(text(json!(true)), Some("true".to_string()));
        assert_eq!(text(json!(null)), None);
        assert_eq!(text(json!(["a"])), None);
        assert_eq!(text(json!({"a": 1})), None);
    }

    #[test]
    fn test_from_value_missing_fields() {
        let raw = json!({"v": 3});
        let op = PatchOp::from_value(&raw).unwrap();
        assert_eq!(op.kind, None);
        assert_eq!(op.path, "");
        assert_eq!(op.str_value(), None);
        assert!(PatchOp::from_value(&json!("text")).is_none());
    }

    #[test]
    fn test_nested_patch() {
        let raw = json!({
            "o": "patch",
            "v": [
                {"p": "/message/content/parts/0", "o": "append", "v": "A"},
                "junk",
                {"p": "/message/status", "o": "replace", "v": "done"}
            ]
        });
        let op = PatchOp::from_value(&raw).unwrap();
        let nested = op.nested();
        assert_eq!(nested.len(), 2);
        assert_eq!(nested[0].str_value(), Some("A"));
        assert_eq!(nested[1].kind, Some(PatchKind::Replace));
    }

    #[test]
    fn test_nested_requires_patch_kind() {
        let raw = json!({"o": "append", "v": [{"o": "append", "v": "A"}]});
        assert!(PatchOp::from_value(&raw).unwrap().nested().is_empty());
    }

    #[test]
    fn test_patch_list_normalizes() {
        let single = json!({"p": "/a"});
        assert_eq!(patch_list(&single).len(), 1);
        let many = json!([{"p": "/a"}, {"p": "/b"}]);
        assert_eq!(patch_list(&many).len(), 2);
        assert!(patch_list(&json!([])).is_empty());
    }
}
