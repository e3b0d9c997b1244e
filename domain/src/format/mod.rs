//! Result formatters
//!
//! Every formatter is a pure function from a typed remote result to the
//! text placed in the envelope. Output is deterministic: the same input
//! always renders byte-identical text.

pub mod describe;
pub mod dml;
pub mod metadata;
pub mod records;
pub mod search;

pub use describe::{format_describe, format_object_matches, match_objects};
pub use dml::format_dml_results;
pub use metadata::{MetadataTarget, format_metadata_failure, format_metadata_success};
pub use records::format_query_result;
pub use search::format_search_result;

use serde_json::Value;

/// Render a single record value
///
/// Strings are shown raw, arrays as a record count, objects as compact JSON
/// and null or absent values as `null`.
pub(crate) fn render_value(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => "null".to_string(),
        Some(Value::String(s)) => s.clone(),
        Some(Value::Array(items)) => format!("[{} records]", items.len()),
        Some(other) => other.to_string(),
    }
}

/// Number of child records in a nested relationship result
///
/// The REST API wraps child rows as `{totalSize, done, records: [...]}`;
/// a bare array is accepted as well.
pub(crate) fn child_record_count(value: Option<&Value>) -> usize {
    match value {
        Some(Value::Array(items)) => items.len(),
        Some(Value::Object(map)) => map
            .get("records")
            .and_then(Value::as_array)
            .map(Vec::len)
            .unwrap_or(0),
        _ => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_render_value() {
        assert_eq!(render_value(None), "null");
        assert_eq!(render_value(Some(&Value::Null)), "null");
        assert_eq!(render_value(Some(&json!("Acme"))), "Acme");
        assert_eq!(render_value(Some(&json!(42))), "42");
        assert_eq!(render_value(Some(&json!(true))), "true");
        assert_eq!(render_value(Some(&json!([1, 2]))), "[2 records]");
        assert_eq!(render_value(Some(&json!({"a": 1}))), "{\"a\":1}");
    }

    #[test]
    fn test_child_record_count() {
        assert_eq!(child_record_count(Some(&json!([{}, {}]))), 2);
        assert_eq!(
            child_record_count(Some(&json!({"totalSize": 3, "records": [{}, {}, {}]}))),
            3
        );
        assert_eq!(child_record_count(Some(&Value::Null)), 0);
        assert_eq!(child_record_count(None), 0);
    }
}
