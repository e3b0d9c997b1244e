//! Multi-object search result formatting

use super::render_value;
use crate::crm::SearchResult;
use crate::search::SearchSpec;
use serde_json::Value;

/// Render search hits grouped by requested object, in request order
///
/// Hits are bucketed by their `attributes.type`; a hit whose type matches
/// none of the requested objects is not shown.
pub fn format_search_result(spec: &SearchSpec, result: &SearchResult) -> String {
    let sections: Vec<String> = spec
        .objects
        .iter()
        .map(|object| {
            let hits: Vec<&Value> = result
                .search_records
                .iter()
                .filter(|record| record_type(record) == Some(object.name.as_str()))
                .collect();

            let mut section = format!("\n{} ({} records found):\n", object.name, hits.len());
            for (index, record) in hits.iter().enumerate() {
                section.push_str(&format!("  Record {}:\n", index + 1));
                for field in &object.fields {
                    section.push_str(&format!("    {}: {}\n", field, render_value(record.get(field))));
                }
                if spec.include_metadata {
                    let modified = record
                        .get("attributes")
                        .and_then(|a| a.get("lastModifiedDate"));
                    section.push_str(&format!(
                        "    Metadata:\n      Last Modified: {}\n",
                        render_value(modified)
                    ));
                }
                if spec.include_snippets {
                    section.push_str(&format!("    Snippets:\n{}\n", format_snippets(record)));
                }
            }
            section
        })
        .collect();

    format!("Search Results:{}", sections.join("\n"))
}

fn record_type(record: &Value) -> Option<&str> {
    record.get("attributes")?.get("type")?.as_str()
}

fn format_snippets(record: &Value) -> String {
    let lines: Vec<String> = record
        .get("snippets")
        .and_then(Value::as_array)
        .map(|snippets| {
            snippets
                .iter()
                .map(|s| {
                    format!(
                        "      {}: {}",
                        render_value(s.get("field")),
                        render_value(s.get("snippet"))
                    )
                })
                .collect()
        })
        .unwrap_or_default();

    if lines.is_empty() {
        "      None".to_string()
    } else {
        lines.join("\n")
    }
}
