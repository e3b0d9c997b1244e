//! Query result formatting

use super::{child_record_count, render_value};
use crate::crm::QueryResult;
use crate::query::FieldExpr;
use serde_json::Value;

/// Render a query result, one block per record and one line per requested field
///
/// ```text
/// Query returned 1 records:
///
/// Record 1:
///     Name: Acme
///     Account.Owner.Name: null
///     Contacts: [2 records]
/// ```
pub fn format_query_result(fields: &[FieldExpr], result: &QueryResult) -> String {
    let blocks: Vec<String> = result
        .records
        .iter()
        .enumerate()
        .map(|(index, record)| {
            let lines: Vec<String> = fields
                .iter()
                .map(|field| format!("    {}", format_field(record, field)))
                .collect();
            format!("Record {}:\n{}", index + 1, lines.join("\n"))
        })
        .collect();

    format!(
        "Query returned {} records:\n\n{}",
        result.records.len(),
        blocks.join("\n\n")
    )
}

fn format_field(record: &Value, field: &FieldExpr) -> String {
    match field {
        FieldExpr::Plain(name) => format!("{}: {}", name, render_value(record.get(name))),
        FieldExpr::ParentPath(segments) => format_path(record, segments),
        FieldExpr::SubQuery { text, relationship } => match relationship {
            Some(name) => format!("{}: [{} records]", name, child_record_count(record.get(name))),
            None => format!("{}: Invalid subquery format", text),
        },
    }
}

/// Walk the parent chain; stop with `null` at the first missing link
fn format_path(record: &Value, segments: &[String]) -> String {
    let full = segments.join(".");
    let Some((leaf, parents)) = segments.split_last() else {
        return format!("{}: null", full);
    };

    let mut current = record;
    for segment in parents {
        match current.get(segment) {
            Some(next) if next.is_object() => current = next,
            _ => return format!("{}: null", full),
        }
    }
    format!("{}: {}", full, render_value(current.get(leaf)))
}
