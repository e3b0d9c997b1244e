//! Object catalog and schema formatting

use crate::crm::{DescribeGlobalResult, DescribeResult, FieldDescribe, SObjectSummary};

/// Objects whose API name or label contains every whitespace-separated
/// term of `pattern`, case-insensitively
pub fn match_objects<'a>(global: &'a DescribeGlobalResult, pattern: &str) -> Vec<&'a SObjectSummary> {
    let terms: Vec<String> = pattern
        .split_whitespace()
        .map(str::to_lowercase)
        .collect();

    global
        .sobjects
        .iter()
        .filter(|obj| {
            let name = obj.name.to_lowercase();
            let label = obj.label.to_lowercase();
            terms
                .iter()
                .all(|term| name.contains(term.as_str()) || label.contains(term.as_str()))
        })
        .collect()
}

pub fn format_object_matches(pattern: &str, matches: &[&SObjectSummary]) -> String {
    if matches.is_empty() {
        return format!("No Salesforce objects found matching \"{}\".", pattern);
    }

    let blocks: Vec<String> = matches
        .iter()
        .map(|obj| {
            let custom = if obj.custom { " (Custom)" } else { "" };
            format!("{}{}\n  Label: {}", obj.name, custom, obj.label)
        })
        .collect();

    format!(
        "Found {} matching objects:\n\n{}",
        matches.len(),
        blocks.join("\n\n")
    )
}

pub fn format_describe(describe: &DescribeResult) -> String {
    let custom = if describe.custom { " (Custom Object)" } else { "" };
    let fields: Vec<String> = describe.fields.iter().map(format_field).collect();
    format!(
        "Object: {} ({}){}\nFields:\n{}",
        describe.name,
        describe.label,
        custom,
        fields.join("\n")
    )
}

fn format_field(field: &FieldDescribe) -> String {
    let mut lines = vec![format!("  - {} ({})", field.name, field.label)];

    let mut type_line = format!("    Type: {}", field.field_type);
    if field.length > 0 {
        type_line.push_str(&format!(", Length: {}", field.length));
    }
    lines.push(type_line);
    lines.push(format!("    Required: {}", !field.nillable));

    if !field.reference_to.is_empty() {
        lines.push(format!("    References: {}", field.reference_to.join(", ")));
    }
    if !field.picklist_values.is_empty() {
        let values: Vec<&str> = field
            .picklist_values
            .iter()
            .map(|v| v.value.as_str())
            .collect();
        lines.push(format!("    Picklist Values: {}", values.join(", ")));
    }

    lines.join("\n")
}
