//! Remediation guidance for remote error classes
//!
//! Remote errors carry an upper-case class name (`INVALID_FIELD`,
//! `MALFORMED_SEARCH`, ...) followed by a terse message. The rules below
//! match on the class name and turn the message into a short checklist the
//! caller can act on. Messages that match no rule pass through unchanged.

use regex::Regex;

/// Which handler the error came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorContext {
    Query,
    Search,
    Dml,
    Metadata,
}

/// Class name → guidance, checked in order, first match wins
type Rules = &'static [(&'static str, &'static str)];

const SEARCH_RULES: Rules = &[
    (
        "MALFORMED_SEARCH",
        "Invalid search query format. Common issues:\n\
         1. Search term contains invalid characters\n\
         2. Object or field names are incorrect\n\
         3. Missing required SOSL syntax elements\n\
         4. Invalid WITH clause combination",
    ),
    (
        "INVALID_FIELD",
        "Invalid field specified in RETURNING clause. Please check:\n\
         1. Field names are correct\n\
         2. Fields exist on the specified objects\n\
         3. You have access to all specified fields\n\
         4. WITH SNIPPET fields are valid",
    ),
    (
        "WITH_CLAUSE",
        "Error in WITH clause. Please check:\n\
         1. WITH clause type is supported\n\
         2. WITH clause value is valid\n\
         3. You have permission to use the specified WITH clause",
    ),
];

const SCHEMA_RULES: Rules = &[
    (
        "INVALID_CROSS_REFERENCE_KEY",
        "Invalid cross reference. Please check:\n\
         1. Referenced record Ids exist and belong to the expected object\n\
         2. Lookup targets name an existing object\n\
         3. The referenced records are visible to the connected user",
    ),
    (
        "INSUFFICIENT_ACCESS",
        "Insufficient access. Please check:\n\
         1. The connected user has the required object and field permissions\n\
         2. Metadata changes need the Customize Application permission\n\
         3. Sharing settings grant access to the affected records",
    ),
    (
        "INVALID_TYPE",
        "Invalid type. Please check:\n\
         1. The object API name is spelled correctly\n\
         2. Custom objects and fields carry the '__c' suffix\n\
         3. The object exists in the connected org",
    ),
];

const QUERY_FIELD_PATTERN: &str = r#"(?:No such column |Invalid field: )['"]?([^'")\s]+)"#;

/// Rewrite `message` with guidance for its error class
pub fn remediate(context: ErrorContext, message: &str) -> String {
    match context {
        ErrorContext::Query => remediate_query(message),
        ErrorContext::Search => apply_rules(SEARCH_RULES, message),
        ErrorContext::Dml | ErrorContext::Metadata => apply_rules(SCHEMA_RULES, message),
    }
}

fn apply_rules(rules: Rules, message: &str) -> String {
    rules
        .iter()
        .find(|(class, _)| message.contains(class))
        .map(|(_, guidance)| format!("{}\n\nOriginal error: {}", guidance, message))
        .unwrap_or_else(|| message.to_string())
}

/// Relationship checklist when the offending column is a dotted path
fn remediate_query(message: &str) -> String {
    if !message.contains("INVALID_FIELD") {
        return message.to_string();
    }
    let Some(field) = offending_field(message) else {
        return message.to_string();
    };
    if !field.contains('.') {
        return message.to_string();
    }
    format!(
        "{}\n\nInvalid relationship field \"{}\". Please check:\n\
         1. The relationship name is correct\n\
         2. The field exists on the related object\n\
         3. You have access to the field\n\
         4. For custom relationships, ensure you're using '__r' suffix",
        message, field
    )
}

fn offending_field(message: &str) -> Option<String> {
    let pattern = Regex::new(QUERY_FIELD_PATTERN).ok()?;
    pattern
        .captures(message)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}
