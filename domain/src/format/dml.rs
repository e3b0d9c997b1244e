//! Bulk mutation result formatting

use crate::crm::DmlResult;
use crate::dml::DmlOperation;

/// Summarize per-record outcomes
///
/// Partial failure is not an error: the summary always reports both counts
/// and lists each failing record's errors.
pub fn format_dml_results(operation: DmlOperation, results: &[DmlResult]) -> String {
    let succeeded = results.iter().filter(|r| r.success).count();
    let failed = results.len() - succeeded;

    let mut text = format!(
        "{} operation completed.\nProcessed {} records:\n- Successful: {}\n- Failed: {}\n\n",
        operation.as_str().to_uppercase(),
        results.len(),
        succeeded,
        failed
    );

    if failed == 0 {
        return text;
    }

    text.push_str("Errors:\n");
    for (index, result) in results.iter().enumerate() {
        let Some(errors) = result.errors.as_ref().filter(|_| !result.success) else {
            continue;
        };
        text.push_str(&format!("Record {}:\n", index + 1));
        for error in errors.as_slice() {
            text.push_str(&format!("  - {}", error.message));
            if let Some(code) = error.status_code.as_deref().filter(|c| !c.is_empty()) {
                text.push_str(&format!(" [{}]", code));
            }
            if !error.field_names().is_empty() {
                text.push_str(&format!("\n    Fields: {}", error.field_names().join(", ")));
            }
            text.push('\n');
        }
    }
    text
}
