//! Metadata operation outcome messages

use crate::crm::SaveResult;
use crate::metadata::MetadataOperation;

/// What a metadata operation acted on
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MetadataTarget {
    /// `Feedback__c`
    Object { full_name: String },
    /// `Rating__c` on `Account`
    Field { object_name: String, api_name: String },
}

impl std::fmt::Display for MetadataTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MetadataTarget::Object { full_name } => write!(f, "custom object {}", full_name),
            MetadataTarget::Field {
                object_name,
                api_name,
            } => write!(f, "custom field {} on {}", api_name, object_name),
        }
    }
}

fn past_tense(operation: MetadataOperation) -> &'static str {
    match operation {
        MetadataOperation::Create => "created",
        MetadataOperation::Update => "updated",
    }
}

pub fn format_metadata_success(operation: MetadataOperation, target: &MetadataTarget) -> String {
    format!("Successfully {} {}", past_tense(operation), target)
}

/// `Failed to <op> <target>[: <save errors>]`
pub fn format_metadata_failure(
    operation: MetadataOperation,
    target: &MetadataTarget,
    result: &SaveResult,
) -> String {
    let mut message = format!("Failed to {} {}", operation, target);
    if let Some(summary) = result.error_summary() {
        message.push_str(": ");
        message.push_str(&summary);
    }
    message
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crm::RecordError;

    #[test]
    fn test_success_messages() {
        let object = MetadataTarget::Object {
            full_name: "Feedback__c".into(),
        };
        assert_eq!(
            format_metadata_success(MetadataOperation::Create, &object),
            "Successfully created custom object Feedback__c"
        );

        let field = MetadataTarget::Field {
            object_name: "Account".into(),
            api_name: "Rating__c".into(),
        };
        assert_eq!(
            format_metadata_success(MetadataOperation::Update, &field),
            "Successfully updated custom field Rating__c on Account"
        );
    }

    #[test]
    fn test_failure_with_errors() {
        let target = MetadataTarget::Object {
            full_name: "Feedback__c".into(),
        };
        let result = SaveResult::failed(vec![
            RecordError::new("duplicate developer name").with_status_code("DUPLICATE_DEVELOPER_NAME"),
        ]);
        assert_eq!(
            format_metadata_failure(MetadataOperation::Create, &target, &result),
            "Failed to create custom object Feedback__c: duplicate developer name [DUPLICATE_DEVELOPER_NAME]"
        );
    }

    #[test]
    fn test_failure_without_errors() {
        let target = MetadataTarget::Field {
            object_name: "Account".into(),
            api_name: "Rating__c".into(),
        };
        let result = SaveResult {
            full_name: None,
            success: false,
            errors: None,
        };
        assert_eq!(
            format_metadata_failure(MetadataOperation::Update, &target, &result),
            "Failed to update custom field Rating__c on Account"
        );
    }
}
