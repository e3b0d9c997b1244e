//! `salesforce_manage_object`: create or update a custom object
//!
//! Updates fetch the existing document first and overlay only what the
//! caller supplied, so unmentioned properties survive.

use crate::ports::crm_connection::CrmConnection;
use sfmcp_domain::format::{MetadataTarget, format_metadata_failure, format_metadata_success};
use sfmcp_domain::metadata::object::{NameFieldType, merge};
use sfmcp_domain::remediation::{ErrorContext, remediate};
use sfmcp_domain::{
    CustomObjectMetadata, MetadataKind, MetadataOperation, ObjectOverrides, RiskLevel,
    SaveResult, SharingModel, ToolDefinition, ToolError, ToolParameter,
};
use tracing::info;

pub const NAME: &str = "salesforce_manage_object";
pub const ALIAS: &str = "manage_object";

pub fn definition() -> ToolDefinition {
    ToolDefinition::new(
        NAME,
        "Create new custom objects or modify existing ones:\n\
         - create: new object with a name field and sharing model\n\
         - update: change label, plural label, description, name field label or sharing model\n\
         Properties not mentioned in an update keep their current values. \
         The '__c' suffix is added to objectName automatically.",
        RiskLevel::High,
    )
    .with_parameter(
        ToolParameter::new("operation", "Whether to create a new object or update an existing one", true)
            .with_enum(["create", "update"]),
    )
    .with_parameter(ToolParameter::new(
        "objectName",
        "API name for the object (without __c suffix)",
        true,
    ))
    .with_parameter(ToolParameter::new("label", "Label for the object", false))
    .with_parameter(ToolParameter::new("pluralLabel", "Plural label for the object", false))
    .with_parameter(ToolParameter::new("description", "Description of the object", false))
    .with_parameter(ToolParameter::new("nameFieldLabel", "Label for the name field", false))
    .with_parameter(
        ToolParameter::new("nameFieldType", "Type of the name field", false)
            .with_enum(NameFieldType::ALL),
    )
    .with_parameter(ToolParameter::new(
        "nameFieldFormat",
        "Display format for AutoNumber name field (e.g., 'A-{0000}')",
        false,
    ))
    .with_parameter(
        ToolParameter::new("sharingModel", "Sharing model for the object", false)
            .with_enum(SharingModel::ALL),
    )
}

/// Validated work for one call
#[derive(Debug, Clone, PartialEq)]
pub enum ObjectChange {
    Create(CustomObjectMetadata),
    Update {
        full_name: String,
        overrides: ObjectOverrides,
    },
}

impl ObjectChange {
    fn operation(&self) -> MetadataOperation {
        match self {
            ObjectChange::Create(_) => MetadataOperation::Create,
            ObjectChange::Update { .. } => MetadataOperation::Update,
        }
    }

    fn target(&self) -> MetadataTarget {
        let full_name = match self {
            ObjectChange::Create(doc) => doc.full_name.clone(),
            ObjectChange::Update { full_name, .. } => full_name.clone(),
        };
        MetadataTarget::Object { full_name }
    }
}

pub async fn execute(conn: &dyn CrmConnection, change: &ObjectChange) -> Result<String, ToolError> {
    let operation = change.operation();
    let target = change.target();
    let fail = |message: String| {
        ToolError::upstream(remediate(
            ErrorContext::Metadata,
            &format!("Failed to {} {}: {}", operation, target, message),
        ))
    };

    let result = match change {
        ObjectChange::Create(doc) => conn
            .metadata_create(MetadataKind::CustomObject, &doc.to_value())
            .await
            .map_err(|e| fail(e.to_string()))?,
        ObjectChange::Update {
            full_name,
            overrides,
        } => {
            let existing = conn
                .metadata_read(MetadataKind::CustomObject, full_name)
                .await
                .map_err(|e| fail(e.to_string()))?
                .ok_or_else(|| ToolError::NotFound(format!("Object {} not found", full_name)))?;
            let merged = merge(CustomObjectMetadata::from_value(existing)?, overrides);
            conn.metadata_update(MetadataKind::CustomObject, &merged.to_value())
                .await
                .map_err(|e| fail(e.to_string()))?
        }
    };

    finish(operation, &target, &result)
}

pub(crate) fn finish(
    operation: MetadataOperation,
    target: &MetadataTarget,
    result: &SaveResult,
) -> Result<String, ToolError> {
    if result.success {
        info!(operation = %operation, target = %target, "Metadata saved");
        Ok(format_metadata_success(operation, target))
    } else {
        Err(ToolError::upstream(remediate(
            ErrorContext::Metadata,
            &format_metadata_failure(operation, target, result),
        )))
    }
}
