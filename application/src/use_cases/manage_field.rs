//! `salesforce_manage_field`: create or update a custom field

use super::manage_object::finish;
use crate::ports::crm_connection::CrmConnection;
use sfmcp_domain::format::MetadataTarget;
use sfmcp_domain::metadata::field::{DeleteConstraint, merge};
use sfmcp_domain::remediation::{ErrorContext, remediate};
use sfmcp_domain::{
    CustomFieldMetadata, FieldOverrides, FieldType, MetadataKind, MetadataOperation, ParamKind,
    RiskLevel, ToolDefinition, ToolError, ToolParameter,
};

pub const NAME: &str = "salesforce_manage_field";
pub const ALIAS: &str = "manage_field";

pub fn definition() -> ToolDefinition {
    ToolDefinition::new(
        NAME,
        "Create new custom fields or modify existing fields on any object:\n\
         - Field types: Text, Number, Date, Lookup, Picklist and more\n\
         - Properties: required, unique, external ID, length, precision\n\
         - Relationships: lookup or master-detail to another object\n\
         Updates keep every property the call does not mention. \
         The '__c' suffix is added to fieldName automatically.",
        RiskLevel::High,
    )
    .with_parameter(
        ToolParameter::new("operation", "Whether to create a new field or update an existing one", true)
            .with_enum(["create", "update"]),
    )
    .with_parameter(ToolParameter::new(
        "objectName",
        "API name of the object to add or modify the field on",
        true,
    ))
    .with_parameter(ToolParameter::new(
        "fieldName",
        "API name for the field (without __c suffix)",
        true,
    ))
    .with_parameter(ToolParameter::new("label", "Label for the field", false))
    .with_parameter(
        ToolParameter::new("type", "Field type (required for create)", false)
            .with_enum(FieldType::ALL),
    )
    .with_parameter(
        ToolParameter::new("required", "Whether the field is required", false)
            .with_kind(ParamKind::Boolean),
    )
    .with_parameter(
        ToolParameter::new("unique", "Whether the field value must be unique", false)
            .with_kind(ParamKind::Boolean),
    )
    .with_parameter(
        ToolParameter::new("externalId", "Whether the field is an external ID", false)
            .with_kind(ParamKind::Boolean),
    )
    .with_parameter(
        ToolParameter::new("length", "Length for text fields", false).with_kind(ParamKind::Number),
    )
    .with_parameter(
        ToolParameter::new("precision", "Precision for numeric fields", false)
            .with_kind(ParamKind::Number),
    )
    .with_parameter(
        ToolParameter::new("scale", "Scale for numeric fields", false).with_kind(ParamKind::Number),
    )
    .with_parameter(ToolParameter::new(
        "referenceTo",
        "API name of the object to reference (for Lookup/MasterDetail)",
        false,
    ))
    .with_parameter(ToolParameter::new(
        "relationshipLabel",
        "Label for the relationship (for Lookup/MasterDetail)",
        false,
    ))
    .with_parameter(ToolParameter::new(
        "relationshipName",
        "API name for the relationship (for Lookup/MasterDetail)",
        false,
    ))
    .with_parameter(
        ToolParameter::new("deleteConstraint", "Delete constraint for Lookup fields", false)
            .with_enum(DeleteConstraint::ALL),
    )
    .with_parameter(
        ToolParameter::new("picklistValues", "Values for Picklist/MultiselectPicklist fields", false)
            .with_object_items(vec![
                ToolParameter::new("label", "Picklist value label", true),
                ToolParameter::new("isDefault", "Whether this is the default value", false)
                    .with_kind(ParamKind::Boolean),
            ]),
    )
    .with_parameter(ToolParameter::new("description", "Description of the field", false))
}

/// Validated work for one call
#[derive(Debug, Clone, PartialEq)]
pub enum FieldChange {
    Create {
        object_name: String,
        document: CustomFieldMetadata,
    },
    Update {
        object_name: String,
        api_name: String,
        overrides: FieldOverrides,
    },
}

impl FieldChange {
    fn operation(&self) -> MetadataOperation {
        match self {
            FieldChange::Create { .. } => MetadataOperation::Create,
            FieldChange::Update { .. } => MetadataOperation::Update,
        }
    }

    fn target(&self) -> MetadataTarget {
        match self {
            FieldChange::Create {
                object_name,
                document,
            } => MetadataTarget::Field {
                object_name: object_name.clone(),
                api_name: document
                    .full_name
                    .rsplit('.')
                    .next()
                    .unwrap_or(document.full_name.as_str())
                    .to_string(),
            },
            FieldChange::Update {
                object_name,
                api_name,
                ..
            } => MetadataTarget::Field {
                object_name: object_name.clone(),
                api_name: api_name.clone(),
            },
        }
    }
}

pub async fn execute(conn: &dyn CrmConnection, change: &FieldChange) -> Result<String, ToolError> {
    let operation = change.operation();
    let target = change.target();
    let fail = |message: String| {
        ToolError::upstream(remediate(
            ErrorContext::Metadata,
            &format!("Failed to {} {}: {}", operation, target, message),
        ))
    };

    let result = match change {
        FieldChange::Create { document, .. } => conn
            .metadata_create(MetadataKind::CustomField, &document.to_value())
            .await
            .map_err(|e| fail(e.to_string()))?,
        FieldChange::Update {
            object_name,
            api_name,
            overrides,
        } => {
            let full_name = format!("{}.{}", object_name, api_name);
            let existing = conn
                .metadata_read(MetadataKind::CustomField, &full_name)
                .await
                .map_err(|e| fail(e.to_string()))?
                .ok_or_else(|| {
                    ToolError::NotFound(format!(
                        "Field {} not found on object {}",
                        api_name, object_name
                    ))
                })?;
            let merged = merge(CustomFieldMetadata::from_value(existing)?, overrides);
            conn.metadata_update(MetadataKind::CustomField, &merged.to_value())
                .await
                .map_err(|e| fail(e.to_string()))?
        }
    };

    finish(operation, &target, &result)
}
