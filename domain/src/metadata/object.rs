//! Custom object metadata

use super::{MetadataOperation, custom_name, non_empty};
use crate::tool::ToolError;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NameFieldType {
    Text,
    AutoNumber,
}

impl NameFieldType {
    pub const ALL: [&'static str; 2] = ["Text", "AutoNumber"];

    pub fn as_str(&self) -> &'static str {
        match self {
            NameFieldType::Text => "Text",
            NameFieldType::AutoNumber => "AutoNumber",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SharingModel {
    #[default]
    ReadWrite,
    Read,
    Private,
    ControlledByParent,
}

impl SharingModel {
    pub const ALL: [&'static str; 4] = ["ReadWrite", "Read", "Private", "ControlledByParent"];

    pub fn as_str(&self) -> &'static str {
        match self {
            SharingModel::ReadWrite => "ReadWrite",
            SharingModel::Read => "Read",
            SharingModel::Private => "Private",
            SharingModel::ControlledByParent => "ControlledByParent",
        }
    }
}

/// Arguments of `manage_object`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ManageObjectRequest {
    pub operation: MetadataOperation,
    pub object_name: String,
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub plural_label: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub name_field_label: Option<String>,
    #[serde(default)]
    pub name_field_type: Option<NameFieldType>,
    #[serde(default)]
    pub name_field_format: Option<String>,
    #[serde(default)]
    pub sharing_model: Option<SharingModel>,
}

impl ManageObjectRequest {
    /// Checks shared by create and update
    pub fn validate(&self) -> Result<(), ToolError> {
        ToolError::require_non_blank("objectName", &self.object_name)
    }

    pub fn full_name(&self) -> String {
        custom_name(&self.object_name)
    }

    pub fn overrides(&self) -> ObjectOverrides {
        ObjectOverrides {
            label: self.label.clone(),
            plural_label: self.plural_label.clone(),
            description: self.description.clone(),
            name_field_label: self.name_field_label.clone(),
            sharing_model: self.sharing_model,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NameField {
    pub label: String,
    #[serde(rename = "type")]
    pub field_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_format: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Declarative description of a custom object
///
/// Properties this crate does not model are kept in `extra` so a fetched
/// document round-trips through `merge` unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomObjectMetadata {
    pub full_name: String,
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plural_label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name_field: Option<NameField>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deployment_status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sharing_model: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl CustomObjectMetadata {
    /// Build the document for a new custom object
    pub fn for_create(request: &ManageObjectRequest) -> Result<Self, ToolError> {
        request.validate()?;
        let (Some(label), Some(plural_label)) = (
            non_empty(request.label.as_deref()),
            non_empty(request.plural_label.as_deref()),
        ) else {
            return Err(ToolError::invalid_argument(
                "Label and pluralLabel are required for object creation",
            ));
        };

        let name_type = request.name_field_type.unwrap_or(NameFieldType::Text);
        let display_format = match name_type {
            NameFieldType::AutoNumber => non_empty(request.name_field_format.as_deref()).map(str::to_string),
            NameFieldType::Text => None,
        };

        Ok(Self {
            full_name: request.full_name(),
            label: Some(label.to_string()),
            plural_label: Some(plural_label.to_string()),
            name_field: Some(NameField {
                label: non_empty(request.name_field_label.as_deref())
                    .map(str::to_string)
                    .unwrap_or_else(|| format!("{} Name", label)),
                field_type: name_type.as_str().to_string(),
                display_format,
                extra: Map::new(),
            }),
            deployment_status: Some("Deployed".to_string()),
            sharing_model: Some(request.sharing_model.unwrap_or_default().as_str().to_string()),
            description: non_empty(request.description.as_deref()).map(str::to_string),
            extra: Map::new(),
        })
    }

    pub fn to_value(&self) -> Value {
        serde_json::to_value(self).unwrap_or(Value::Null)
    }

    /// Parse a fetched document
    pub fn from_value(value: Value) -> Result<Self, ToolError> {
        serde_json::from_value(value).map_err(|e| {
            ToolError::upstream(format!("Unexpected CustomObject metadata: {}", e))
        })
    }
}

/// Properties an update may change
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ObjectOverrides {
    pub label: Option<String>,
    pub plural_label: Option<String>,
    pub description: Option<String>,
    pub name_field_label: Option<String>,
    pub sharing_model: Option<SharingModel>,
}

/// Overlay `overrides` onto a fetched document
///
/// | property | rule |
/// |----------|------|
/// | label, pluralLabel, name field label | replaced when supplied and non-empty |
/// | description | replaced when supplied, even if empty |
/// | sharingModel | replaced when supplied |
/// | everything else | kept |
pub fn merge(baseline: CustomObjectMetadata, overrides: &ObjectOverrides) -> CustomObjectMetadata {
    let mut merged = baseline;
    if let Some(label) = non_empty(overrides.label.as_deref()) {
        merged.label = Some(label.to_string());
    }
    if let Some(plural) = non_empty(overrides.plural_label.as_deref()) {
        merged.plural_label = Some(plural.to_string());
    }
    if let Some(description) = &overrides.description {
        merged.description = Some(description.clone());
    }
    if let (Some(name_label), Some(name_field)) = (
        non_empty(overrides.name_field_label.as_deref()),
        merged.name_field.as_mut(),
    ) {
        name_field.label = name_label.to_string();
    }
    if let Some(sharing) = overrides.sharing_model {
        merged.sharing_model = Some(sharing.as_str().to_string());
    }
    merged
}
