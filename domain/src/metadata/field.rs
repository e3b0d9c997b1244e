//! Custom field metadata

use super::{MetadataOperation, custom_name, non_empty};
use crate::tool::ToolError;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Length forced on long text areas
pub const LONG_TEXT_LENGTH: u32 = 32768;
/// Visible lines forced on long text areas
pub const LONG_TEXT_VISIBLE_LINES: u32 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FieldType {
    Checkbox,
    Currency,
    Date,
    DateTime,
    Email,
    Number,
    Percent,
    Phone,
    Picklist,
    MultiselectPicklist,
    Text,
    TextArea,
    LongTextArea,
    Html,
    Url,
    Lookup,
    MasterDetail,
}

impl FieldType {
    pub const ALL: [&'static str; 17] = [
        "Checkbox",
        "Currency",
        "Date",
        "DateTime",
        "Email",
        "Number",
        "Percent",
        "Phone",
        "Picklist",
        "MultiselectPicklist",
        "Text",
        "TextArea",
        "LongTextArea",
        "Html",
        "Url",
        "Lookup",
        "MasterDetail",
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FieldType::Checkbox => "Checkbox",
            FieldType::Currency => "Currency",
            FieldType::Date => "Date",
            FieldType::DateTime => "DateTime",
            FieldType::Email => "Email",
            FieldType::Number => "Number",
            FieldType::Percent => "Percent",
            FieldType::Phone => "Phone",
            FieldType::Picklist => "Picklist",
            FieldType::MultiselectPicklist => "MultiselectPicklist",
            FieldType::Text => "Text",
            FieldType::TextArea => "TextArea",
            FieldType::LongTextArea => "LongTextArea",
            FieldType::Html => "Html",
            FieldType::Url => "Url",
            FieldType::Lookup => "Lookup",
            FieldType::MasterDetail => "MasterDetail",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeleteConstraint {
    Cascade,
    Restrict,
    SetNull,
}

impl DeleteConstraint {
    pub const ALL: [&'static str; 3] = ["Cascade", "Restrict", "SetNull"];

    pub fn as_str(&self) -> &'static str {
        match self {
            DeleteConstraint::Cascade => "Cascade",
            DeleteConstraint::Restrict => "Restrict",
            DeleteConstraint::SetNull => "SetNull",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PicklistValueInput {
    pub label: String,
    #[serde(default)]
    pub is_default: bool,
}

/// Arguments of `manage_field`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ManageFieldRequest {
    pub operation: MetadataOperation,
    pub object_name: String,
    pub field_name: String,
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default, rename = "type")]
    pub field_type: Option<FieldType>,
    #[serde(default)]
    pub required: Option<bool>,
    #[serde(default)]
    pub unique: Option<bool>,
    #[serde(default)]
    pub external_id: Option<bool>,
    #[serde(default)]
    pub length: Option<u32>,
    #[serde(default)]
    pub precision: Option<u32>,
    #[serde(default)]
    pub scale: Option<u32>,
    #[serde(default)]
    pub reference_to: Option<String>,
    #[serde(default)]
    pub relationship_label: Option<String>,
    #[serde(default)]
    pub relationship_name: Option<String>,
    #[serde(default)]
    pub delete_constraint: Option<DeleteConstraint>,
    #[serde(default)]
    pub picklist_values: Option<Vec<PicklistValueInput>>,
    #[serde(default)]
    pub description: Option<String>,
}

impl ManageFieldRequest {
    /// Checks shared by create and update
    pub fn validate(&self) -> Result<(), ToolError> {
        ToolError::require_non_blank("objectName", &self.object_name)?;
        ToolError::require_non_blank("fieldName", &self.field_name)
    }

    /// `Object.Field__c`
    pub fn full_name(&self) -> String {
        format!("{}.{}", self.object_name, custom_name(&self.field_name))
    }

    /// `Field__c`
    pub fn api_name(&self) -> String {
        custom_name(&self.field_name)
    }

    pub fn overrides(&self) -> FieldOverrides {
        FieldOverrides {
            label: self.label.clone(),
            required: self.required,
            unique: self.unique,
            external_id: self.external_id,
            length: self.length,
            precision: self.precision,
            scale: self.scale,
            description: self.description.clone(),
            picklist_values: self.picklist_values.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PicklistValue {
    #[serde(alias = "valueName")]
    pub full_name: String,
    #[serde(default)]
    pub default: bool,
    #[serde(default)]
    pub label: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValueSetDefinition {
    #[serde(default)]
    pub sorted: bool,
    #[serde(default)]
    pub value: Vec<PicklistValue>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValueSet {
    pub value_set_definition: ValueSetDefinition,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ValueSet {
    /// Sorted value set in input order
    pub fn from_inputs(values: &[PicklistValueInput]) -> Self {
        Self {
            value_set_definition: ValueSetDefinition {
                sorted: true,
                value: values
                    .iter()
                    .map(|v| PicklistValue {
                        full_name: v.label.clone(),
                        default: v.is_default,
                        label: Some(v.label.clone()),
                    })
                    .collect(),
            },
            extra: Map::new(),
        }
    }
}

/// Declarative description of a custom field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomFieldMetadata {
    pub full_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub field_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unique: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_id: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub length: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub precision: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scale: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visible_lines: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference_to: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub relationship_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub relationship_label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delete_constraint: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value_set: Option<ValueSet>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl CustomFieldMetadata {
    fn empty(full_name: String) -> Self {
        Self {
            full_name,
            label: None,
            field_type: None,
            required: None,
            unique: None,
            external_id: None,
            length: None,
            precision: None,
            scale: None,
            visible_lines: None,
            reference_to: None,
            relationship_name: None,
            relationship_label: None,
            delete_constraint: None,
            value_set: None,
            description: None,
            extra: Map::new(),
        }
    }

    /// Build the document for a new custom field
    ///
    /// Shaping by type:
    /// - `Lookup` / `MasterDetail`: target, relationship name and label
    ///   (label falls back to the name); delete constraint on `Lookup` only
    /// - `TextArea` / `LongTextArea`: stored as `LongTextArea`, length and
    ///   visible lines fixed
    /// - `Text`: caller length when supplied
    /// - `Number` / `Currency` / `Percent`: precision when supplied, scale
    ///   defaulting to zero
    /// - `Picklist` / `MultiselectPicklist`: sorted value set in input order
    pub fn for_create(request: &ManageFieldRequest) -> Result<Self, ToolError> {
        request.validate()?;
        let field_type = request.field_type.ok_or_else(|| {
            ToolError::invalid_argument("Field type is required for field creation")
        })?;

        let mut doc = Self::empty(request.full_name());
        doc.label = Some(
            non_empty(request.label.as_deref())
                .unwrap_or(request.field_name.as_str())
                .to_string(),
        );
        doc.field_type = Some(field_type.as_str().to_string());
        doc.required = request.required.filter(|v| *v);
        doc.unique = request.unique.filter(|v| *v);
        doc.external_id = request.external_id.filter(|v| *v);
        doc.description = non_empty(request.description.as_deref()).map(str::to_string);

        match field_type {
            FieldType::Lookup | FieldType::MasterDetail => {
                if let Some(target) = non_empty(request.reference_to.as_deref()) {
                    doc.reference_to = Some(target.to_string());
                    doc.relationship_name = request.relationship_name.clone();
                    doc.relationship_label = non_empty(request.relationship_label.as_deref())
                        .map(str::to_string)
                        .or_else(|| request.relationship_name.clone());
                    if field_type == FieldType::Lookup {
                        doc.delete_constraint =
                            request.delete_constraint.map(|c| c.as_str().to_string());
                    }
                }
            }
            FieldType::TextArea | FieldType::LongTextArea => {
                doc.field_type = Some(FieldType::LongTextArea.as_str().to_string());
                doc.length = Some(LONG_TEXT_LENGTH);
                doc.visible_lines = Some(LONG_TEXT_VISIBLE_LINES);
            }
            FieldType::Text => {
                doc.length = request.length.filter(|n| *n > 0);
            }
            FieldType::Number | FieldType::Currency | FieldType::Percent => {
                if let Some(precision) = request.precision.filter(|n| *n > 0) {
                    doc.precision = Some(precision);
                    doc.scale = Some(request.scale.unwrap_or(0));
                }
            }
            FieldType::Picklist | FieldType::MultiselectPicklist => {
                doc.value_set = request.picklist_values.as_deref().map(ValueSet::from_inputs);
            }
            _ => {}
        }

        Ok(doc)
    }

    pub fn is_picklist(&self) -> bool {
        matches!(
            self.field_type.as_deref(),
            Some("Picklist") | Some("MultiselectPicklist")
        )
    }

    pub fn to_value(&self) -> Value {
        serde_json::to_value(self).unwrap_or(Value::Null)
    }

    /// Parse a fetched document
    pub fn from_value(value: Value) -> Result<Self, ToolError> {
        serde_json::from_value(value).map_err(|e| {
            ToolError::upstream(format!("Unexpected CustomField metadata: {}", e))
        })
    }
}

/// Properties an update may change
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldOverrides {
    pub label: Option<String>,
    pub required: Option<bool>,
    pub unique: Option<bool>,
    pub external_id: Option<bool>,
    pub length: Option<u32>,
    pub precision: Option<u32>,
    pub scale: Option<u32>,
    pub description: Option<String>,
    pub picklist_values: Option<Vec<PicklistValueInput>>,
}

/// Overlay `overrides` onto a fetched field document
///
/// | property | rule |
/// |----------|------|
/// | label | replaced when supplied and non-empty |
/// | required, unique, externalId | replaced when supplied, including `false` |
/// | length | replaced when supplied and non-zero |
/// | precision | replaced when supplied and non-zero, scale set alongside (default 0) |
/// | description | replaced when supplied |
/// | picklist values | value set fully replaced, only if the field is a picklist |
/// | everything else | kept |
pub fn merge(baseline: CustomFieldMetadata, overrides: &FieldOverrides) -> CustomFieldMetadata {
    let mut merged = baseline;
    if let Some(label) = non_empty(overrides.label.as_deref()) {
        merged.label = Some(label.to_string());
    }
    if overrides.required.is_some() {
        merged.required = overrides.required;
    }
    if overrides.unique.is_some() {
        merged.unique = overrides.unique;
    }
    if overrides.external_id.is_some() {
        merged.external_id = overrides.external_id;
    }
    if let Some(length) = overrides.length.filter(|n| *n > 0) {
        merged.length = Some(length);
    }
    if let Some(precision) = overrides.precision.filter(|n| *n > 0) {
        merged.precision = Some(precision);
        merged.scale = Some(overrides.scale.unwrap_or(0));
    }
    if let Some(description) = &overrides.description {
        merged.description = Some(description.clone());
    }
    if let Some(values) = overrides.picklist_values.as_ref().filter(|_| merged.is_picklist()) {
        let mut value_set = ValueSet::from_inputs(values);
        if let Some(existing) = merged.value_set.take() {
            value_set.extra = existing.extra;
        }
        merged.value_set = Some(value_set);
    }
    merged
}
