//! Metadata documents for custom objects and fields
//!
//! Both builders work in two modes. Create mode builds a fresh document
//! from the request. Update mode never builds from scratch: the existing
//! document is fetched first and the request's overrides are laid over it
//! with a pure `merge`, so properties the caller did not mention keep their
//! current values.

pub mod field;
pub mod object;

use serde::{Deserialize, Serialize};

pub use field::{CustomFieldMetadata, FieldOverrides, FieldType, ManageFieldRequest};
pub use object::{CustomObjectMetadata, ManageObjectRequest, ObjectOverrides, SharingModel};

/// Suffix the platform gives custom objects and fields
pub const CUSTOM_SUFFIX: &str = "__c";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MetadataOperation {
    Create,
    Update,
}

impl MetadataOperation {
    pub fn as_str(&self) -> &'static str {
        match self {
            MetadataOperation::Create => "create",
            MetadataOperation::Update => "update",
        }
    }
}

impl std::fmt::Display for MetadataOperation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Metadata type a document describes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MetadataKind {
    CustomObject,
    CustomField,
}

impl MetadataKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            MetadataKind::CustomObject => "CustomObject",
            MetadataKind::CustomField => "CustomField",
        }
    }
}

impl std::fmt::Display for MetadataKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Append `__c` unless the name already carries it
pub fn custom_name(name: &str) -> String {
    if name.ends_with(CUSTOM_SUFFIX) {
        name.to_string()
    } else {
        format!("{}{}", name, CUSTOM_SUFFIX)
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|s| !s.is_empty())
}
