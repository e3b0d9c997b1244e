//! CRM result entities

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A single record as returned by the remote API
pub type Record = serde_json::Map<String, Value>;

/// A value the remote API reports either bare or wrapped in an array
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OneOrMany<T> {
    Many(Vec<T>),
    One(T),
}

impl<T> OneOrMany<T> {
    pub fn as_slice(&self) -> &[T] {
        match self {
            OneOrMany::Many(items) => items,
            OneOrMany::One(item) => std::slice::from_ref(item),
        }
    }

    pub fn into_vec(self) -> Vec<T> {
        match self {
            OneOrMany::Many(items) => items,
            OneOrMany::One(item) => vec![item],
        }
    }

    pub fn is_empty(&self) -> bool {
        self.as_slice().is_empty()
    }
}

impl<T> Default for OneOrMany<T> {
    fn default() -> Self {
        OneOrMany::Many(Vec::new())
    }
}

/// Entry of a global describe
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SObjectSummary {
    pub name: String,
    pub label: String,
    #[serde(default)]
    pub custom: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DescribeGlobalResult {
    #[serde(default)]
    pub sobjects: Vec<SObjectSummary>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PicklistEntry {
    pub value: String,
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub active: bool,
    #[serde(default)]
    pub default_value: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldDescribe {
    pub name: String,
    pub label: String,
    #[serde(rename = "type")]
    pub field_type: String,
    #[serde(default)]
    pub nillable: bool,
    #[serde(default)]
    pub length: u64,
    #[serde(default)]
    pub picklist_values: Vec<PicklistEntry>,
    #[serde(default)]
    pub reference_to: Vec<String>,
}

/// Per-object describe
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DescribeResult {
    pub name: String,
    pub label: String,
    #[serde(default)]
    pub custom: bool,
    #[serde(default)]
    pub fields: Vec<FieldDescribe>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryResult {
    #[serde(default)]
    pub total_size: u64,
    #[serde(default = "default_done")]
    pub done: bool,
    #[serde(default)]
    pub records: Vec<Value>,
}

fn default_done() -> bool {
    true
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResult {
    #[serde(default)]
    pub search_records: Vec<Value>,
}

/// Error attached to a failed record or metadata save
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordError {
    pub message: String,
    #[serde(default, alias = "errorCode", skip_serializing_if = "Option::is_none")]
    pub status_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fields: Option<OneOrMany<String>>,
}

impl RecordError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            status_code: None,
            fields: None,
        }
    }

    pub fn with_status_code(mut self, code: impl Into<String>) -> Self {
        self.status_code = Some(code.into());
        self
    }

    pub fn with_fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.fields = Some(OneOrMany::Many(fields.into_iter().map(Into::into).collect()));
        self
    }

    /// Affected field names, empty when none were reported
    pub fn field_names(&self) -> &[String] {
        self.fields.as_ref().map(OneOrMany::as_slice).unwrap_or(&[])
    }
}

/// Outcome of one record in a bulk mutation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DmlResult {
    #[serde(default)]
    pub id: Option<String>,
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub errors: Option<OneOrMany<RecordError>>,
}

impl DmlResult {
    pub fn ok(id: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            success: true,
            errors: None,
        }
    }

    pub fn failed(errors: Vec<RecordError>) -> Self {
        Self {
            id: None,
            success: false,
            errors: Some(OneOrMany::Many(errors)),
        }
    }
}

/// Outcome of a metadata create or update
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveResult {
    #[serde(default)]
    pub full_name: Option<String>,
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub errors: Option<OneOrMany<RecordError>>,
}

impl SaveResult {
    pub fn ok(full_name: impl Into<String>) -> Self {
        Self {
            full_name: Some(full_name.into()),
            success: true,
            errors: None,
        }
    }

    pub fn failed(errors: Vec<RecordError>) -> Self {
        Self {
            full_name: None,
            success: false,
            errors: Some(OneOrMany::Many(errors)),
        }
    }

    /// Failure detail for a falsy success flag
    ///
    /// Each error renders as `message[ (Field: a, b)][ [CODE]]`; multiple
    /// errors are joined with `, `.
    pub fn error_summary(&self) -> Option<String> {
        let errors = self.errors.as_ref()?.as_slice();
        if errors.is_empty() {
            return None;
        }
        let parts: Vec<String> = errors
            .iter()
            .map(|e| {
                let mut part = e.message.clone();
                if !e.field_names().is_empty() {
                    part.push_str(&format!(" (Field: {})", e.field_names().join(", ")));
                }
                if let Some(code) = &e.status_code {
                    part.push_str(&format!(" [{}]", code));
                }
                part
            })
            .collect();
        Some(parts.join(", "))
    }
}
