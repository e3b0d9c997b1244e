//! Bulk record mutation planning
//!
//! A [`DmlRequest`] is checked and turned into a [`DmlPlan`] before any
//! remote call, so an upsert without an external id field or a delete
//! without record ids never reaches the org.

use crate::crm::Record;
use crate::tool::ToolError;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DmlOperation {
    Insert,
    Update,
    Delete,
    Upsert,
}

impl DmlOperation {
    pub const ALL: [DmlOperation; 4] = [
        DmlOperation::Insert,
        DmlOperation::Update,
        DmlOperation::Delete,
        DmlOperation::Upsert,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            DmlOperation::Insert => "insert",
            DmlOperation::Update => "update",
            DmlOperation::Delete => "delete",
            DmlOperation::Upsert => "upsert",
        }
    }
}

impl std::fmt::Display for DmlOperation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Arguments of `dml_records`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DmlRequest {
    pub operation: DmlOperation,
    pub object_name: String,
    pub records: Vec<Record>,
    #[serde(default)]
    pub external_id_field: Option<String>,
}

/// What to send to the org for a validated request
#[derive(Debug, Clone, PartialEq)]
pub enum DmlPlan {
    Insert { object_name: String, records: Vec<Record> },
    Update { object_name: String, records: Vec<Record> },
    Delete { object_name: String, ids: Vec<String> },
    Upsert {
        object_name: String,
        records: Vec<Record>,
        external_id_field: String,
    },
}

impl DmlRequest {
    pub fn plan(self) -> Result<DmlPlan, ToolError> {
        ToolError::require_non_blank("objectName", &self.object_name)?;
        if self.records.is_empty() {
            return Err(ToolError::invalid_argument(format!(
                "At least one record is required for {} operations",
                self.operation
            )));
        }

        let object_name = self.object_name;
        match self.operation {
            DmlOperation::Insert => Ok(DmlPlan::Insert {
                object_name,
                records: self.records,
            }),
            DmlOperation::Update => Ok(DmlPlan::Update {
                object_name,
                records: self.records,
            }),
            DmlOperation::Delete => {
                let ids = self
                    .records
                    .iter()
                    .enumerate()
                    .map(|(idx, record)| {
                        record
                            .get("Id")
                            .and_then(|v| v.as_str())
                            .filter(|id| !id.is_empty())
                            .map(str::to_string)
                            .ok_or_else(|| {
                                ToolError::invalid_argument(format!(
                                    "Record {} is missing an Id for delete",
                                    idx + 1
                                ))
                            })
                    })
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(DmlPlan::Delete { object_name, ids })
            }
            DmlOperation::Upsert => {
                let external_id_field = self
                    .external_id_field
                    .filter(|f| !f.is_empty())
                    .ok_or_else(|| {
                        ToolError::invalid_argument("externalIdField is required for upsert operations")
                    })?;
                Ok(DmlPlan::Upsert {
                    object_name,
                    records: self.records,
                    external_id_field,
                })
            }
        }
    }
}

impl DmlPlan {
    pub fn operation(&self) -> DmlOperation {
        match self {
            DmlPlan::Insert { .. } => DmlOperation::Insert,
            DmlPlan::Update { .. } => DmlOperation::Update,
            DmlPlan::Delete { .. } => DmlOperation::Delete,
            DmlPlan::Upsert { .. } => DmlOperation::Upsert,
        }
    }
}
