//! Typed arguments for each tool
//!
//! Everything that can be checked without the org happens here, before a
//! connection is requested: enum values, dotted field paths, the upsert
//! external id, metadata create documents. A call that fails here never
//! touches the network.

use super::manage_field::FieldChange;
use super::manage_object::ObjectChange;
use super::{
    describe_object, dml_records, manage_field, manage_object, query_records, search_all,
    search_objects,
};
use crate::ports::crm_connection::CrmConnection;
use serde::de::DeserializeOwned;
use sfmcp_domain::{
    CustomFieldMetadata, CustomObjectMetadata, DmlPlan, DmlRequest, ManageFieldRequest,
    ManageObjectRequest, MetadataOperation, QueryRequest, QuerySpec, SearchRequest, SearchSpec,
    ToolCall, ToolError,
};

/// A call whose arguments are ready to run
#[derive(Debug, Clone, PartialEq)]
pub enum ValidatedArgs {
    SearchObjects { pattern: String },
    DescribeObject { object_name: String },
    Query(QuerySpec),
    Dml(DmlPlan),
    ManageObject(ObjectChange),
    ManageField(FieldChange),
    SearchAll(SearchSpec),
}

impl ValidatedArgs {
    /// Coerce `call` for the tool named `canonical`
    pub fn from_call(canonical: &str, call: &ToolCall) -> Result<Self, ToolError> {
        match canonical {
            search_objects::NAME => Ok(Self::SearchObjects {
                pattern: required_string(call, "searchPattern")?,
            }),
            describe_object::NAME => Ok(Self::DescribeObject {
                object_name: required_string(call, "objectName")?,
            }),
            query_records::NAME => {
                let request: QueryRequest = parse(canonical, call)?;
                Ok(Self::Query(request.into_spec()?))
            }
            dml_records::NAME => {
                let request: DmlRequest = parse(canonical, call)?;
                Ok(Self::Dml(request.plan()?))
            }
            manage_object::NAME => {
                let request: ManageObjectRequest = parse(canonical, call)?;
                request.validate()?;
                let change = match request.operation {
                    MetadataOperation::Create => {
                        ObjectChange::Create(CustomObjectMetadata::for_create(&request)?)
                    }
                    MetadataOperation::Update => ObjectChange::Update {
                        full_name: request.full_name(),
                        overrides: request.overrides(),
                    },
                };
                Ok(Self::ManageObject(change))
            }
            manage_field::NAME => {
                let request: ManageFieldRequest = parse(canonical, call)?;
                request.validate()?;
                let change = match request.operation {
                    MetadataOperation::Create => FieldChange::Create {
                        document: CustomFieldMetadata::for_create(&request)?,
                        object_name: request.object_name,
                    },
                    MetadataOperation::Update => FieldChange::Update {
                        api_name: request.api_name(),
                        overrides: request.overrides(),
                        object_name: request.object_name,
                    },
                };
                Ok(Self::ManageField(change))
            }
            search_all::NAME => {
                let request: SearchRequest = parse(canonical, call)?;
                Ok(Self::SearchAll(request.into_spec()?))
            }
            other => Err(ToolError::UnknownTool(other.to_string())),
        }
    }

    /// Run the handler for these arguments
    pub async fn run(&self, conn: &dyn CrmConnection) -> Result<String, ToolError> {
        match self {
            Self::SearchObjects { pattern } => search_objects::execute(conn, pattern).await,
            Self::DescribeObject { object_name } => describe_object::execute(conn, object_name).await,
            Self::Query(spec) => query_records::execute(conn, spec).await,
            Self::Dml(plan) => dml_records::execute(conn, plan).await,
            Self::ManageObject(change) => manage_object::execute(conn, change).await,
            Self::ManageField(change) => manage_field::execute(conn, change).await,
            Self::SearchAll(spec) => search_all::execute(conn, spec).await,
        }
    }
}

fn required_string(call: &ToolCall, key: &str) -> Result<String, ToolError> {
    let value = call
        .get_string(key)
        .ok_or_else(|| ToolError::invalid_argument(format!("{} is required", key)))?;
    ToolError::require_non_blank(key, value)?;
    Ok(value.to_string())
}

fn parse<T: DeserializeOwned>(tool: &str, call: &ToolCall) -> Result<T, ToolError> {
    serde_json::from_value(call.arguments_value()).map_err(|e| {
        ToolError::invalid_argument(format!("Invalid arguments for {}: {}", tool, e))
    })
}
