//! Domain layer for salesforce-mcp
//!
//! This crate contains the pure core of the server: the tool catalog
//! entities, argument validation, the SOQL and SOSL builders, the metadata
//! document builders and every result formatter. It performs no I/O; the
//! remote org is reached through ports defined in the application layer.
//!
//! # Core Concepts
//!
//! ## Tools
//!
//! Every callable operation is a [`ToolDefinition`] registered in a
//! [`ToolSpec`]. A [`ToolCall`] carries the untyped argument bag and every
//! invocation ends in a [`ToolResult`] envelope, success or failure.
//!
//! ## Builders
//!
//! - [`query`] turns a structured request into SOQL (`SELECT ... FROM ...`)
//! - [`search`] turns a structured request into SOSL (`FIND {...} IN ...`)
//! - [`metadata`] turns object/field requests into metadata documents
//!
//! ## Formatters
//!
//! [`format`] renders remote results back into deterministic text, and
//! [`remediation`] rewrites terse remote error classes into guidance.

pub mod crm;
pub mod dml;
pub mod format;
pub mod metadata;
pub mod query;
pub mod remediation;
pub mod search;
pub mod tool;

// Re-export commonly used types
pub use crm::entities::{
    DescribeGlobalResult, DescribeResult, DmlResult, FieldDescribe, OneOrMany, PicklistEntry,
    QueryResult, Record, RecordError, SObjectSummary, SaveResult, SearchResult,
};
pub use dml::{DmlOperation, DmlPlan, DmlRequest};
pub use metadata::{
    MetadataKind, MetadataOperation,
    field::{CustomFieldMetadata, FieldOverrides, FieldType, ManageFieldRequest},
    object::{CustomObjectMetadata, ManageObjectRequest, ObjectOverrides, SharingModel},
};
pub use query::{FieldExpr, QueryRequest, QuerySpec};
pub use search::{SearchIn, SearchObject, SearchRequest, SearchSpec, WithClause, WithClauseKind};
pub use tool::{
    entities::{ParamItems, ParamKind, RiskLevel, ToolCall, ToolDefinition, ToolParameter, ToolSpec},
    traits::{DefaultToolValidator, ToolValidator},
    value_objects::{ContentBlock, ToolError, ToolResult},
};
