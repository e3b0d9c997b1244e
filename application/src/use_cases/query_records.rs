//! `salesforce_query_records`: SOQL with relationship fields

use crate::ports::crm_connection::CrmConnection;
use sfmcp_domain::format::format_query_result;
use sfmcp_domain::remediation::{ErrorContext, remediate};
use sfmcp_domain::{ParamKind, QuerySpec, RiskLevel, ToolDefinition, ToolError, ToolParameter};
use tracing::debug;

pub const NAME: &str = "salesforce_query_records";
pub const ALIAS: &str = "query_records";

pub fn definition() -> ToolDefinition {
    ToolDefinition::new(
        NAME,
        "Query records from any object using SOQL, including relationship queries.\n\n\
         Examples:\n\
         1. Parent-to-child: objectName \"Account\", fields [\"Name\", \"(SELECT Id, FirstName FROM Contacts)\"]\n\
         2. Child-to-parent: objectName \"Contact\", fields [\"FirstName\", \"Account.Name\"]\n\
         3. Multiple levels: objectName \"Contact\", fields [\"Name\", \"Account.Owner.Name\"]\n\
         4. Related filtering: whereClause \"Account.Industry = 'Technology'\"\n\n\
         Use dot notation for parent relationships (at most 5 levels), parenthesized \
         subqueries for child relationships, and the '__r' suffix for custom relationships.",
        RiskLevel::Low,
    )
    .with_parameter(ToolParameter::new("objectName", "API name of the object to query", true))
    .with_parameter(
        ToolParameter::new(
            "fields",
            "List of fields to retrieve, including relationship fields",
            true,
        )
        .with_items(ParamKind::String),
    )
    .with_parameter(ToolParameter::new(
        "whereClause",
        "WHERE clause, can include conditions on related objects",
        false,
    ))
    .with_parameter(ToolParameter::new(
        "orderBy",
        "ORDER BY clause, can include fields from related objects",
        false,
    ))
    .with_parameter(
        ToolParameter::new("limit", "Maximum number of records to return", false)
            .with_kind(ParamKind::Number),
    )
}

pub async fn execute(conn: &dyn CrmConnection, spec: &QuerySpec) -> Result<String, ToolError> {
    let soql = spec.to_soql();
    debug!(object = %spec.object_name, fields = spec.fields.len(), "Running SOQL query");

    let result = conn.query(&soql).await.map_err(|e| {
        ToolError::upstream(format!(
            "Failed to execute query: {}",
            remediate(ErrorContext::Query, &e.to_string())
        ))
    })?;
    Ok(format_query_result(&spec.fields, &result))
}
