//! `salesforce_search_objects`: find objects by name or label

use crate::ports::crm_connection::CrmConnection;
use sfmcp_domain::format::{format_object_matches, match_objects};
use sfmcp_domain::{RiskLevel, ToolDefinition, ToolError, ToolParameter};
use tracing::debug;

pub const NAME: &str = "salesforce_search_objects";
pub const ALIAS: &str = "search_objects";

pub fn definition() -> ToolDefinition {
    ToolDefinition::new(
        NAME,
        "Search for standard and custom objects by name pattern. Every word of the \
         pattern must appear in the object's API name or label. Examples: 'Account' \
         finds Account and AccountHistory; 'Order' finds WorkOrder and ServiceOrder__c.",
        RiskLevel::Low,
    )
    .with_parameter(ToolParameter::new(
        "searchPattern",
        "Search pattern to find objects (e.g., 'Account Coverage' finds 'AccountCoverage__c')",
        true,
    ))
}

pub async fn execute(conn: &dyn CrmConnection, pattern: &str) -> Result<String, ToolError> {
    let global = conn
        .describe_global()
        .await
        .map_err(|e| ToolError::upstream(format!("Failed to list objects: {}", e)))?;

    let matches = match_objects(&global, pattern);
    debug!(pattern = %pattern, matches = matches.len(), "Matched objects");
    Ok(format_object_matches(pattern, &matches))
}
