//! `salesforce_describe_object`: field-level schema of one object

use crate::ports::crm_connection::CrmConnection;
use sfmcp_domain::format::format_describe;
use sfmcp_domain::{RiskLevel, ToolDefinition, ToolError, ToolParameter};

pub const NAME: &str = "salesforce_describe_object";
pub const ALIAS: &str = "describe_object";

pub fn definition() -> ToolDefinition {
    ToolDefinition::new(
        NAME,
        "Get detailed schema metadata including all fields, relationships and field \
         properties of any object. Examples: 'Account' shows all Account fields including \
         custom fields; 'Case' shows relationships to Account, Contact and others.",
        RiskLevel::Low,
    )
    .with_parameter(ToolParameter::new(
        "objectName",
        "API name of the object (e.g., 'Account', 'Contact', 'Custom_Object__c')",
        true,
    ))
}

pub async fn execute(conn: &dyn CrmConnection, object_name: &str) -> Result<String, ToolError> {
    let describe = conn.describe(object_name).await.map_err(|e| {
        ToolError::upstream(format!("Failed to describe {}: {}", object_name, e))
    })?;
    Ok(format_describe(&describe))
}
