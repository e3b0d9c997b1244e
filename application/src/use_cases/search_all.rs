//! `salesforce_search_all`: SOSL across several objects

use crate::ports::crm_connection::CrmConnection;
use sfmcp_domain::format::format_search_result;
use sfmcp_domain::remediation::{ErrorContext, remediate};
use sfmcp_domain::{
    ParamKind, RiskLevel, SearchIn, SearchSpec, ToolDefinition, ToolError, ToolParameter,
    WithClauseKind,
};
use tracing::debug;

pub const NAME: &str = "salesforce_search_all";
pub const ALIAS: &str = "search_all";

pub fn definition() -> ToolDefinition {
    ToolDefinition::new(
        NAME,
        "Search across multiple objects using SOSL.\n\n\
         Examples:\n\
         1. Basic: searchTerm \"John\", objects [{\"name\": \"Account\", \"fields\": [\"Name\"], \"limit\": 10}, \
         {\"name\": \"Contact\", \"fields\": [\"FirstName\", \"LastName\", \"Email\"]}]\n\
         2. Filtered: searchTerm \"Cloud*\", searchIn \"NAME FIELDS\", objects with \"where\" and \"orderBy\"\n\
         3. WITH clauses: withClauses [{\"type\": \"NETWORK\", \"value\": \"ALL NETWORKS\"}, \
         {\"type\": \"SNIPPET\", \"fields\": [\"Description\"]}]\n\n\
         Use * and ? as wildcards in the search term.",
        RiskLevel::Low,
    )
    .with_parameter(ToolParameter::new(
        "searchTerm",
        "Text to search for (supports wildcards * and ?)",
        true,
    ))
    .with_parameter(
        ToolParameter::new(
            "searchIn",
            "Which fields to search in (default: ALL FIELDS)",
            false,
        )
        .with_enum(SearchIn::ALL.iter().map(|s| s.as_str())),
    )
    .with_parameter(
        ToolParameter::new("objects", "List of objects to search and their return fields", true)
            .with_object_items(vec![
                ToolParameter::new("name", "API name of the object", true),
                ToolParameter::new("fields", "Fields to return for this object", true)
                    .with_items(ParamKind::String),
                ToolParameter::new("where", "WHERE clause for this object", false),
                ToolParameter::new("orderBy", "ORDER BY clause for this object", false),
                ToolParameter::new("limit", "Maximum number of records to return", false)
                    .with_kind(ParamKind::Number),
            ]),
    )
    .with_parameter(
        ToolParameter::new("withClauses", "Additional WITH clauses for the search", false)
            .with_object_items(vec![
                ToolParameter::new("type", "WITH clause type", true)
                    .with_enum(WithClauseKind::KNOWN),
                ToolParameter::new("value", "Value for the WITH clause", false),
                ToolParameter::new("fields", "Fields for SNIPPET clause", false)
                    .with_items(ParamKind::String),
            ]),
    )
    .with_parameter(
        ToolParameter::new("updateable", "Return only updateable records", false)
            .with_kind(ParamKind::Boolean),
    )
    .with_parameter(
        ToolParameter::new("viewable", "Return only viewable records", false)
            .with_kind(ParamKind::Boolean),
    )
}

pub async fn execute(conn: &dyn CrmConnection, spec: &SearchSpec) -> Result<String, ToolError> {
    let sosl = spec.to_sosl();
    debug!(objects = spec.objects.len(), "Running SOSL search");

    let result = conn.search(&sosl).await.map_err(|e| {
        ToolError::upstream(format!(
            "Failed to execute search: {}",
            remediate(ErrorContext::Search, &e.to_string())
        ))
    })?;
    Ok(format_search_result(spec, &result))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::use_cases::testing::MockConnection;
    use serde_json::json;
    use sfmcp_domain::{SearchObject, SearchRequest, SearchResult};

    #[tokio::test]
    async fn test_search_two_contacts() {
        let conn = MockConnection::new().with_search_result(SearchResult {
            search_records: vec![
                json!({"attributes": {"type": "Contact"}, "FirstName": "John", "LastName": "Smith"}),
                json!({"attributes": {"type": "Contact"}, "FirstName": "Johnny", "LastName": null}),
            ],
        });
        let spec = SearchRequest::new(
            "John",
            vec![SearchObject::new("Contact", ["FirstName", "LastName"])],
        )
        .into_spec()
        .unwrap();

        let text = execute(&conn, &spec).await.unwrap();
        assert!(text.starts_with("Search Results:"));
        assert!(text.contains("Contact (2 records found):"));
        assert!(text.contains("    FirstName: John\n    LastName: Smith"));
        assert!(text.contains("    LastName: null"));
        assert_eq!(
            conn.calls(),
            vec!["search FIND {John} IN ALL FIELDS RETURNING Contact(FirstName,LastName)"]
        );
    }

    #[tokio::test]
    async fn test_search_failure_is_remediated() {
        let conn = MockConnection::new().failing_with("MALFORMED_SEARCH", "unexpected token");
        let spec = SearchRequest::new("x", vec![SearchObject::new("Account", ["Name"])])
            .into_spec()
            .unwrap();

        let err = execute(&conn, &spec).await.unwrap_err();
        let text = err.to_string();
        assert!(text.starts_with("Failed to execute search: Invalid search query format."));
        assert!(text.ends_with("Original error: MALFORMED_SEARCH: unexpected token"));
    }
}
