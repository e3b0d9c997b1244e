//! Tool dispatcher: the concrete [`ToolExecutorPort`]
//!
//! ```text
//! execute(call)
//!   ├─ resolve name (canonical or alias)   → UnknownTool
//!   ├─ validate against the definition     → InvalidArguments
//!   ├─ coerce into ValidatedArgs           → InvalidArguments / InvalidRelationshipField / ...
//!   ├─ connect                             → Upstream
//!   └─ run handler                         → Upstream / NotFound
//! ```
//!
//! Every step, including a panic anywhere below it, ends in a [`ToolResult`]:
//! nothing escapes to the protocol layer.

use super::args::ValidatedArgs;
use super::catalog::{default_tool_spec, read_only_tool_spec};
use crate::ports::crm_connection::ConnectionFactory;
use crate::ports::tool_executor::ToolExecutorPort;
use async_trait::async_trait;
use futures::FutureExt;
use sfmcp_domain::{DefaultToolValidator, ToolCall, ToolError, ToolResult, ToolSpec, ToolValidator};
use std::panic::AssertUnwindSafe;
use std::time::Instant;
use tracing::{debug, warn};

/// Routes tool calls to their handlers
///
/// | Constructor | Tools |
/// |-------------|-------|
/// | [`new()`](Self::new) | all seven |
/// | [`read_only()`](Self::read_only) | the four that never change the org |
/// | [`with_tools()`](Self::with_tools) | a custom [`ToolSpec`] |
pub struct ToolDispatcher<F: ConnectionFactory> {
    factory: F,
    tool_spec: ToolSpec,
    validator: DefaultToolValidator,
}

impl<F: ConnectionFactory> ToolDispatcher<F> {
    pub fn new(factory: F) -> Self {
        Self::with_tools(factory, default_tool_spec())
    }

    pub fn read_only(factory: F) -> Self {
        Self::with_tools(factory, read_only_tool_spec())
    }

    pub fn with_tools(factory: F, tool_spec: ToolSpec) -> Self {
        Self {
            factory,
            tool_spec,
            validator: DefaultToolValidator,
        }
    }

    async fn dispatch(&self, call: &ToolCall) -> Result<String, ToolError> {
        let definition = self
            .tool_spec
            .get_resolved(&call.tool_name)
            .ok_or_else(|| ToolError::UnknownTool(call.tool_name.clone()))?;

        self.validator.validate(call, definition)?;
        let args = ValidatedArgs::from_call(&definition.name, call)?;

        let conn = self.factory.connect().await.map_err(|e| {
            ToolError::upstream(format!("Failed to connect to Salesforce: {}", e))
        })?;
        args.run(conn.as_ref()).await
    }
}

#[async_trait]
impl<F: ConnectionFactory> ToolExecutorPort for ToolDispatcher<F> {
    fn tool_spec(&self) -> &ToolSpec {
        &self.tool_spec
    }

    async fn execute(&self, call: &ToolCall) -> ToolResult {
        let started = Instant::now();
        let outcome = AssertUnwindSafe(self.dispatch(call))
            .catch_unwind()
            .await
            .unwrap_or_else(|_| {
                Err(ToolError::upstream(format!(
                    "Internal panic while handling {}",
                    call.tool_name
                )))
            });

        let elapsed_ms = started.elapsed().as_millis() as u64;
        match &outcome {
            Ok(_) => debug!(tool = %call.tool_name, elapsed_ms, "Tool call succeeded"),
            Err(e) => warn!(tool = %call.tool_name, code = e.code(), elapsed_ms, "Tool call failed: {}", e),
        }
        ToolResult::from(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::use_cases::testing::{MockConnection, MockFactory};
    use serde_json::json;
    use sfmcp_domain::{DescribeResult, SearchResult};

    #[tokio::test]
    async fn test_unknown_tool() {
        let dispatcher = ToolDispatcher::new(MockFactory::new(MockConnection::new()));
        let result = dispatcher.invoke("drop_org", Some(json!({}))).await;

        assert!(result.is_error);
        assert_eq!(result.text(), "Unknown tool: drop_org");
        assert_eq!(dispatcher.factory.connect_count(), 0);
    }

    #[tokio::test]
    async fn test_missing_arguments_bag() {
        let dispatcher = ToolDispatcher::new(MockFactory::new(MockConnection::new()));
        let result = dispatcher.invoke("salesforce_describe_object", None).await;

        assert!(result.is_error);
        assert_eq!(result.text(), "Error: Arguments are required");
    }

    #[tokio::test]
    async fn test_missing_required_argument_never_connects() {
        let dispatcher = ToolDispatcher::new(MockFactory::new(MockConnection::new()));
        let result = dispatcher
            .invoke("salesforce_query_records", Some(json!({"objectName": "Account"})))
            .await;

        assert!(result.is_error);
        assert_eq!(
            result.text(),
            "Error: Missing required parameter 'fields' for tool 'salesforce_query_records'"
        );
        assert_eq!(dispatcher.factory.connect_count(), 0);
    }

    #[tokio::test]
    async fn test_blank_names_never_connect() {
        let dispatcher = ToolDispatcher::new(MockFactory::new(MockConnection::new()));
        let cases = [
            ("search_objects", json!({"searchPattern": ""}), "searchPattern is required"),
            ("describe_object", json!({"objectName": "  "}), "objectName is required"),
            (
                "query_records",
                json!({"objectName": "", "fields": ["Id"]}),
                "objectName is required",
            ),
            (
                "dml_records",
                json!({"operation": "insert", "objectName": "", "records": [{"Name": "A"}]}),
                "objectName is required",
            ),
            (
                "manage_object",
                json!({"operation": "update", "objectName": " ", "label": "X"}),
                "objectName is required",
            ),
            (
                "manage_field",
                json!({"operation": "update", "objectName": "Account", "fieldName": ""}),
                "fieldName is required",
            ),
            (
                "search_all",
                json!({"searchTerm": "John", "objects": [{"name": "", "fields": ["Name"]}]}),
                "Object name is required",
            ),
        ];

        for (tool, args, message) in cases {
            let result = dispatcher.invoke(tool, Some(args)).await;
            assert!(result.is_error, "{}", tool);
            assert_eq!(result.text(), format!("Error: {}", message));
        }
        assert_eq!(dispatcher.factory.connect_count(), 0);
        assert!(dispatcher.factory.connection().calls().is_empty());
    }

    #[tokio::test]
    async fn test_upsert_without_external_id_makes_no_remote_call() {
        let dispatcher = ToolDispatcher::new(MockFactory::new(MockConnection::new()));
        let result = dispatcher
            .invoke(
                "dml_records",
                Some(json!({"operation": "upsert", "objectName": "Account", "records": [{"Name": "A"}]})),
            )
            .await;

        assert!(result.is_error);
        assert_eq!(result.text(), "Error: externalIdField is required for upsert operations");
        assert_eq!(dispatcher.factory.connect_count(), 0);
        assert!(dispatcher.factory.connection().calls().is_empty());
    }

    #[tokio::test]
    async fn test_alias_reaches_handler() {
        let conn = MockConnection::new().with_search_result(SearchResult {
            search_records: vec![
                json!({"attributes": {"type": "Contact"}, "FirstName": "John", "LastName": "Smith"}),
                json!({"attributes": {"type": "Contact"}, "FirstName": "John", "LastName": "Doe"}),
            ],
        });
        let dispatcher = ToolDispatcher::new(MockFactory::new(conn));
        let result = dispatcher
            .invoke(
                "search_all",
                Some(json!({
                    "searchTerm": "John",
                    "objects": [{"name": "Contact", "fields": ["FirstName", "LastName"]}]
                })),
            )
            .await;

        assert!(result.is_success());
        assert!(result.text().contains("Contact (2 records found):"));
        assert_eq!(dispatcher.factory.connect_count(), 1);
    }

    #[tokio::test]
    async fn test_describe_twice_is_identical() {
        let conn = MockConnection::new().with_describe(DescribeResult {
            name: "Account".into(),
            label: "Account".into(),
            custom: false,
            fields: vec![],
        });
        let dispatcher = ToolDispatcher::new(MockFactory::new(conn));
        let args = json!({"objectName": "Account"});

        let first = dispatcher.invoke("describe_object", Some(args.clone())).await;
        let second = dispatcher.invoke("describe_object", Some(args)).await;
        assert_eq!(first, second);
        assert!(first.is_success());
    }

    #[tokio::test]
    async fn test_connection_failure_becomes_error_result() {
        let dispatcher = ToolDispatcher::new(MockFactory::refusing());
        let result = dispatcher
            .invoke("search_objects", Some(json!({"searchPattern": "Account"})))
            .await;

        assert!(result.is_error);
        assert_eq!(
            result.text(),
            "Error: Failed to connect to Salesforce: Authentication failed: INVALID_LOGIN: bad password"
        );
    }

    #[tokio::test]
    async fn test_panicking_handler_is_contained() {
        let dispatcher = ToolDispatcher::new(MockFactory::new(MockConnection::new().panicking()));
        let result = dispatcher
            .invoke("describe_object", Some(json!({"objectName": "Account"})))
            .await;

        assert!(result.is_error);
        assert_eq!(result.text(), "Error: Internal panic while handling describe_object");
    }

    #[tokio::test]
    async fn test_read_only_hides_mutations() {
        let dispatcher = ToolDispatcher::read_only(MockFactory::new(MockConnection::new()));
        assert!(!dispatcher.has_tool("salesforce_dml_records"));
        assert!(dispatcher.has_tool("query_records"));

        let result = dispatcher
            .invoke(
                "salesforce_manage_object",
                Some(json!({"operation": "create", "objectName": "X"})),
            )
            .await;
        assert_eq!(result.text(), "Unknown tool: salesforce_manage_object");
    }

    #[tokio::test]
    async fn test_manage_field_update_not_found() {
        let dispatcher = ToolDispatcher::new(MockFactory::new(MockConnection::new()));
        let result = dispatcher
            .invoke(
                "manage_field",
                Some(json!({"operation": "update", "objectName": "Account", "fieldName": "Ghost"})),
            )
            .await;

        assert!(result.is_error);
        assert_eq!(result.text(), "Error: Field Ghost__c not found on object Account");
        assert_eq!(
            dispatcher.factory.connection().calls(),
            vec!["metadata_read CustomField Account.Ghost__c"]
        );
    }
}
