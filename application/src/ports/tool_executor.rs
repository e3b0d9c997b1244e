//! Tool Executor port
//!
//! Defines the interface for executing tools against the org.

use async_trait::async_trait;
use serde_json::Value;
use sfmcp_domain::tool::{
    entities::{ToolCall, ToolDefinition, ToolSpec},
    value_objects::ToolResult,
};

/// Port for tool execution
///
/// This port defines how the protocol surface executes tools.
/// Implementations never fail: every outcome, including an unknown tool
/// name, is reported through the returned [`ToolResult`].
#[async_trait]
pub trait ToolExecutorPort: Send + Sync {
    /// Get the specification of all available tools
    fn tool_spec(&self) -> &ToolSpec;

    /// Check if a tool is available, by canonical name or alias
    fn has_tool(&self, name: &str) -> bool {
        self.tool_spec().get_resolved(name).is_some()
    }

    /// Get the definition of a specific tool
    fn get_tool(&self, name: &str) -> Option<&ToolDefinition> {
        self.tool_spec().get_resolved(name)
    }

    /// Get names of all available tools, in catalog order
    fn available_tools(&self) -> Vec<&str> {
        self.tool_spec().names().collect()
    }

    /// Execute a tool call asynchronously
    async fn execute(&self, call: &ToolCall) -> ToolResult;

    /// Execute a raw `{name, arguments}` request
    async fn invoke(&self, name: &str, arguments: Option<Value>) -> ToolResult {
        match ToolCall::from_arguments(name, arguments) {
            Ok(call) => self.execute(&call).await,
            Err(e) => ToolResult::failure(&e),
        }
    }
}
