//! Tool schema conversion port.
//!
//! Separates "which tools to expose" (domain) from "how to serialize them for
//! the protocol" (infrastructure). The domain layer defines [`ToolDefinition`]
//! and [`ToolSpec`]; this port produces the JSON Schema shape the
//! `tools/list` response carries.

use sfmcp_domain::tool::entities::{ToolDefinition, ToolSpec};

/// Port for converting tool definitions to protocol format (JSON Schema).
pub trait ToolSchemaPort: Send + Sync {
    /// Convert a single tool definition to a `{name, description, inputSchema}` object.
    fn tool_to_schema(&self, tool: &ToolDefinition) -> serde_json::Value;

    /// Convert all tools, in catalog order.
    fn all_tools_schema(&self, spec: &ToolSpec) -> Vec<serde_json::Value> {
        spec.all().map(|t| self.tool_to_schema(t)).collect()
    }

    /// Convert low-risk tools only, in catalog order.
    fn low_risk_tools_schema(&self, spec: &ToolSpec) -> Vec<serde_json::Value> {
        spec.low_risk_tools().map(|t| self.tool_to_schema(t)).collect()
    }
}
