//! Newline-delimited JSON-RPC server loop
//!
//! Reads one JSON document per line, answers requests on the writer and
//! keeps quiet for notifications. Stdout belongs to the protocol; all
//! diagnostics go through `tracing`.

use super::error::McpError;
use super::protocol::{Frame, JsonRpcResponse, PROTOCOL_VERSION, SERVER_NAME};
use serde_json::{Value, json};
use sfmcp_application::{ToolExecutorPort, ToolSchemaPort};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};
use tracing::{debug, info, warn};

/// MCP server bound to a tool executor and a schema converter
pub struct McpServer<E, S> {
    executor: E,
    schema: S,
}

impl<E: ToolExecutorPort, S: ToolSchemaPort> McpServer<E, S> {
    pub fn new(executor: E, schema: S) -> Self {
        Self { executor, schema }
    }

    /// Serve on the process's stdin/stdout until stdin closes
    pub async fn serve_stdio(&self) -> Result<(), McpError> {
        let stdin = BufReader::new(tokio::io::stdin());
        let stdout = tokio::io::stdout();
        self.serve(stdin, stdout).await
    }

    pub async fn serve<R, W>(&self, reader: R, mut writer: W) -> Result<(), McpError>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        info!(tools = self.executor.available_tools().len(), "MCP server listening on stdio");
        let mut lines = reader.lines();

        while let Some(line) = lines.next_line().await? {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            if let Some(response) = self.handle_line(line).await {
                let mut json = serde_json::to_string(&response)?;
                json.push('\n');
                writer.write_all(json.as_bytes()).await?;
                writer.flush().await?;
            }
        }

        info!("Input closed, shutting down");
        Ok(())
    }

    /// Handle one raw line; `None` when nothing should be written back
    pub async fn handle_line(&self, line: &str) -> Option<JsonRpcResponse> {
        let value: Value = match serde_json::from_str(line) {
            Ok(value) => value,
            Err(e) => {
                warn!(error = %e, "Unparseable frame");
                return Some(JsonRpcResponse::failure(
                    Value::Null,
                    &McpError::Parse(e.to_string()),
                ));
            }
        };

        match Frame::classify(value) {
            Ok(Frame::Request { id, method, params }) => {
                debug!(method = %method, "Request");
                Some(match self.handle_request(&method, params).await {
                    Ok(result) => JsonRpcResponse::success(id, result),
                    Err(e) => JsonRpcResponse::failure(id, &e),
                })
            }
            Ok(Frame::Notification { method }) => {
                if method == "notifications/initialized" {
                    info!("Client initialized");
                } else {
                    debug!(method = %method, "Ignoring notification");
                }
                None
            }
            Ok(Frame::Response(_)) => {
                debug!("Ignoring response frame");
                None
            }
            Err(e) => Some(JsonRpcResponse::failure(Value::Null, &e)),
        }
    }

    async fn handle_request(&self, method: &str, params: Option<Value>) -> Result<Value, McpError> {
        match method {
            "initialize" => Ok(json!({
                "protocolVersion": PROTOCOL_VERSION,
                "serverInfo": {
                    "name": SERVER_NAME,
                    "version": env!("CARGO_PKG_VERSION"),
                },
                "capabilities": { "tools": {} },
            })),
            "ping" => Ok(json!({})),
            "tools/list" => Ok(json!({
                "tools": self.schema.all_tools_schema(self.executor.tool_spec()),
            })),
            "tools/call" => self.call_tool(params).await,
            other => Err(McpError::MethodNotFound(other.to_string())),
        }
    }

    async fn call_tool(&self, params: Option<Value>) -> Result<Value, McpError> {
        let Some(Value::Object(mut params)) = params else {
            return Err(McpError::InvalidParams("params must be an object".to_string()));
        };
        let name = params
            .get("name")
            .and_then(Value::as_str)
            .ok_or_else(|| McpError::InvalidParams("Tool name is required".to_string()))?
            .to_string();
        let arguments = params.remove("arguments");

        let result = self.executor.invoke(&name, arguments).await;
        Ok(serde_json::to_value(result)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::JsonSchemaToolConverter;
    use async_trait::async_trait;
    use sfmcp_domain::tool::entities::{RiskLevel, ToolCall, ToolDefinition, ToolParameter, ToolSpec};
    use sfmcp_domain::tool::value_objects::{ToolError, ToolResult};

    /// Echoes the `objectName` argument back
    struct EchoExecutor {
        spec: ToolSpec,
    }

    impl EchoExecutor {
        fn new() -> Self {
            let spec = ToolSpec::new().register(
                ToolDefinition::new("echo_object", "Echo an object name", RiskLevel::Low)
                    .with_parameter(ToolParameter::new("objectName", "Object", true)),
            );
            Self { spec }
        }
    }

    #[async_trait]
    impl ToolExecutorPort for EchoExecutor {
        fn tool_spec(&self) -> &ToolSpec {
            &self.spec
        }

        async fn execute(&self, call: &ToolCall) -> ToolResult {
            if !self.has_tool(&call.tool_name) {
                return ToolResult::failure(&ToolError::UnknownTool(call.tool_name.clone()));
            }
            match call.get_string("objectName") {
                Some(name) => ToolResult::success(format!("Object: {}", name)),
                None => ToolResult::failure(&ToolError::InvalidArguments("objectName is required".into())),
            }
        }
    }

    fn server() -> McpServer<EchoExecutor, JsonSchemaToolConverter> {
        McpServer::new(EchoExecutor::new(), JsonSchemaToolConverter)
    }

    async fn roundtrip(line: &str) -> Value {
        let response = server().handle_line(line).await.unwrap();
        serde_json::to_value(response).unwrap()
    }

    #[tokio::test]
    async fn test_initialize() {
        let response = roundtrip(r#"{"jsonrpc":"2.0","id":1,"method":"initialize","params":{}}"#).await;
        assert_eq!(response["id"], 1);
        assert_eq!(response["result"]["protocolVersion"], "2024-11-05");
        assert_eq!(response["result"]["serverInfo"]["name"], "salesforce-mcp");
        assert_eq!(response["result"]["capabilities"], json!({"tools": {}}));
    }

    #[tokio::test]
    async fn test_ping() {
        let response = roundtrip(r#"{"jsonrpc":"2.0","id":"a","method":"ping"}"#).await;
        assert_eq!(response["id"], "a");
        assert_eq!(response["result"], json!({}));
    }

    #[tokio::test]
    async fn test_notification_gets_no_response() {
        let server = server();
        assert!(
            server
                .handle_line(r#"{"jsonrpc":"2.0","method":"notifications/initialized"}"#)
                .await
                .is_none()
        );
        assert!(
            server
                .handle_line(r#"{"jsonrpc":"2.0","method":"notifications/cancelled","params":{}}"#)
                .await
                .is_none()
        );
    }

    #[tokio::test]
    async fn test_tools_list() {
        let response = roundtrip(r#"{"jsonrpc":"2.0","id":2,"method":"tools/list"}"#).await;
        let tools = response["result"]["tools"].as_array().unwrap();
        assert_eq!(tools.len(), 1);
        assert_eq!(tools[0]["name"], "echo_object");
        assert_eq!(tools[0]["inputSchema"]["required"], json!(["objectName"]));
    }

    #[tokio::test]
    async fn test_tools_call_success() {
        let response = roundtrip(
            r#"{"jsonrpc":"2.0","id":3,"method":"tools/call","params":{"name":"echo_object","arguments":{"objectName":"Account"}}}"#,
        )
        .await;
        assert_eq!(
            response["result"],
            json!({"content": [{"type": "text", "text": "Object: Account"}], "isError": false})
        );
    }

    #[tokio::test]
    async fn test_tools_call_unknown_tool_is_an_envelope() {
        let response = roundtrip(
            r#"{"jsonrpc":"2.0","id":4,"method":"tools/call","params":{"name":"nope","arguments":{"x":1}}}"#,
        )
        .await;
        assert!(response.get("error").is_none());
        assert_eq!(response["result"]["isError"], true);
        assert_eq!(response["result"]["content"][0]["text"], "Unknown tool: nope");
    }

    #[tokio::test]
    async fn test_tools_call_without_arguments() {
        let response = roundtrip(
            r#"{"jsonrpc":"2.0","id":5,"method":"tools/call","params":{"name":"echo_object"}}"#,
        )
        .await;
        assert_eq!(response["result"]["isError"], true);
        assert_eq!(response["result"]["content"][0]["text"], "Error: Arguments are required");
    }

    #[tokio::test]
    async fn test_tools_call_without_name() {
        let response = roundtrip(r#"{"jsonrpc":"2.0","id":6,"method":"tools/call","params":{}}"#).await;
        assert_eq!(response["error"]["code"], -32602);
    }

    #[tokio::test]
    async fn test_unknown_method() {
        let response = roundtrip(r#"{"jsonrpc":"2.0","id":7,"method":"resources/list"}"#).await;
        assert_eq!(response["id"], 7);
        assert_eq!(response["error"]["code"], -32601);
    }

    #[tokio::test]
    async fn test_parse_error() {
        let response = roundtrip("{not json").await;
        assert_eq!(response["id"], Value::Null);
        assert_eq!(response["error"]["code"], -32700);
        assert!(response["error"]["message"].as_str().unwrap().starts_with("Parse error: "));
    }

    #[tokio::test]
    async fn test_invalid_request() {
        let response = roundtrip("[1,2,3]").await;
        assert_eq!(response["error"]["code"], -32600);
        assert_eq!(response["error"]["message"], "Invalid Request");
    }

    #[tokio::test]
    async fn test_serve_writes_one_line_per_request() {
        let input = concat!(
            r#"{"jsonrpc":"2.0","id":1,"method":"initialize","params":{}}"#,
            "\n",
            r#"{"jsonrpc":"2.0","method":"notifications/initialized"}"#,
            "\n\n",
            r#"{"jsonrpc":"2.0","id":2,"method":"ping"}"#,
            "\n",
        );
        let mut output = Vec::new();
        server().serve(input.as_bytes(), &mut output).await.unwrap();

        let text = String::from_utf8(output).unwrap();
        let lines: Vec<Value> = text
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0]["id"], 1);
        assert_eq!(lines[1]["id"], 2);
    }
}
