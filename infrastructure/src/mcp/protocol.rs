//! JSON-RPC 2.0 message types for the MCP stdio transport.
//!
//! # Frame kinds
//!
//! - **Requests** carry a `method` and a non-null `id` and always get a response
//! - **Notifications** carry a `method` without an `id` and never get one
//! - **Responses** carry `result` or `error`; a server that issues no requests
//!   of its own just drops them

use super::error::McpError;
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const JSONRPC_VERSION: &str = "2.0";

/// MCP revision this server speaks
pub const PROTOCOL_VERSION: &str = "2024-11-05";

pub const SERVER_NAME: &str = "salesforce-mcp";

pub const PARSE_ERROR: i64 = -32700;
pub const INVALID_REQUEST: i64 = -32600;
pub const METHOD_NOT_FOUND: i64 = -32601;
pub const INVALID_PARAMS: i64 = -32602;
pub const INTERNAL_ERROR: i64 = -32603;

/// Inbound message with a `method`
#[derive(Debug, Clone, Deserialize)]
pub struct JsonRpcRequest {
    #[serde(rename = "jsonrpc", default)]
    _jsonrpc: Option<String>,
    pub method: String,
    #[serde(default)]
    pub id: Option<Value>,
    #[serde(default)]
    pub params: Option<Value>,
}

/// A classified inbound frame
#[derive(Debug, Clone)]
pub enum Frame {
    Request {
        id: Value,
        method: String,
        params: Option<Value>,
    },
    Notification {
        method: String,
    },
    Response(Value),
}

impl Frame {
    /// Sort a decoded JSON value into a frame kind
    pub fn classify(value: Value) -> Result<Self, McpError> {
        let Some(object) = value.as_object() else {
            return Err(McpError::InvalidRequest);
        };

        if object.contains_key("method") {
            let request: JsonRpcRequest =
                serde_json::from_value(value).map_err(|_| McpError::InvalidRequest)?;
            return Ok(match request.id {
                Some(id) if !id.is_null() => Frame::Request {
                    id,
                    method: request.method,
                    params: request.params,
                },
                _ => Frame::Notification {
                    method: request.method,
                },
            });
        }

        if object.contains_key("result") || object.contains_key("error") {
            return Ok(Frame::Response(value));
        }

        Err(McpError::InvalidRequest)
    }
}

/// JSON-RPC error object
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RpcError {
    pub code: i64,
    pub message: String,
}

/// Outbound response
#[derive(Debug, Clone, Serialize)]
pub struct JsonRpcResponse {
    pub jsonrpc: &'static str,
    pub id: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<RpcError>,
}

impl JsonRpcResponse {
    pub fn success(id: Value, result: Value) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION,
            id,
            result: Some(result),
            error: None,
        }
    }

    pub fn failure(id: Value, error: &McpError) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION,
            id,
            result: None,
            error: Some(RpcError {
                code: error.code(),
                message: error.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_classify_request() {
        let frame = Frame::classify(json!({"jsonrpc": "2.0", "id": 7, "method": "ping"})).unwrap();
        assert!(matches!(frame, Frame::Request { ref id, ref method, .. } if id == &json!(7) && method == "ping"));
    }

    #[test]
    fn test_classify_notification() {
        let frame = Frame::classify(json!({"jsonrpc": "2.0", "method": "notifications/initialized"})).unwrap();
        assert!(matches!(frame, Frame::Notification { ref method } if method == "notifications/initialized"));

        let null_id = Frame::classify(json!({"jsonrpc": "2.0", "id": null, "method": "ping"})).unwrap();
        assert!(matches!(null_id, Frame::Notification { .. }));
    }

    #[test]
    fn test_classify_response() {
        let frame = Frame::classify(json!({"jsonrpc": "2.0", "id": 1, "result": {}})).unwrap();
        assert!(matches!(frame, Frame::Response(_)));
    }

    #[test]
    fn test_classify_invalid() {
        assert!(matches!(Frame::classify(json!([1, 2])), Err(McpError::InvalidRequest)));
        assert!(matches!(Frame::classify(json!({"id": 1})), Err(McpError::InvalidRequest)));
        assert!(matches!(
            Frame::classify(json!({"id": 1, "method": 42})),
            Err(McpError::InvalidRequest)
        ));
    }

    #[test]
    fn test_response_serialization() {
        let ok = serde_json::to_value(JsonRpcResponse::success(json!(1), json!({}))).unwrap();
        assert_eq!(ok, json!({"jsonrpc": "2.0", "id": 1, "result": {}}));

        let err = serde_json::to_value(JsonRpcResponse::failure(
            Value::Null,
            &McpError::MethodNotFound("nope".into()),
        ))
        .unwrap();
        assert_eq!(
            err,
            json!({"jsonrpc": "2.0", "id": null, "error": {"code": -32601, "message": "Method not found: nope"}})
        );
    }
}
