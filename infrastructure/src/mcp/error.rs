//! Error types for the MCP protocol surface

use super::protocol::{INTERNAL_ERROR, INVALID_PARAMS, INVALID_REQUEST, METHOD_NOT_FOUND, PARSE_ERROR};
use thiserror::Error;

/// Errors raised while serving the protocol stream
///
/// Everything except [`McpError::Io`] is reported back to the client as a
/// JSON-RPC error object; I/O failures end the serve loop.
#[derive(Error, Debug)]
pub enum McpError {
    #[error("Protocol stream I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Invalid Request")]
    InvalidRequest,

    #[error("Method not found: {0}")]
    MethodNotFound(String),

    #[error("Invalid params: {0}")]
    InvalidParams(String),
}

impl McpError {
    /// JSON-RPC error code for this error
    pub fn code(&self) -> i64 {
        match self {
            McpError::Parse(_) => PARSE_ERROR,
            McpError::InvalidRequest => INVALID_REQUEST,
            McpError::MethodNotFound(_) => METHOD_NOT_FOUND,
            McpError::InvalidParams(_) => INVALID_PARAMS,
            McpError::Io(_) | McpError::Serialization(_) => INTERNAL_ERROR,
        }
    }
}
