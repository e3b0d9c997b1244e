//! MCP (Model Context Protocol) server over stdio
//!
//! Tool calls arrive as JSON-RPC `tools/call` requests and are handed to a
//! [`ToolExecutorPort`](sfmcp_application::ToolExecutorPort); the catalog is
//! rendered for `tools/list` through a
//! [`ToolSchemaPort`](sfmcp_application::ToolSchemaPort).

pub mod error;
pub mod protocol;
pub mod server;

pub use error::McpError;
pub use protocol::{Frame, JsonRpcRequest, JsonRpcResponse, PROTOCOL_VERSION, RpcError, SERVER_NAME};
pub use server::McpServer;
