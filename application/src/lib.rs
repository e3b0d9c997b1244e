//! Application layer for salesforce-mcp
//!
//! This crate contains the tool use cases, the dispatcher and the port
//! definitions adapters implement. It depends only on the domain layer.

pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use ports::{
    crm_connection::{ConnectionError, ConnectionFactory, CrmConnection},
    tool_executor::ToolExecutorPort,
    tool_schema::ToolSchemaPort,
};
pub use use_cases::args::ValidatedArgs;
pub use use_cases::catalog::{default_tool_spec, read_only_tool_spec};
pub use use_cases::dispatch::ToolDispatcher;
