//! Infrastructure layer for salesforce-mcp
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer: configuration loading, the Salesforce
//! REST connection, the JSON-schema tool converter and the MCP stdio server.

pub mod config;
pub mod mcp;
pub mod salesforce;
pub mod tools;

// Re-export commonly used types
pub use config::{ConfigError, ConfigIssue, ConfigLoader, FileConfig, FileSalesforceConfig, FileServerConfig, Severity};
pub use mcp::{McpError, McpServer};
pub use salesforce::{RestConnection, SalesforceConnector, Session};
pub use tools::JsonSchemaToolConverter;
