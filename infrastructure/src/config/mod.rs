//! Configuration loading for salesforce-mcp
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. `SALESFORCE_*` environment variables (a `.env` file is read by the binary)
//! 2. `--config <path>` specified file
//! 3. Project root: `./salesforce-mcp.toml` or `./.salesforce-mcp.toml`
//! 4. XDG config: `$XDG_CONFIG_HOME/salesforce-mcp/config.toml`
//! 5. Default values

mod file_config;
mod loader;

pub use file_config::{
    ConfigIssue, DEFAULT_API_VERSION, DEFAULT_INSTANCE_URL, FileConfig, FileSalesforceConfig,
    FileServerConfig, Severity,
};
pub use loader::{ConfigError, ConfigLoader};
