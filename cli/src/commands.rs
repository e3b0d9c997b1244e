//! CLI command definitions

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// What to do after loading configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Serve MCP over stdin/stdout (default)
    Serve,
    /// Print the tool catalog as JSON and exit
    Tools,
    /// Log in and run a one-row Account query
    CheckConnection,
    /// Show configuration file locations and exit
    ConfigSources,
}

/// CLI arguments for salesforce-mcp
#[derive(Parser, Debug)]
#[command(name = "salesforce-mcp")]
#[command(author, version, about = "MCP server for Salesforce schema, data and metadata")]
#[command(long_about = r#"
salesforce-mcp exposes a Salesforce org to MCP clients as a set of tools:
object search, describe, SOQL query, DML, custom object and field
management, and SOSL search across objects.

Credentials come from SALESFORCE_* environment variables (a .env file in the
working directory is read first) or from configuration files, loaded from
(in priority order):
1. --config <path>                          Explicit config file
2. ./salesforce-mcp.toml                    Project-level config
3. ~/.config/salesforce-mcp/config.toml     Global config

Logs go to stderr; stdout carries the protocol stream.

Example:
  salesforce-mcp
  salesforce-mcp --read-only -v
  salesforce-mcp check-connection
"#)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to configuration file
    #[arg(long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long, global = true)]
    pub no_config: bool,

    /// Expose only tools that never change the org
    #[arg(long, global = true)]
    pub read_only: bool,
}

impl Cli {
    pub fn mode(&self) -> Command {
        self.command.unwrap_or(Command::Serve)
    }
}
