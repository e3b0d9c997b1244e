//! CLI entrypoint for salesforce-mcp
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

mod commands;

use anyhow::Result;
use clap::Parser;
use commands::{Cli, Command};
use sfmcp_application::{
    ConnectionFactory, CrmConnection, ToolDispatcher, ToolSchemaPort, default_tool_spec, read_only_tool_spec,
};
use sfmcp_domain::tool::entities::ToolSpec;
use sfmcp_infrastructure::{
    ConfigLoader, FileConfig, FileSalesforceConfig, JsonSchemaToolConverter, McpServer,
    SalesforceConnector, Severity,
};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

const CHECK_QUERY: &str = "SELECT Id, Name FROM Account LIMIT 1";

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    // Initialize logging based on verbosity level; RUST_LOG wins when set
    let level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace", // -vvv or more
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    // Stdout is the protocol stream
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    match cli.mode() {
        Command::ConfigSources => {
            for line in ConfigLoader::config_sources(cli.config.as_deref()) {
                println!("{}", line);
            }
        }
        Command::Tools => {
            let config = load_config(&cli)?;
            let spec = tool_spec(&cli, &config);
            let schemas = JsonSchemaToolConverter.all_tools_schema(&spec);
            println!("{}", serde_json::to_string_pretty(&schemas)?);
        }
        Command::CheckConnection => {
            let config = load_config(&cli)?;
            check_connection(config.salesforce).await?;
        }
        Command::Serve => {
            let config = load_config(&cli)?;
            let spec = tool_spec(&cli, &config);
            info!(
                tools = spec.len(),
                read_only = cli.read_only || config.server.read_only,
                "Starting salesforce-mcp"
            );

            // === Dependency Injection ===
            let connector = SalesforceConnector::new(config.salesforce)?;
            let dispatcher = ToolDispatcher::with_tools(connector, spec);
            let server = McpServer::new(dispatcher, JsonSchemaToolConverter);

            server.serve_stdio().await?;
        }
    }

    Ok(())
}

fn load_config(cli: &Cli) -> Result<FileConfig> {
    let config = if cli.no_config {
        ConfigLoader::load_without_files()?
    } else {
        ConfigLoader::load(cli.config.as_ref())?
    };

    // Reported only; a missing credential surfaces again on first login
    for issue in config.validate() {
        match issue.severity {
            Severity::Error => error!(field = %issue.field, "{}", issue.message),
            Severity::Warning => warn!(field = %issue.field, "{}", issue.message),
        }
    }

    Ok(config)
}

fn tool_spec(cli: &Cli, config: &FileConfig) -> ToolSpec {
    let spec = if cli.read_only || config.server.read_only {
        read_only_tool_spec()
    } else {
        default_tool_spec()
    };
    if config.server.aliases {
        spec
    } else {
        spec.without_aliases()
    }
}

async fn check_connection(config: FileSalesforceConfig) -> Result<()> {
    let connector = SalesforceConnector::new(config)?;
    let connection = connector.connect().await?;
    let result = connection.query(CHECK_QUERY).await?;
    println!(
        "Connection OK: {} returned {} record(s)",
        CHECK_QUERY, result.total_size
    );
    Ok(())
}
