use std::net::SocketAddr;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use tracing::{info, warn};

use firstpromoter_mcp::config::{ACCOUNT_ID_VAR, API_KEY_VAR, AUTH_TOKEN_VAR};
use firstpromoter_mcp::server::{http, stdio};
use firstpromoter_mcp::{
    init_logging, AppConfig, Credentials, FirstPromoterClient, LogFormat, McpServer,
    ToolRegistry, TransportMode, TOOLS,
};

// ============================================================================
// CLI Arguments
// ============================================================================

#[derive(Parser)]
#[command(name = "firstpromoter-mcp")]
#[command(version, about = "FirstPromoter tools for MCP hosts", long_about = None)]
struct Cli {
    /// Path to config file
    #[arg(short, long, default_value = "firstpromoter.toml")]
    config: String,

    /// FirstPromoter API key
    #[arg(long, env = "FP_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    /// FirstPromoter account id
    #[arg(long, env = "FP_ACCOUNT_ID")]
    account_id: Option<String>,

    /// Bearer token required on /mcp, /sse and /messages (network transports only)
    #[arg(long, env = "MCP_AUTH_TOKEN", hide_env_values = true)]
    auth_token: Option<String>,

    /// Transport (sse, http, stdio)
    #[arg(long, env = "MCP_TRANSPORT")]
    transport: Option<TransportMode>,

    /// Listen host for the network transport
    #[arg(long, env = "MCP_HOST")]
    host: Option<String>,

    /// Listen port for the network transport
    #[arg(long, env = "MCP_PORT")]
    port: Option<u16>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,

    /// Output format (pretty, json, compact)
    #[arg(long)]
    log_format: Option<LogFormat>,

    /// Additional JSON log file
    #[arg(long)]
    log_file: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve the tools over the configured transport (default)
    Serve,
    /// Print the tool catalogue
    Tools,
    /// Generate a sample config file
    GenerateConfig {
        /// Output file path
        #[arg(short, long, default_value = "firstpromoter.toml")]
        output: String,
    },
}

// ============================================================================
// Main
// ============================================================================

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load .env file if it exists (before parsing CLI args)
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    match &cli.command {
        Some(Commands::GenerateConfig { output }) => return generate_sample_config(output),
        Some(Commands::Tools) => {
            print_tools();
            return Ok(());
        }
        Some(Commands::Serve) | None => {}
    }

    let config = load_config(&cli)?;
    let _log_guard = init_logging(&config.logging)?;

    let credentials = Arc::new(Credentials::new(
        cli.api_key.clone().unwrap_or_default(),
        cli.account_id.clone().unwrap_or_default(),
        cli.auth_token.clone().unwrap_or_default(),
    ));
    warn_unset(&credentials);

    let client = FirstPromoterClient::new(Arc::clone(&credentials), None);
    let server = McpServer::new(ToolRegistry::new(client));

    info!(
        version = env!("CARGO_PKG_VERSION"),
        transport = %config.server.transport,
        tools = TOOLS.len(),
        configured = credentials.is_configured(),
        "Starting FirstPromoter MCP server"
    );

    match config.server.transport {
        TransportMode::Stdio => stdio::serve(server).await?,
        mode @ (TransportMode::Sse | TransportMode::Http) => {
            let addr = resolve(&config.server.bind_addr()).await?;
            let sse = mode == TransportMode::Sse;
            http::serve(server, addr, credentials.auth_token(), sse).await?;
        }
    }
    Ok(())
}

// ============================================================================
// Helper Functions
// ============================================================================

/// File values, then CLI/env overrides.
fn load_config(cli: &Cli) -> Result<AppConfig, Box<dyn std::error::Error>> {
    let mut config = AppConfig::load(&cli.config)?;

    if let Some(transport) = cli.transport {
        config.server.transport = transport;
    }
    if let Some(host) = &cli.host {
        config.server.host = host.clone();
    }
    if let Some(port) = cli.port {
        config.server.port = port;
    }
    if let Some(level) = &cli.log_level {
        config.logging.level = level.clone();
    }
    if let Some(format) = cli.log_format {
        config.logging.format = format;
    }
    if let Some(path) = &cli.log_file {
        config.logging.log_file = Some(path.into());
    }
    Ok(config)
}

fn warn_unset(credentials: &Credentials) {
    if credentials.api_key.trim().is_empty() {
        warn!("{API_KEY_VAR} environment variable not set");
    }
    if credentials.account_id.trim().is_empty() {
        warn!("{ACCOUNT_ID_VAR} environment variable not set");
    }
    if credentials.auth_token().is_none() {
        warn!("{AUTH_TOKEN_VAR} environment variable not set; network endpoints accept unauthenticated requests");
    }
}

async fn resolve(bind_addr: &str) -> Result<SocketAddr, Box<dyn std::error::Error>> {
    tokio::net::lookup_host(bind_addr)
        .await?
        .next()
        .ok_or_else(|| format!("Cannot resolve listen address '{bind_addr}'").into())
}

fn print_tools() {
    for tool in TOOLS {
        println!("{}", tool.name);
        println!("    {}", tool.description);
        for param in tool.params {
            let marker = if param.required { " (required)" } else { "" };
            match param.default {
                Some(default) => println!("    - {}{marker} [default: {default}]", param.name),
                None => println!("    - {}{marker}", param.name),
            }
        }
    }
}

fn generate_sample_config(path: &str) -> Result<(), Box<dyn std::error::Error>> {
    let sample = AppConfig::default();
    let content = toml::to_string_pretty(&sample)?;

    let with_comments = format!(
        r#"# FirstPromoter MCP Server Configuration
# See: firstpromoter-mcp --help

{content}
# Credentials are read from the environment only:
#   FP_API_KEY, FP_ACCOUNT_ID, MCP_AUTH_TOKEN
"#
    );

    std::fs::write(path, with_comments)?;
    println!("Sample config written to: {path}");
    Ok(())
}
