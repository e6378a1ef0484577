use std::sync::Arc;

use clap::Parser;

use mcp_blogger_server::config::ServerConfig;
use mcp_blogger_server::handlers::ServerContext;
use mcp_blogger_server::http;
use mcp_blogger_server::logging::{init_logger, LogFormat};
use mcp_blogger_server::server::McpServer;

#[derive(Debug, Parser)]
#[command(name = "mcp-blogger-server", version, about)]
struct Cli {
    /// Speak MCP over stdin/stdout instead of HTTP.
    #[arg(long)]
    stdio: bool,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_logger(LogFormat::from_env());

    let config = match ServerConfig::from_env() {
        Ok(c) => c,
        Err(e) => {
            tracing::error!("configuration error: {e}");
            std::process::exit(1);
        }
    };

    tracing::info!(
        allowed_domains = ?config.allowed_domains,
        api_base_url = %config.api_base_url,
        "configuration loaded"
    );
    if config.allowed_domains.is_empty() {
        tracing::warn!("ALLOWED_DOMAINS is empty; every query will be denied");
    }

    let ctx = match ServerContext::from_config(&config) {
        Ok(ctx) => Arc::new(ctx),
        Err(e) => {
            tracing::error!("startup error: {e}");
            std::process::exit(1);
        }
    };

    if cli.stdio {
        tracing::info!("starting MCP server on stdio");
        let mut server = McpServer::new(ctx);
        if let Err(e) = server.run().await {
            tracing::error!("fatal error: {e}");
            std::process::exit(1);
        }
        return;
    }

    let listener = match tokio::net::TcpListener::bind(config.bind_address()).await {
        Ok(l) => l,
        Err(e) => {
            tracing::error!("cannot bind {}: {e}", config.bind_address());
            std::process::exit(1);
        }
    };
    if let Err(e) = http::serve(listener, ctx).await {
        tracing::error!("fatal error: {e}");
        std::process::exit(1);
    }
}
