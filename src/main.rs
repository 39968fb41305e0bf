use std::sync::Arc;

use mcp_mealdb::{client::MealDbClient, config::Config, server::MealDbMcpServer};
use rmcp::transport::sse_server::{SseServer, SseServerConfig};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".to_string().into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env();
    let client = Arc::new(MealDbClient::new(config.base_url.clone()));

    // The catalog being down is not fatal: every tool degrades to "no results".
    tracing::info!("Checking catalog at {}...", client.base_url());
    if let Err(e) = MealDbMcpServer::with_client(client.clone()).test_api_access().await {
        tracing::warn!("API access test failed: {}", e);
        tracing::warn!("The server will continue, but lookups will return no results until the catalog is reachable.");
    }

    let sse_config = SseServerConfig {
        bind: config.socket_addr()?,
        sse_path: "/sse".to_string(),
        post_path: "/message".to_string(),
        ct: tokio_util::sync::CancellationToken::new(),
        sse_keep_alive: None,
    };

    tracing::info!("MealDB MCP Server listening on {}", sse_config.bind);

    let sse_server = SseServer::serve_with_config(sse_config).await?;

    // One server per connection: each gets its own search session.
    let ct = sse_server.with_service(move || MealDbMcpServer::with_client(client.clone()));

    tracing::info!("MealDB MCP Server started successfully");

    // Wait for Ctrl+C
    tokio::signal::ctrl_c().await?;
    tracing::info!("Shutting down...");
    ct.cancel();

    Ok(())
}
