// ABOUTME: Streamable HTTP transport for the jazz MCP server
// ABOUTME: Mounts rmcp sessions at /mcp next to a plain /health probe

use crate::config::HttpConfig;
use crate::error::Result;
use crate::server::JazzImprovMcpServer;
use axum::{routing::get, Router};
use rmcp::transport::streamable_http_server::{
    session::local::LocalSessionManager, StreamableHttpServerConfig, StreamableHttpService,
};
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

/// Build the router without binding, so tests can drive it directly.
pub fn build_http_app(server: JazzImprovMcpServer, config: &HttpConfig) -> Router {
    let http_service = StreamableHttpService::new(
        move || Ok(server.clone()),
        Arc::new(LocalSessionManager::default()),
        StreamableHttpServerConfig {
            sse_keep_alive: Some(Duration::from_secs(config.keep_alive_seconds)),
            stateful_mode: true,
            ..Default::default()
        },
    );

    Router::new()
        .nest_service("/mcp", http_service)
        .route("/health", get(health_check))
}

/// Serve until Ctrl-C.
pub async fn start_http_server(server: JazzImprovMcpServer, config: HttpConfig) -> Result<()> {
    let addr = config.bind_address();
    let app = build_http_app(server, &config);

    let listener = tokio::net::TcpListener::bind((config.host.as_str(), config.port)).await?;
    info!("Jazz improv MCP HTTP server listening on http://{}", addr);
    info!("  POST http://{}/mcp - Initialize session and send MCP requests", addr);
    info!("  GET  http://{}/health - Health check", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Shutting down HTTP server"),
        Err(e) => {
            warn!("Failed to listen for shutdown signal: {}", e);
            std::future::pending::<()>().await;
        }
    }
}

async fn health_check() -> &'static str {
    "OK"
}
