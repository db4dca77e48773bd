use std::net::SocketAddr;

use crate::api::AppState;
use crate::infra::config::{Config, Mode};
use crate::tools::build_registry;

/// Build shared state before any transport starts accepting traffic.
pub fn build_state(cfg: &Config) -> anyhow::Result<AppState> {
    let registry = build_registry(cfg)?;
    tracing::info!(tools = registry.len(), "tool registry ready");
    Ok(AppState::new(registry, cfg))
}

pub async fn run_server(cfg: Config) -> anyhow::Result<()> {
    tracing::info!(
        mode = %cfg.mode,
        port = cfg.port,
        server_name = %cfg.server_name,
        server_version = %cfg.server_version,
        api_base_url = %cfg.api_base_url,
        "BOOT likeminds-mcp-gateway"
    );

    let state = build_state(&cfg)?;

    if cfg.mode == Mode::Stdio {
        return crate::api::mcp::stdio_loop(state).await;
    }

    let app = crate::infra::http_app::build_app(state);
    let addr: SocketAddr = ([0, 0, 0, 0], cfg.port).into();
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, "listening: POST /mcp (JSON-RPC), GET /health");
    axum::serve(listener, app).await?;
    Ok(())
}
